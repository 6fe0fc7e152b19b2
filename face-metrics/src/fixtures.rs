//! Synthetic in-memory faces for tests.

use std::collections::HashMap;

use crate::raster::{printable_chars, Face, Raster, RenderedGlyph};

/// Builds a raster filled with one intensity.
pub(crate) fn solid(width: usize, height: usize, value: u8) -> Raster {
    Raster::new(width, height, vec![value; width * height])
}

/// A face backed by an explicit glyph table.
pub(crate) struct TestFace {
    family: String,
    style: String,
    glyphs: HashMap<char, RenderedGlyph>,
}

impl TestFace {
    pub fn new(family: &str, style: &str) -> Self {
        Self {
            family: family.to_string(),
            style: style.to_string(),
            glyphs: HashMap::new(),
        }
    }

    /// A face with a fully black `side`x`side` square at every
    /// printable code point.
    pub fn solid_square_face(side: usize) -> Self {
        let mut face = Self::new("SolidSquare", "Regular");
        for ch in printable_chars() {
            face = face.with_plain_glyph(ch, solid(side, side, 255));
        }
        face
    }

    /// Adds a glyph whose edge raster is derived from the plain one.
    pub fn with_plain_glyph(mut self, ch: char, plain: Raster) -> Self {
        self.glyphs.insert(ch, RenderedGlyph::new(plain));
        self
    }

    /// Adds a glyph with explicit plain and edge rasters.
    pub fn with_glyph(mut self, ch: char, glyph: RenderedGlyph) -> Self {
        self.glyphs.insert(ch, glyph);
        self
    }

    /// Removes a glyph, making the code point absent.
    pub fn without_glyph(mut self, ch: char) -> Self {
        self.glyphs.remove(&ch);
        self
    }
}

impl Face for TestFace {
    fn family_name(&self) -> &str {
        &self.family
    }

    fn style_name(&self) -> &str {
        &self.style
    }

    fn glyph(&self, ch: char) -> Option<&RenderedGlyph> {
        self.glyphs.get(&ch)
    }
}
