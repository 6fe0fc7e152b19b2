//! FreeType-backed face loading and glyph rasterization.
//!
//! A [`FtFace`] memory-maps a font file, selects the requested
//! character size and renders every printable ASCII glyph to a
//! grayscale bitmap up front. After construction no FreeType state is
//! retained; the face is a plain table of rendered glyphs implementing
//! [`face_metrics::Face`].

use std::borrow::Borrow;
use std::path::Path;
use std::sync::Arc;

use freetype::bitmap::PixelMode;
use freetype::face::LoadFlag;
use freetype::{Library, RenderMode};

use face_metrics::{printable_chars, Face, FaceError, Raster, RenderedGlyph, FIRST_GLYPH};

/// Rendering resolution in dots per inch (print resolution).
const DPI: u32 = 300;

/// One point in FreeType's 26.6 fixed-point char-size units.
const POINT: isize = 64;

/// A typeface rendered at a fixed point size.
pub struct FtFace {
    family: String,
    style: String,
    glyphs: Vec<Option<RenderedGlyph>>,
}

impl FtFace {
    /// Opens the font file at `path` and renders its printable glyphs
    /// at `point_size`.
    ///
    /// Code points the font's character map does not cover are
    /// recorded as absent, not errors.
    pub fn new(path: &Path, point_size: u32) -> Result<Self, FaceError> {
        let file = std::fs::File::open(path)
            .map_err(|e| FaceError::Unknown(format!("cannot open {}: {e}", path.display())))?;
        let data = SharedFontData(Arc::new(
            unsafe { memmap2::Mmap::map(&file) }
                .map_err(|e| FaceError::Unknown(format!("cannot map {}: {e}", path.display())))?,
        ));
        let library = Library::init().map_err(|e| FaceError::Unknown(e.to_string()))?;
        let face = library
            .new_memory_face2(data, 0)
            .map_err(|e| match e {
                freetype::Error::UnknownFileFormat => FaceError::UnknownFileFormat,
                other => FaceError::Unknown(other.to_string()),
            })?;
        face.set_char_size(point_size as isize * POINT, 0, DPI, 0)
            .map_err(|_| FaceError::SetCharSize)?;

        let mut glyphs = Vec::with_capacity(face_metrics::NUM_GLYPHS);
        for ch in printable_chars() {
            glyphs.push(render_glyph(&face, ch)?);
        }
        Ok(Self {
            family: face.family_name().unwrap_or_default(),
            style: face.style_name().unwrap_or_default(),
            glyphs,
        })
    }
}

impl Face for FtFace {
    fn family_name(&self) -> &str {
        &self.family
    }

    fn style_name(&self) -> &str {
        &self.style
    }

    fn glyph(&self, ch: char) -> Option<&RenderedGlyph> {
        let index = (ch as usize).checked_sub(FIRST_GLYPH as usize)?;
        self.glyphs.get(index)?.as_ref()
    }
}

fn render_glyph(
    face: &freetype::Face<SharedFontData>,
    ch: char,
) -> Result<Option<RenderedGlyph>, FaceError> {
    let index = face.get_char_index(ch as usize);
    if index == 0 {
        // Not covered by the charmap.
        return Ok(None);
    }
    // Empty flags are FT_LOAD_DEFAULT; rendering happens separately so
    // load and render failures map to distinct error codes.
    face.load_glyph(index, LoadFlag::empty())
        .map_err(|_| FaceError::LoadChar(ch))?;
    face.glyph()
        .render_glyph(RenderMode::Normal)
        .map_err(|_| FaceError::RenderChar(ch))?;
    let raster = bitmap_to_raster(&face.glyph().bitmap(), ch)?;
    log::trace!(
        "rendered {ch:?} as {}x{}",
        raster.width(),
        raster.height()
    );
    Ok(Some(RenderedGlyph::new(raster)))
}

/// Copies a FreeType bitmap into an owned raster, honoring the pitch
/// (which is negative for bottom-up bitmaps).
fn bitmap_to_raster(bitmap: &freetype::Bitmap, ch: char) -> Result<Raster, FaceError> {
    let width = bitmap.width() as usize;
    let height = bitmap.rows() as usize;
    if width == 0 || height == 0 {
        // Blank glyphs like the space render as 0x0.
        return Ok(Raster::empty());
    }
    let pitch = bitmap.pitch();
    let stride = pitch.unsigned_abs() as usize;
    let buffer = bitmap.buffer();
    if buffer.len() < stride * height {
        return Err(FaceError::CacheChar(ch));
    }
    let row_start = |row: usize| {
        if pitch >= 0 {
            row * stride
        } else {
            (height - 1 - row) * stride
        }
    };
    let mut pixels = Vec::with_capacity(width * height);
    match bitmap.pixel_mode() {
        Ok(PixelMode::Gray) => {
            for row in 0..height {
                let start = row_start(row);
                pixels.extend_from_slice(&buffer[start..start + width]);
            }
        }
        Ok(PixelMode::Mono) => {
            for row in 0..height {
                let start = row_start(row);
                for col in 0..width {
                    let byte = buffer[start + col / 8];
                    let on = byte & (0x80 >> (col % 8)) != 0;
                    pixels.push(if on { 255 } else { 0 });
                }
            }
        }
        _ => return Err(FaceError::CacheChar(ch)),
    }
    Ok(Raster::new(width, height, pixels))
}

#[derive(Clone)]
struct SharedFontData(Arc<memmap2::Mmap>);

impl Borrow<[u8]> for SharedFontData {
    fn borrow(&self) -> &[u8] {
        self.0.as_ref()
    }
}
