//! Grayscale glyph rasters and the face abstraction the metrics consume.
//!
//! The metric algorithms never touch font files directly. They see a
//! [`Face`], which hands out one [`RenderedGlyph`] per printable code
//! point, and each glyph carries two [`Raster`]s: the plain grayscale
//! rendering and an edge-magnitude derivation of it. How the plain
//! raster is produced (FreeType, a test fixture, ...) is the caller's
//! concern.

/// First code point of the printable ASCII range covered by a face.
pub const FIRST_GLYPH: char = ' ';

/// Last code point of the printable ASCII range covered by a face.
pub const LAST_GLYPH: char = '~';

/// Number of code points in the printable range, inclusive.
pub const NUM_GLYPHS: usize = (LAST_GLYPH as usize - FIRST_GLYPH as usize) + 1;

/// Returns an iterator over the printable ASCII code points, in order.
pub fn printable_chars() -> impl Iterator<Item = char> {
    FIRST_GLYPH..=LAST_GLYPH
}

/// An owned 8-bit grayscale bitmap in row-major order.
///
/// A raster with zero width or height is empty but valid; every glyph
/// algorithm treats it as a degenerate case rather than an error.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    /// Creates a raster from row-major pixel data.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Self {
        assert_eq!(
            pixels.len(),
            width * height,
            "pixel buffer does not match {width}x{height}"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Creates an empty 0x0 raster.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the intensity at `(col, row)`, or 0 outside the raster.
    pub fn get(&self, col: usize, row: usize) -> u8 {
        if col < self.width && row < self.height {
            self.pixels[row * self.width + col]
        } else {
            0
        }
    }

    /// Signed-coordinate sampling used by convolution; out of bounds
    /// reads as 0.
    pub(crate) fn sample(&self, col: isize, row: isize) -> u8 {
        if col < 0 || row < 0 {
            return 0;
        }
        self.get(col as usize, row as usize)
    }

    /// Computes a Sobel gradient-magnitude raster of the same dimensions.
    ///
    /// Pixels outside the raster sample as 0, so a glyph whose ink runs
    /// to the bitmap border produces edge responses there. Magnitudes
    /// are clamped to 255.
    pub fn edge_map(&self) -> Raster {
        let mut pixels = Vec::with_capacity(self.width * self.height);
        for row in 0..self.height as isize {
            for col in 0..self.width as isize {
                let mut gx = 0i32;
                let mut gy = 0i32;
                for (i, (dx, dy)) in NEIGHBORHOOD.iter().enumerate() {
                    let p = self.sample(col + dx, row + dy) as i32;
                    gx += SOBEL_X[i] * p;
                    gy += SOBEL_Y[i] * p;
                }
                let magnitude = ((gx * gx + gy * gy) as f64).sqrt();
                pixels.push(magnitude.min(255.0) as u8);
            }
        }
        Raster::new(self.width, self.height, pixels)
    }
}

// 3x3 neighborhood offsets paired with the Sobel weights below.
const NEIGHBORHOOD: [(isize, isize); 9] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
const SOBEL_X: [i32; 9] = [-1, 0, 1, -2, 0, 2, -1, 0, 1];
const SOBEL_Y: [i32; 9] = [-1, -2, -1, 0, 0, 0, 1, 2, 1];

/// The pair of rasters derived from one rendered glyph.
#[derive(Clone, Debug)]
pub struct RenderedGlyph {
    plain: Raster,
    edges: Raster,
}

impl RenderedGlyph {
    /// Creates a glyph from its plain raster, deriving the edge raster
    /// with [`Raster::edge_map`].
    pub fn new(plain: Raster) -> Self {
        let edges = plain.edge_map();
        Self { plain, edges }
    }

    /// Creates a glyph from an explicit plain/edge raster pair.
    pub fn from_parts(plain: Raster, edges: Raster) -> Self {
        Self { plain, edges }
    }

    /// The plain grayscale rendering.
    pub fn plain(&self) -> &Raster {
        &self.plain
    }

    /// The edge-magnitude rendering.
    pub fn edges(&self) -> &Raster {
        &self.edges
    }
}

/// A loaded typeface at a fixed size, providing rendered glyphs for the
/// printable ASCII range.
///
/// Glyph handles are borrowed for the duration of one metric
/// computation; a face not covering the full printable range returns
/// `None` for the code points it is missing, which the aggregation
/// protocol skips silently.
pub trait Face {
    /// The face's family name, as reported by the font.
    fn family_name(&self) -> &str;

    /// The face's style name, as reported by the font.
    fn style_name(&self) -> &str;

    /// Returns the rendered glyph for `ch`, or `None` if the face has
    /// no glyph for that code point.
    fn glyph(&self, ch: char) -> Option<&RenderedGlyph>;
}
