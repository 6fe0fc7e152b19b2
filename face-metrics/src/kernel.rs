//! Convolution kernels for the oriented shape detectors.
//!
//! The slant and curve metrics match small fixed patterns against a
//! glyph's edge raster. Each pattern family is derived from a single
//! literal weight table: the slant bank is a diagonal stroke plus its
//! horizontal mirror, and the curve bank is a corner arc plus its three
//! successive 90-degree rotations, covering all four arc orientations.

use crate::raster::Raster;

/// An immutable 2D grid of signed convolution weights.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Kernel {
    width: usize,
    height: usize,
    weights: Vec<i32>,
}

impl Kernel {
    /// Creates a kernel from row-major weights.
    ///
    /// # Panics
    ///
    /// Panics if `weights.len() != width * height`.
    pub fn new(width: usize, height: usize, weights: &[i32]) -> Self {
        assert_eq!(
            weights.len(),
            width * height,
            "weight table does not match {width}x{height}"
        );
        Self {
            width,
            height,
            weights: weights.to_vec(),
        }
    }

    /// Width of the kernel grid.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the kernel grid.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Weight at `(col, row)`.
    pub fn weight(&self, col: usize, row: usize) -> i32 {
        self.weights[row * self.width + col]
    }

    /// Returns the horizontal mirror of this kernel.
    pub fn flipped_h(&self) -> Kernel {
        let mut weights = Vec::with_capacity(self.weights.len());
        for row in 0..self.height {
            for col in 0..self.width {
                weights.push(self.weight(self.width - 1 - col, row));
            }
        }
        Kernel {
            width: self.width,
            height: self.height,
            weights,
        }
    }

    /// Returns this kernel rotated 90 degrees clockwise.
    pub fn rotated(&self) -> Kernel {
        // The rotated grid swaps dimensions; (col, row) in the result
        // reads (row, height - 1 - col) in the source.
        let mut weights = Vec::with_capacity(self.weights.len());
        for row in 0..self.width {
            for col in 0..self.height {
                weights.push(self.weight(row, self.height - 1 - col));
            }
        }
        Kernel {
            width: self.height,
            height: self.width,
            weights,
        }
    }

    /// Convolves the kernel centered at `(col, row)` of `raster`.
    ///
    /// Samples outside the raster read as 0.
    pub fn convolve_at(&self, raster: &Raster, col: usize, row: usize) -> i32 {
        let cx = (self.width / 2) as isize;
        let cy = (self.height / 2) as isize;
        let mut response = 0i32;
        for kr in 0..self.height {
            for kc in 0..self.width {
                let px = col as isize + kc as isize - cx;
                let py = row as isize + kr as isize - cy;
                response += self.weight(kc, kr) * raster.sample(px, py) as i32;
            }
        }
        response
    }
}

// A thin diagonal stroke rising to the right. A stronger-weighted
// variant (9 on the diagonal) was tried and rejected as too sensitive.
#[rustfmt::skip]
const SLANT_DIAGONAL: [i32; 25] = [
    -1, -1, -1, -1,  2,
    -1, -1, -1,  2, -1,
    -1, -1,  2, -1, -1,
    -1,  2, -1, -1, -1,
     2, -1, -1, -1, -1,
];

// A top-left corner arc. The other three orientations are derived by
// rotation.
#[rustfmt::skip]
const CURVE_TOP_LEFT: [i32; 25] = [
    -9, -9, -9,  0,  0,
    -9, -9,  0,  5,  5,
    -9,  0,  5,  0, -9,
     0,  5,  0, -9, -9,
     0,  5, -9, -9, -9,
];

/// Builds the two slant kernels: the base diagonal and its horizontal
/// mirror, detecting strokes leaning either way.
pub(crate) fn slant_bank() -> [Kernel; 2] {
    let base = Kernel::new(5, 5, &SLANT_DIAGONAL);
    let mirror = base.flipped_h();
    [base, mirror]
}

/// Builds the four curve kernels: the top-left arc and its three
/// successive 90-degree rotations.
pub(crate) fn curve_bank() -> [Kernel; 4] {
    let tl = Kernel::new(5, 5, &CURVE_TOP_LEFT);
    let tr = tl.rotated();
    let br = tr.rotated();
    let bl = br.rotated();
    [tl, tr, br, bl]
}
