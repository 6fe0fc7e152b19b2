//! The metric engine: kernel bank ownership, the convolution scorer,
//! the glyph-set aggregator and the eight metric algorithms.
//!
//! An [`Engine`] is an explicit value rather than process state. It is
//! immutable once built, so sharing one across threads is an ordinary
//! `Arc<Engine>`; dropping the last owner releases the kernel bank.

use crate::kernel::{curve_bank, slant_bank, Kernel};
use crate::metric::{Metric, MetricVector};
use crate::raster::{printable_chars, Face, Raster, RenderedGlyph};

// Glyph dimensions are normalized against a nominal 100px box.
const DIM_NORM: f64 = 100.0;

// A pixel counts as ink for the density metric above this intensity.
const INK_THRESHOLD: u8 = 128;

// Serif detection: adjacent row/column intensity sums further apart
// than this count as a discontinuity, each worth one increment.
const SERIF_DIFF_THRESHOLD: i64 = 255;
const SERIF_INCREMENT: f64 = 0.001;

// Reference glyphs for the serif heuristic. Straight-stemmed capitals
// show the sharpest projection discontinuities at serif terminals.
const SERIF_REFERENCE: [char; 4] = ['I', 'E', 'H', 'L'];

/// Owns the precomputed kernel bank and computes metrics for faces.
#[derive(Clone, Debug)]
pub struct Engine {
    slant: [Kernel; 2],
    curve: [Kernel; 4],
}

impl Engine {
    /// Builds the engine, materializing the slant and curve kernel
    /// banks. Construction is deterministic; there is no runtime
    /// configuration.
    pub fn new() -> Self {
        Self {
            slant: slant_bank(),
            curve: curve_bank(),
        }
    }

    /// Computes a single metric for a face.
    ///
    /// Every aggregated metric lies in `[0, 1]`. Serif is bounded
    /// below by 0 but has no fixed upper bound; it grows with the
    /// number of projection discontinuities found.
    pub fn metric(&self, face: &impl Face, metric: Metric) -> f64 {
        let score = match metric {
            Metric::Width => average_over_glyphs(face, width_score),
            Metric::Height => average_over_glyphs(face, height_score),
            Metric::AspectRatio => average_over_glyphs(face, aspect_ratio_score),
            Metric::XHeight => x_height_score(face),
            Metric::Density => average_over_glyphs(face, density_score),
            Metric::Slant => {
                average_over_glyphs(face, |g| convolution_score(g.edges(), &self.slant))
            }
            Metric::Curve => {
                average_over_glyphs(face, |g| convolution_score(g.edges(), &self.curve))
            }
            Metric::Serif => serif_score(face),
        };
        log::trace!("{} = {score}", metric.name());
        score
    }

    /// Computes the full metric vector for a face, in [`Metric::ALL`]
    /// order.
    pub fn compute_all(&self, face: &impl Face) -> MetricVector {
        let mut vector = MetricVector::default();
        for metric in Metric::ALL {
            vector[metric] = self.metric(face, metric);
        }
        vector
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Sums the positive convolution responses of every kernel at every
/// pixel, normalized by raster area and clamped to at most 1.0.
///
/// Negative responses are discarded per kernel, so the score cannot go
/// below zero. A degenerate raster has its area floored to 1 and
/// scores 0.0.
fn convolution_score(raster: &Raster, kernels: &[Kernel]) -> f64 {
    let mut total: i64 = 0;
    for row in 0..raster.height() {
        for col in 0..raster.width() {
            for kernel in kernels {
                let response = kernel.convolve_at(raster, col, row);
                if response > 0 {
                    total += response as i64;
                }
            }
        }
    }
    let area = (raster.width() * raster.height()).max(1);
    let score = total as f64 / area as f64;
    score.min(1.0)
}

/// Averages a per-glyph score over every printable glyph the face has.
///
/// Absent glyphs are skipped; a face with no printable glyphs at all
/// is a degenerate input and scores 0.0 (with a warning) rather than
/// producing a NaN. The average is clamped into `[0, 1]`.
fn average_over_glyphs<F>(face: &impl Face, mut per_glyph: F) -> f64
where
    F: FnMut(&RenderedGlyph) -> f64,
{
    let mut total = 0.0;
    let mut count = 0u32;
    for ch in printable_chars() {
        if let Some(glyph) = face.glyph(ch) {
            total += per_glyph(glyph);
            count += 1;
        }
    }
    if count == 0 {
        log::warn!(
            "face {:?} has no printable glyphs; scoring 0.0",
            face.family_name()
        );
        return 0.0;
    }
    (total / count as f64).clamp(0.0, 1.0)
}

fn width_score(glyph: &RenderedGlyph) -> f64 {
    glyph.plain().width() as f64 / DIM_NORM
}

fn height_score(glyph: &RenderedGlyph) -> f64 {
    glyph.plain().height() as f64 / DIM_NORM
}

/// Base score 0.5, offset by a tenth of the longer-to-shorter side
/// ratio. Zero dimensions (the space glyph) are floored to 1.
fn aspect_ratio_score(glyph: &RenderedGlyph) -> f64 {
    let width = glyph.plain().width().max(1) as f64;
    let height = glyph.plain().height().max(1) as f64;
    let ratio = if height > width {
        height / width
    } else {
        width / height
    };
    0.5 + ratio / 10.0
}

fn density_score(glyph: &RenderedGlyph) -> f64 {
    let plain = glyph.plain();
    let mut inked = 0usize;
    for row in 0..plain.height() {
        for col in 0..plain.width() {
            if plain.get(col, row) > INK_THRESHOLD {
                inked += 1;
            }
        }
    }
    let area = (plain.width() * plain.height()).max(1);
    inked as f64 / area as f64
}

/// Height of the lowercase `x` glyph alone. A face without an `x`
/// scores 0.0.
fn x_height_score(face: &impl Face) -> f64 {
    let Some(glyph) = face.glyph('x') else {
        return 0.0;
    };
    (glyph.plain().height() as f64 / DIM_NORM).min(1.0)
}

fn projection_row(raster: &Raster, row: usize) -> i64 {
    (0..raster.width()).map(|col| raster.get(col, row) as i64).sum()
}

fn projection_col(raster: &Raster, col: usize) -> i64 {
    (0..raster.height()).map(|row| raster.get(col, row) as i64).sum()
}

/// Counts sharp discontinuities in the row and column intensity
/// projections of the four reference glyphs.
///
/// A serif terminal widens a stem abruptly, so adjacent projections
/// jump by more than the threshold where one begins or ends. The
/// score is the accumulated increment over all four glyphs and both
/// walk directions, unclamped. A reference glyph with zero width or
/// height aborts the walk early, returning the partial score; that is
/// a defined shortcut, not an error.
fn serif_score(face: &impl Face) -> f64 {
    let mut score = 0.0;
    for ch in SERIF_REFERENCE {
        let Some(glyph) = face.glyph(ch) else {
            return score;
        };
        let plain = glyph.plain();
        if plain.width() == 0 || plain.height() == 0 {
            return score;
        }
        let mut prev = projection_row(plain, 0);
        for row in 1..plain.height() {
            let sum = projection_row(plain, row);
            if (sum - prev).abs() > SERIF_DIFF_THRESHOLD {
                score += SERIF_INCREMENT;
            }
            prev = sum;
        }
        let mut prev = projection_col(plain, 0);
        for col in 1..plain.width() {
            let sum = projection_col(plain, col);
            if (sum - prev).abs() > SERIF_DIFF_THRESHOLD {
                score += SERIF_INCREMENT;
            }
            prev = sum;
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{solid, TestFace};
    use crate::raster::NUM_GLYPHS;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn scorer_returns_zero_for_blank_raster() {
        let engine = Engine::new();
        let blank = Raster::new(8, 8, vec![0; 64]);
        assert_eq!(convolution_score(&blank, &engine.slant), 0.0);
        assert_eq!(convolution_score(&blank, &engine.curve), 0.0);
    }

    #[test]
    fn scorer_guards_zero_area() {
        let engine = Engine::new();
        assert_eq!(convolution_score(&Raster::empty(), &engine.slant), 0.0);
    }

    #[test]
    fn scorer_clamps_to_one() {
        let identity = [Kernel::new(1, 1, &[1])];
        let bright = Raster::new(8, 8, vec![255; 64]);
        // The raw per-area sum is 255; the scorer caps it at 1.0.
        assert_eq!(convolution_score(&bright, &identity), 1.0);
    }

    #[test]
    fn aggregator_skips_absent_glyphs() {
        // Only two printable glyphs; the average covers exactly those.
        let face = TestFace::new("Sparse", "Regular")
            .with_plain_glyph('A', solid(10, 10, 255))
            .with_plain_glyph('B', solid(30, 30, 255));
        let score = average_over_glyphs(&face, width_score);
        assert_close(score, (0.1 + 0.3) / 2.0);
    }

    #[test]
    fn aggregator_defines_the_empty_face() {
        let face = TestFace::new("Empty", "Regular");
        assert_eq!(average_over_glyphs(&face, width_score), 0.0);
    }

    #[test]
    fn aggregator_clamps_oversized_scores() {
        let face = TestFace::new("Huge", "Regular").with_plain_glyph('A', solid(250, 250, 255));
        // Per-glyph width score is 2.5; the aggregate clamps to 1.0.
        assert_eq!(average_over_glyphs(&face, width_score), 1.0);
    }

    #[test]
    fn solid_square_face_dimensions_and_density() {
        // Every printable code point maps to a fully black 10x10 square.
        let face = TestFace::solid_square_face(10);
        let engine = Engine::new();
        assert_close(engine.metric(&face, Metric::Width), 0.1);
        assert_close(engine.metric(&face, Metric::Height), 0.1);
        assert_close(engine.metric(&face, Metric::Density), 1.0);
        // Square glyphs: ratio 1.0, so 0.5 + 0.1.
        assert_close(engine.metric(&face, Metric::AspectRatio), 0.6);
    }

    #[test]
    fn aspect_ratio_floors_zero_dimensions() {
        let face = TestFace::new("Spacey", "Regular").with_plain_glyph(' ', Raster::empty());
        // 0x0 floors to 1x1: ratio 1.0.
        assert_close(average_over_glyphs(&face, aspect_ratio_score), 0.6);
    }

    #[test]
    fn aspect_ratio_rewards_elongation() {
        let face = TestFace::new("Narrow", "Regular").with_plain_glyph('l', solid(10, 40, 255));
        assert_close(average_over_glyphs(&face, aspect_ratio_score), 0.9);
    }

    #[test]
    fn x_height_reads_only_the_x_glyph() {
        let face = TestFace::new("XTest", "Regular")
            .with_plain_glyph('x', solid(30, 50, 255))
            .with_plain_glyph('X', solid(30, 90, 255));
        let engine = Engine::new();
        assert_close(engine.metric(&face, Metric::XHeight), 0.5);
    }

    #[test]
    fn x_height_of_a_face_without_x_is_zero() {
        let face = TestFace::solid_square_face(10).without_glyph('x');
        let engine = Engine::new();
        assert_eq!(engine.metric(&face, Metric::XHeight), 0.0);
    }

    #[test]
    fn density_counts_only_ink_above_threshold() {
        let mut pixels = vec![0u8; 100];
        for px in pixels.iter_mut().take(25) {
            *px = 200;
        }
        // 25 bright pixels, 75 at zero; threshold excludes the zeros.
        let face = TestFace::new("Half", "Regular")
            .with_plain_glyph('A', Raster::new(10, 10, pixels));
        assert_close(average_over_glyphs(&face, density_score), 0.25);
    }

    #[test]
    fn slant_ignores_blank_edges_and_sees_diagonals() {
        let engine = Engine::new();
        let blank = TestFace::new("Blank", "Regular").with_glyph(
            'A',
            RenderedGlyph::from_parts(solid(5, 5, 0), solid(5, 5, 0)),
        );
        assert_eq!(engine.metric(&blank, Metric::Slant), 0.0);

        // An edge raster holding the exact anti-diagonal the base
        // kernel matches.
        let mut pixels = vec![0u8; 25];
        for i in 0..5 {
            pixels[i * 5 + (4 - i)] = 255;
        }
        let diagonal = TestFace::new("Oblique", "Regular").with_glyph(
            'A',
            RenderedGlyph::from_parts(solid(5, 5, 0), Raster::new(5, 5, pixels)),
        );
        assert!(engine.metric(&diagonal, Metric::Slant) > 0.0);
    }

    #[test]
    fn curve_responds_to_arcs_in_the_edge_raster() {
        let engine = Engine::new();
        // Trace a rough quarter arc matching the top-left kernel's
        // positive weights.
        let mut pixels = vec![0u8; 25];
        for (col, row) in [(3, 0), (4, 0), (3, 1), (4, 1), (2, 2), (1, 3), (1, 4)] {
            pixels[row * 5 + col] = 255;
        }
        let face = TestFace::new("Round", "Regular").with_glyph(
            'o',
            RenderedGlyph::from_parts(solid(5, 5, 0), Raster::new(5, 5, pixels)),
        );
        assert!(engine.metric(&face, Metric::Curve) > 0.0);
    }

    // A 2x3 bitmap whose bottom row is blank. Row sums are 510, 510, 0:
    // one row discontinuity and no column discontinuities.
    fn notched() -> Raster {
        Raster::new(2, 3, vec![255, 255, 255, 255, 0, 0])
    }

    #[test]
    fn serif_counts_projection_discontinuities() {
        let mut face = TestFace::new("Slab", "Regular");
        for ch in SERIF_REFERENCE {
            face = face.with_plain_glyph(ch, notched());
        }
        let engine = Engine::new();
        assert_close(engine.metric(&face, Metric::Serif), 0.004);
    }

    #[test]
    fn serif_aborts_early_on_empty_reference_glyph() {
        // I and E contribute, H is degenerate, L is never reached.
        let face = TestFace::new("Partial", "Regular")
            .with_plain_glyph('I', notched())
            .with_plain_glyph('E', notched())
            .with_plain_glyph('H', Raster::empty())
            .with_plain_glyph('L', notched());
        let engine = Engine::new();
        assert_close(engine.metric(&face, Metric::Serif), 0.002);
    }

    #[test]
    fn serif_on_all_empty_references_is_zero() {
        let mut face = TestFace::new("Void", "Regular");
        for ch in SERIF_REFERENCE {
            face = face.with_plain_glyph(ch, Raster::empty());
        }
        let engine = Engine::new();
        assert_eq!(engine.metric(&face, Metric::Serif), 0.0);
    }

    #[test]
    fn serif_is_monotone_in_discontinuity_count() {
        let one_notch = {
            let mut face = TestFace::new("One", "Regular");
            for ch in SERIF_REFERENCE {
                face = face.with_plain_glyph(ch, notched());
            }
            face
        };
        // Alternating rows double the row discontinuities per glyph.
        let two_notches = {
            let mut face = TestFace::new("Two", "Regular");
            for ch in SERIF_REFERENCE {
                face = face.with_plain_glyph(
                    ch,
                    Raster::new(2, 4, vec![255, 255, 0, 0, 255, 255, 0, 0]),
                );
            }
            face
        };
        let engine = Engine::new();
        assert!(
            engine.metric(&two_notches, Metric::Serif) > engine.metric(&one_notch, Metric::Serif)
        );
    }

    #[test]
    fn compute_all_fills_every_slot_in_range() {
        let face = TestFace::solid_square_face(10);
        let engine = Engine::new();
        let vector = engine.compute_all(&face);
        for (metric, value) in vector.iter() {
            assert!(value >= 0.0, "{metric:?} went negative: {value}");
            if metric != Metric::Serif {
                assert!(value <= 1.0, "{metric:?} exceeded 1.0: {value}");
            }
        }
        assert_eq!(vector[Metric::Density], 1.0);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        let engine = std::sync::Arc::new(Engine::new());
        let face = TestFace::solid_square_face(4);
        let expected = engine.compute_all(&face);
        let handle = {
            let engine = engine.clone();
            std::thread::spawn(move || {
                let face = TestFace::solid_square_face(4);
                engine.compute_all(&face)
            })
        };
        assert_eq!(handle.join().unwrap(), expected);
    }

    #[test]
    fn solid_face_covers_the_whole_printable_range() {
        let face = TestFace::solid_square_face(10);
        assert_eq!(printable_chars().filter(|c| face.glyph(*c).is_some()).count(), NUM_GLYPHS);
    }
}
