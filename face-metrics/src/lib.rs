//! Shape metrics for typeface classification.
//!
//! This crate rasterizes nothing itself. Given a [`Face`] (a loaded
//! typeface that can produce a grayscale and an edge raster for each
//! printable ASCII glyph), an [`Engine`] computes a vector of
//! normalized shape metrics: width, height, aspect ratio, x-height,
//! density, slant, curvature and serif presence. The vector is suited
//! to font classification, clustering or similarity search; the
//! individual values are coarse heuristics, not OCR-grade classifiers.
//!
//! ```no_run
//! use face_metrics::{Engine, Face, Metric};
//!
//! fn report(face: &impl Face) {
//!     let engine = Engine::new();
//!     let vector = engine.compute_all(face);
//!     for (metric, value) in vector.iter() {
//!         println!("{metric}: {value:.6}");
//!     }
//!     assert!(engine.metric(face, Metric::Density) <= 1.0);
//! }
//! ```
//!
//! Aggregated metrics are clamped into `[0, 1]`; the serif score is a
//! raw discontinuity count with no fixed upper bound. An `Engine` is
//! immutable after construction, so one instance can serve any number
//! of faces and threads (wrap it in `Arc` to share ownership).

mod engine;
mod error;
mod kernel;
mod metric;
mod raster;
mod report;

#[cfg(test)]
pub(crate) mod fixtures;

pub use engine::Engine;
pub use error::FaceError;
pub use kernel::Kernel;
pub use metric::{Metric, MetricVector};
pub use raster::{
    printable_chars, Face, Raster, RenderedGlyph, FIRST_GLYPH, LAST_GLYPH, NUM_GLYPHS,
};
pub use report::{write_header, write_row};
