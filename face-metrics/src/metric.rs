//! Metric identifiers and the per-face metric vector.

use std::fmt;
use std::ops::{Index, IndexMut};

/// Identifies one shape metric.
///
/// The set is closed and the order of [`Metric::ALL`] is the order
/// metrics appear in vectors and CSV columns.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Metric {
    /// Average glyph width.
    Width,
    /// Average glyph height.
    Height,
    /// Average ratio of the longer glyph side to the shorter.
    AspectRatio,
    /// Height of the lowercase `x` glyph.
    XHeight,
    /// Average fraction of inked pixels per glyph.
    Density,
    /// Oriented-stroke match against the diagonal kernel pair.
    Slant,
    /// Oriented-arc match against the four corner kernels.
    Curve,
    /// Row/column intensity-discontinuity count over reference glyphs.
    Serif,
}

impl Metric {
    /// Every metric, in vector and report order.
    pub const ALL: [Metric; 8] = [
        Metric::Width,
        Metric::Height,
        Metric::AspectRatio,
        Metric::XHeight,
        Metric::Density,
        Metric::Slant,
        Metric::Curve,
        Metric::Serif,
    ];

    /// Number of metrics.
    pub const COUNT: usize = Self::ALL.len();

    /// The stable lookup name, used for configuration-driven metric
    /// selection.
    ///
    /// Note that two of these differ from the display names:
    /// `AspectRatio` vs `Aspect Ratio` and `xHeight` vs `x-height`.
    /// Both spellings are load-bearing; [`Metric::from_name`] only
    /// accepts the lookup form.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Width => "Width",
            Metric::Height => "Height",
            Metric::AspectRatio => "AspectRatio",
            Metric::XHeight => "xHeight",
            Metric::Density => "Density",
            Metric::Slant => "Slant",
            Metric::Curve => "Curve",
            Metric::Serif => "Serif",
        }
    }

    /// The human-readable name used in CSV column headers.
    pub fn display_name(self) -> &'static str {
        match self {
            Metric::Width => "Width",
            Metric::Height => "Height",
            Metric::AspectRatio => "Aspect Ratio",
            Metric::XHeight => "x-height",
            Metric::Density => "Density",
            Metric::Slant => "Slant",
            Metric::Curve => "Curve",
            Metric::Serif => "Serif",
        }
    }

    /// Parses a lookup name, returning `None` for anything
    /// unrecognized.
    pub fn from_name(name: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.name() == name)
    }

    fn index(self) -> usize {
        Metric::ALL
            .iter()
            .position(|m| *m == self)
            .expect("metric is in ALL")
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A fixed-size vector of metric values, one slot per [`Metric`].
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct MetricVector([f64; Metric::COUNT]);

impl MetricVector {
    /// Iterates metrics and their values in [`Metric::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().map(|m| (m, self[m]))
    }

    /// The values in [`Metric::ALL`] order.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Index<Metric> for MetricVector {
    type Output = f64;

    fn index(&self, metric: Metric) -> &f64 {
        &self.0[metric.index()]
    }
}

impl IndexMut<Metric> for MetricVector {
    fn index_mut(&mut self, metric: Metric) -> &mut f64 {
        &mut self.0[metric.index()]
    }
}
