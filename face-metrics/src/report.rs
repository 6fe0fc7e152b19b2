//! CSV reporting for computed metric vectors.
//!
//! The format is line-oriented and comma-terminated: every field,
//! including the last, is followed by a comma before the newline. The
//! trailing comma is part of the contract consumers parse against, not
//! an omission.

use std::io::{self, Write};

use crate::metric::{Metric, MetricVector};
use crate::raster::Face;

/// Writes the CSV header row: family and style columns followed by one
/// column per metric, using display names.
pub fn write_header<W: Write>(w: &mut W) -> io::Result<()> {
    write!(w, "Family Name,Style Name,")?;
    for metric in Metric::ALL {
        write!(w, "{},", metric.display_name())?;
    }
    writeln!(w)
}

/// Writes one CSV row for a face and its computed metric vector.
pub fn write_row<W: Write>(w: &mut W, face: &impl Face, vector: &MetricVector) -> io::Result<()> {
    write!(w, "{},{},", face.family_name(), face.style_name())?;
    for (_, value) in vector.iter() {
        write!(w, "{value:.6},")?;
    }
    writeln!(w)
}
