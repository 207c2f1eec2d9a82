//! The positioned output of a partial update (spec §4.5, §6 "Patch format").

use compositor_geometry::Region;
use compositor_model::Lines;

/// A rectangle of freshly rendered lines, positioned absolutely. The
/// terminal driver applies it by moving the cursor to
/// `(region.x, region.y + i)` and printing line `i`'s segments, for each
/// line in order, with no trailing newline after the last one.
#[derive(Debug, Clone)]
pub struct Patch {
    pub lines: Lines,
    pub region: Region,
}

impl Patch {
    pub fn new(lines: Lines, region: Region) -> Self {
        Self { lines, region }
    }
}
