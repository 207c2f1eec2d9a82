//! Per-scanline vertical cut columns (spec §4.3).

use compositor_geometry::Size;

use crate::arrange::RenderRegionMap;

/// Build the cut list: for each screen row, the sorted, deduplicated set of
/// columns at which some widget's clipped region begins or ends. Every row
/// always contains `0` and `width`, so a run covering the whole row needs no
/// division.
pub fn compute_cuts(size: Size, map: &RenderRegionMap) -> Vec<Vec<i32>> {
    let width = size.width as i32;
    let height = size.height as usize;
    let screen_region = size.region();

    let mut cuts: Vec<Vec<i32>> = vec![vec![0, width]; height];

    for entry in map.values() {
        let clipped = entry.region.intersection(&entry.clip);
        if clipped.is_empty() || !screen_region.contains_region(&clipped) {
            continue;
        }
        let (x1, x2) = clipped.x_extents();
        for y in clipped.y_range() {
            if let Some(row) = cuts.get_mut(y as usize) {
                row.push(x1);
                row.push(x2);
            }
        }
    }

    for row in &mut cuts {
        row.sort_unstable();
        row.dedup();
    }
    cuts
}
