//! Full and partial rendering (spec §4.4, §4.5): the front-to-back
//! occlusion fill and the patch path that reuses its cut geometry.

use std::collections::BTreeMap;

use compositor_geometry::Region;
use compositor_model::{Line, Lines, WidgetHandle, divide};
use tracing::{debug, trace};

use crate::{Compositor, Patch, width_view};

impl Compositor {
    /// Render the (optionally cropped) screen to a row-major list of lines.
    ///
    /// Four phases: bucket every row at its cut columns, fill front-to-back
    /// with first-writer-wins occlusion, assemble each row's buckets in
    /// column order, then crop horizontally if `crop` is narrower than the
    /// screen.
    pub fn render(&mut self, crop: Option<Region>) -> Lines {
        let width = self.size.width as i32;
        let screen_region = self.size.region();
        let crop_region = match crop {
            Some(c) => c.intersection(&screen_region),
            None => screen_region,
        };

        let cuts = self.cuts().to_vec();

        let mut chops: Vec<BTreeMap<i32, Option<Line>>> = cuts
            .iter()
            .map(|row| row.iter().map(|&c| (c, None)).collect())
            .collect();

        for (region, clip, lines) in self.get_renders() {
            let render_region = region.intersection(&clip);
            if render_region.is_empty() {
                continue;
            }
            // Indexed, not zipped: a widget that emits fewer lines than its
            // region's height is a programming error (§7) and must panic
            // here rather than have the row silently go missing from output.
            for row in 0..render_region.height as usize {
                let y = render_region.y + row as i32;
                let line = &lines[row];
                let (first_cut, last_cut) = render_region.x_extents();
                let row_cuts = &cuts[y as usize];
                let final_cuts: Vec<i32> = row_cuts
                    .iter()
                    .copied()
                    .filter(|&c| c >= first_cut && c <= last_cut)
                    .collect();

                let render_x = render_region.x;
                let interior: Vec<u16> = final_cuts[1..final_cuts.len() - 1]
                    .iter()
                    .map(|&c| (c - render_x) as u16)
                    .collect();
                let cut_segments = divide(line, &interior);

                let chops_line = &mut chops[y as usize];
                for (&cut, segments) in final_cuts[..final_cuts.len() - 1]
                    .iter()
                    .zip(cut_segments)
                {
                    let slot = chops_line.entry(cut).or_insert(None);
                    if slot.is_none() {
                        *slot = Some(segments);
                    }
                }
            }
        }

        let y0 = crop_region.y as usize;
        let y1 = y0 + crop_region.height as usize;
        let mut render_lines: Lines = chops[y0..y1]
            .iter()
            .map(|bucket| {
                bucket
                    .values()
                    .filter_map(|slot| slot.clone())
                    .flatten()
                    .collect::<Line>()
            })
            .collect();

        let (crop_x, crop_x2) = crop_region.x_extents();
        if (crop_x, crop_x2) != (0, width) {
            render_lines = render_lines
                .into_iter()
                .map(|line| width_view(line, crop_x, crop_x2))
                .collect();
        }

        trace!(
            target: "compositor.render",
            rows = render_lines.len(),
            cropped = crop.is_some(),
            "render_complete"
        );
        render_lines
    }

    /// Visible, non-transparent widgets' lines, already cropped to their
    /// clip rectangle, in front-to-back (descending order) iteration order.
    fn get_renders(&self) -> Vec<(Region, Region, Lines)> {
        let mut entries: Vec<&crate::RenderEntry> = self
            .map
            .values()
            .filter(|entry| entry.widget.visible())
            .collect();
        entries.sort_by(|a, b| b.order.cmp(&a.order));

        let mut out = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.widget.is_transparent() {
                continue;
            }
            let region = entry.region;
            let clip = entry.clip;
            if clip.contains_region(&region) {
                out.push((region, clip, entry.widget.get_lines()));
            } else if clip.overlaps(&region) {
                let lines = entry.widget.get_lines();
                let new_region = region.intersection(&clip);
                let delta_x = (new_region.x - region.x) as u16;
                let delta_y = (new_region.y - region.y) as usize;
                let splits = [delta_x, delta_x + new_region.width];
                let cropped: Lines = lines
                    .into_iter()
                    .skip(delta_y)
                    .take(new_region.height as usize)
                    .map(|line| divide(&line, &splits).swap_remove(1))
                    .collect();
                out.push((region, clip, cropped));
            }
        }
        out
    }

    /// Re-render just `widget`'s clipped rectangle, reusing the memoized
    /// cut geometry. The patch covers the widget's clipped region, not just
    /// its own output — any frontmost overlapping widget still wins, so the
    /// patch stays consistent with a full render.
    pub fn update_widget(&mut self, widget: &WidgetHandle) -> Option<Patch> {
        let (region, clip) = *self.regions.get(widget)?;
        let update_region = region.intersection(&clip);
        if update_region.is_empty() {
            return None;
        }
        widget.clear_render_cache();
        let lines = self.render(Some(update_region));
        debug!(
            target: "compositor.render",
            widget = widget.id(),
            x = update_region.x,
            y = update_region.y,
            width = update_region.width,
            height = update_region.height,
            "update_widget"
        );
        Some(Patch::new(lines, update_region))
    }
}
