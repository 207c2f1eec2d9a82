//! The compositor: arrangement, cut computation, rendering, hit-testing,
//! and reflow diffing.
//!
//! This is the core described by the system's own documentation as its
//! hardest engineering: depth-ordered region management, a per-scanline cut
//! list, a front-to-back occlusion fill that paints each cell exactly once,
//! and a partial-update path that reuses the cut geometry to repaint a
//! single widget's rectangle. The widget tree, concrete layouts, terminal
//! I/O, input, and style resolution are all external collaborators reached
//! only through `compositor_model::{Widget, Layout}`.
//!
//! Single-threaded and synchronous: no operation here suspends, and nothing
//! enforces that `reflow` doesn't race `render`/`update_widget`/hit-testing
//! — a surrounding event loop is responsible for serializing those calls
//! (see the crate-level docs in `compositor-demo` for the expected pattern).

mod arrange;
mod cuts;
mod error;
mod patch;
mod render_engine;

use std::collections::{HashMap, HashSet};

use compositor_geometry::{Region, Size};
use compositor_model::{WidgetHandle, divide, line_cell_length};

pub use arrange::RenderEntry;
pub use error::CompositorError;
pub use patch::Patch;

/// The result of a [`Compositor::reflow`]: which widgets newly appeared,
/// newly disappeared, or kept the same identity but changed size.
#[derive(Debug, Clone, Default)]
pub struct ReflowResult {
    pub hidden: HashSet<WidgetHandle>,
    pub shown: HashSet<WidgetHandle>,
    pub resized: HashSet<WidgetHandle>,
}

/// Owns the current arrangement of a widget tree and renders it.
pub struct Compositor {
    root: Option<WidgetHandle>,
    size: Size,
    map: arrange::RenderRegionMap,
    /// Projection of `map` used by `update_widget`: widget -> (region, clip).
    regions: HashMap<WidgetHandle, (Region, Region)>,
    /// Every widget considered by the last arrangement, a superset of
    /// `map`'s keys (invisible widgets are still tracked here).
    widgets: HashSet<WidgetHandle>,
    cuts: Option<Vec<Vec<i32>>>,
    require_update: bool,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    pub fn new() -> Self {
        Self {
            root: None,
            size: Size::default(),
            map: HashMap::new(),
            regions: HashMap::new(),
            widgets: HashSet::new(),
            cuts: None,
            require_update: true,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn check_update(&self) -> bool {
        self.require_update
    }

    /// Mark the arrangement stale. Only sets the flag and invalidates the
    /// cut cache — unlike the system this was distilled from, it does not
    /// clear `map`/`widgets`, because the next `reflow`'s shown/hidden diff
    /// needs the previous arrangement intact to compare against.
    pub fn require_update(&mut self) {
        self.require_update = true;
        self.reset();
    }

    pub fn reset_update(&mut self) {
        self.require_update = false;
    }

    fn reset(&mut self) {
        self.cuts = None;
    }

    /// Recompute the arrangement for `root` filling `size`, and report which
    /// widgets became shown, hidden, or resized relative to the previous
    /// arrangement.
    pub fn reflow(&mut self, root: WidgetHandle, size: Size) -> ReflowResult {
        self.reset();
        self.size = size;

        let (map, widgets) = arrange::arrange_root(&root);
        self.root = Some(root);
        self.require_update = false;

        let old_widgets: HashSet<WidgetHandle> = self.map.keys().cloned().collect();
        let new_widgets: HashSet<WidgetHandle> = map.keys().cloned().collect();

        let shown: HashSet<WidgetHandle> = new_widgets.difference(&old_widgets).cloned().collect();
        let hidden: HashSet<WidgetHandle> =
            old_widgets.difference(&new_widgets).cloned().collect();
        let resized: HashSet<WidgetHandle> = new_widgets
            .intersection(&old_widgets)
            .filter(|w| {
                let new_region = map[*w].region;
                w.size() != new_region.size()
            })
            .cloned()
            .collect();

        self.regions = map
            .iter()
            .map(|(w, entry)| (w.clone(), (entry.region, entry.clip)))
            .collect();
        self.map = map;
        self.widgets = widgets;

        ReflowResult {
            hidden,
            shown,
            resized,
        }
    }

    /// Vertical cut columns per screen row, computed lazily and memoized
    /// until the next `reset` (triggered by `reflow` or `require_update`).
    pub fn cuts(&mut self) -> &[Vec<i32>] {
        if self.cuts.is_none() {
            self.cuts = Some(cuts::compute_cuts(self.size, &self.map));
        }
        self.cuts.as_deref().unwrap()
    }
}

fn width_view(line: compositor_model::Line, crop_x: i32, crop_x2: i32) -> compositor_model::Line {
    if line_cell_length(&line) == 0 {
        return line;
    }
    let mut groups = divide(&line, &[crop_x as u16, crop_x2 as u16]);
    groups.swap_remove(1)
}
