//! Recursive tree walk producing the region map and widget set (spec §4.1).

use std::collections::HashMap;
use std::collections::HashSet;

use compositor_geometry::{Offset, Region, Size};
use compositor_model::{Order, Widget, WidgetHandle};

/// Everything the compositor remembers about one arranged widget.
#[derive(Clone)]
pub struct RenderEntry {
    pub widget: WidgetHandle,
    /// Absolute screen rectangle, including any style-driven offset.
    pub region: Region,
    /// Lexicographic z-order key; root is the empty tuple.
    pub order: Order,
    /// Intersection of all ancestor clips; the widget is never drawn
    /// outside this rectangle.
    pub clip: Region,
    /// Union of `region` with every descendant's region, in local space.
    pub virtual_size: Size,
}

pub type RenderRegionMap = HashMap<WidgetHandle, RenderEntry>;

/// Arrange `root` and its descendants, filling out an absolute region for
/// every widget reachable through `Widget::layout`.
///
/// Returns the region map plus the full set of considered widgets, which
/// may be a superset of the map's keys: a layout can report a widget it
/// chose not to place, and that widget is still tracked so a later reflow
/// can see it reappear.
pub fn arrange_root(root: &WidgetHandle) -> (RenderRegionMap, HashSet<WidgetHandle>) {
    let mut map = RenderRegionMap::new();
    let mut widgets = HashSet::new();
    let size = root.size();
    let screen = size.region();
    add_widget(root, screen, Order::new(), screen, &mut map, &mut widgets);
    (map, widgets)
}

fn add_widget(
    widget: &WidgetHandle,
    region: Region,
    order: Order,
    clip: Region,
    map: &mut RenderRegionMap,
    widgets: &mut HashSet<WidgetHandle>,
) {
    widgets.insert(widget.clone());

    let layout_offset = widget
        .resolve_style_offset(region.size(), clip.size())
        .unwrap_or(Offset::ZERO);

    let mut total_region = region.size().region();

    if let Some(layout) = widget.layout() {
        let scroll = widget.scroll();
        let sub_clip = clip.intersection(&region);

        let (mut placements, arranged_widgets) =
            layout.arrange(&**widget, region.size(), scroll);
        widgets.extend(arranged_widgets);
        placements.sort_by_key(|p| p.z);

        for placement in placements {
            total_region = total_region.union(&placement.region);
            let mut child_order = order.clone();
            child_order.push(placement.z);
            let absolute = placement.region + (region.origin() - scroll);
            add_widget(
                &placement.widget,
                absolute,
                child_order,
                sub_clip,
                map,
                widgets,
            );
        }
    }

    map.insert(
        widget.clone(),
        RenderEntry {
            widget: widget.clone(),
            region: region + layout_offset,
            order,
            clip,
            virtual_size: total_region.size(),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use compositor_model::{Layout, Lines, Placement, Widget, WidgetId};
    use std::rc::Rc;

    /// A leaf that reports a non-trivial `z()` for its container to consult.
    struct Leaf {
        id: WidgetId,
        size: Size,
        z: Order,
    }

    impl Widget for Leaf {
        fn id(&self) -> WidgetId {
            self.id
        }
        fn size(&self) -> Size {
            self.size
        }
        fn z(&self) -> Order {
            self.z.clone()
        }
        fn visible(&self) -> bool {
            true
        }
        fn is_transparent(&self) -> bool {
            false
        }
        fn scroll(&self) -> Offset {
            Offset::ZERO
        }
        fn layout(&self) -> Option<&dyn Layout> {
            None
        }
        fn resolve_style_offset(&self, _container: Size, _clip: Size) -> Option<Offset> {
            None
        }
        fn get_lines(&self) -> Lines {
            vec![vec![]; self.size.height as usize]
        }
        fn clear_render_cache(&self) {}
    }

    /// A container whose `arrange` derives each child's `Placement::z` from
    /// the child's own `Widget::z()` rather than hardcoding one, the way a
    /// real stacking layout (children declare their own depth) would.
    struct ZConsultingStack {
        id: WidgetId,
        size: Size,
        children: Vec<WidgetHandle>,
    }

    impl Widget for ZConsultingStack {
        fn id(&self) -> WidgetId {
            self.id
        }
        fn size(&self) -> Size {
            self.size
        }
        fn z(&self) -> Order {
            Order::new()
        }
        fn visible(&self) -> bool {
            true
        }
        fn is_transparent(&self) -> bool {
            false
        }
        fn scroll(&self) -> Offset {
            Offset::ZERO
        }
        fn layout(&self) -> Option<&dyn Layout> {
            Some(self)
        }
        fn resolve_style_offset(&self, _container: Size, _clip: Size) -> Option<Offset> {
            None
        }
        fn get_lines(&self) -> Lines {
            vec![vec![]; self.size.height as usize]
        }
        fn clear_render_cache(&self) {}
    }

    impl Layout for ZConsultingStack {
        fn arrange(
            &self,
            _widget: &dyn Widget,
            _size: Size,
            _scroll: Offset,
        ) -> (Vec<Placement>, Vec<WidgetHandle>) {
            let placements = self
                .children
                .iter()
                .enumerate()
                .map(|(i, child)| {
                    let z = child.z().first().copied().unwrap_or(0);
                    Placement::new(Region::new(i as i32, 0, 1, 1), child.clone(), z)
                })
                .collect();
            (placements, self.children.clone())
        }
    }

    #[test]
    fn layout_consults_child_z_when_building_placements() {
        let back = WidgetHandle::new(Rc::new(Leaf {
            id: 1,
            size: Size::new(1, 1),
            z: Order::from_slice(&[0]),
        }));
        let front = WidgetHandle::new(Rc::new(Leaf {
            id: 2,
            size: Size::new(1, 1),
            z: Order::from_slice(&[5]),
        }));
        let root = WidgetHandle::new(Rc::new(ZConsultingStack {
            id: 0,
            size: Size::new(2, 1),
            children: vec![back.clone(), front.clone()],
        }));

        let (map, _widgets) = arrange_root(&root);

        assert_eq!(map[&back].order, Order::from_slice(&[0]));
        assert_eq!(map[&front].order, Order::from_slice(&[5]));
    }
}
