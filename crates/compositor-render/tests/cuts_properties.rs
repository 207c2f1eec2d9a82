//! Property tests for the cut computer and renderer against randomly
//! generated non-overlapping row layouts (spec §8, invariants 2 and 4).

use std::rc::Rc;

use compositor_geometry::{Offset, Region, Size};
use compositor_model::{Layout, Line, Lines, Order, Placement, Segment, Style, Widget, WidgetHandle, WidgetId};
use compositor_render::Compositor;
use proptest::prelude::*;

struct Block {
    id: WidgetId,
    width: u16,
    ch: char,
}

impl Widget for Block {
    fn id(&self) -> WidgetId {
        self.id
    }
    fn size(&self) -> Size {
        Size::new(self.width, 1)
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
        None
    }
    fn resolve_style_offset(&self, _container: Size, _clip: Size) -> Option<Offset> {
        None
    }
    fn get_lines(&self) -> Lines {
        let line: Line = vec![Segment::new(
            self.ch.to_string().repeat(self.width as usize),
            Style::null(),
        )];
        vec![line]
    }
    fn clear_render_cache(&self) {}
}

struct Row {
    id: WidgetId,
    size: Size,
    children: Vec<(WidgetHandle, Region, i32)>,
}

impl Widget for Row {
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

impl Layout for Row {
    fn arrange(
        &self,
        _widget: &dyn Widget,
        _size: Size,
        _scroll: Offset,
    ) -> (Vec<Placement>, Vec<WidgetHandle>) {
        let placements = self
            .children
            .iter()
            .map(|(w, r, z)| Placement::new(*r, w.clone(), *z))
            .collect();
        let widgets = self.children.iter().map(|(w, _, _)| w.clone()).collect();
        (placements, widgets)
    }
}

/// Build a row of abutting blocks with the given widths, filling exactly
/// `widths.iter().sum()` columns on a single-row screen.
fn build_row(widths: &[u16]) -> (WidgetHandle, u16) {
    let mut x = 0i32;
    let mut children = Vec::new();
    for (i, &w) in widths.iter().enumerate() {
        let ch = (b'a' + (i % 26) as u8) as char;
        let block = WidgetHandle::new(Rc::new(Block {
            id: (i + 1) as WidgetId,
            width: w,
            ch,
        }));
        children.push((block, Region::new(x, 0, w, 1), i as i32));
        x += w as i32;
    }
    let total = x as u16;
    let root = WidgetHandle::new(Rc::new(Row {
        id: 0,
        size: Size::new(total, 1),
        children,
    }));
    (root, total)
}

proptest! {
    #[test]
    fn cuts_row_is_strictly_increasing_and_bounds_to_width(
        widths in proptest::collection::vec(1u16..8, 1..10)
    ) {
        let (root, total_width) = build_row(&widths);
        let mut compositor = Compositor::new();
        compositor.reflow(root, Size::new(total_width, 1));
        let cuts = compositor.cuts();
        prop_assert_eq!(cuts.len(), 1);
        let row = &cuts[0];
        prop_assert_eq!(row.first().copied(), Some(0));
        prop_assert_eq!(row.last().copied(), Some(total_width as i32));
        prop_assert!(row.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn render_reproduces_every_block_in_order(
        widths in proptest::collection::vec(1u16..8, 1..10)
    ) {
        let (root, total_width) = build_row(&widths);
        let mut compositor = Compositor::new();
        compositor.reflow(root, Size::new(total_width, 1));
        let rendered = compositor.render(None);
        prop_assert_eq!(rendered.len(), 1);

        let expected: String = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let ch = (b'a' + (i % 26) as u8) as char;
                ch.to_string().repeat(w as usize)
            })
            .collect();
        let actual: String = rendered[0].iter().map(|s| s.text()).collect();
        prop_assert_eq!(actual, expected);
    }
}
