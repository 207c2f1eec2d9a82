//! The widget capability surface the compositor consumes (§6).
//!
//! The compositor never owns or constructs widgets; it only calls back into
//! them through [`Widget`] and, for container widgets, [`Layout`]. The
//! concrete widget hierarchy (and any layout algorithms — dock, grid,
//! vertical stacking) live entirely outside this crate family — out of
//! scope per spec §1.
//!
//! Widget identity must support equality and hashing for use as map/set
//! keys; a widget only needs to hand out a stable opaque [`WidgetId`], not
//! implement `Eq`/`Hash` itself (most widget trees are trait objects behind
//! `Rc`, which can't derive those without pointer-identity games — see
//! [`WidgetHandle`]).

use compositor_geometry::{Offset, Size};
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;

use crate::Lines;

/// Stable opaque identity for a widget. Assigned by the widget tree at
/// construction time (a counter, an arena index, a pointer cast — the
/// compositor doesn't care which, only that it is stable for the widget's
/// lifetime and unique within one tree).
pub type WidgetId = u64;

/// A z-order key. Lexicographic comparison on a variable-length integer
/// tuple supports arbitrary nesting depth; `SmallVec` keeps shallow trees
/// (the overwhelming majority) allocation-free. The root widget's order is
/// the empty tuple; each descent into a child appends one component.
pub type Order = SmallVec<[i32; 4]>;

/// The capability surface a widget must expose for the compositor to
/// arrange and render it.
pub trait Widget {
    /// Stable identity, used as the compositor's map/set key.
    fn id(&self) -> WidgetId;

    /// The widget's currently reported size.
    fn size(&self) -> Size;

    /// Base z-order prefix this widget contributes to its own order tuple
    /// and (via layout placement) to its children's.
    fn z(&self) -> Order;

    /// Whether to include this widget in rendering. Invisible widgets are
    /// still arranged (tracked in `widgets`) so show/hide reflow diffing
    /// can see them reappear.
    fn visible(&self) -> bool;

    /// Transparent widgets are skipped by the renderer's front-to-back fill
    /// (whatever is behind them shows through) but are still arranged and
    /// still participate in cut computation and hit-testing.
    fn is_transparent(&self) -> bool;

    /// Offset subtracted from children's absolute positions (scroll).
    fn scroll(&self) -> Offset;

    /// Sub-layout capability, if this widget arranges children.
    fn layout(&self) -> Option<&dyn Layout>;

    /// Resolve a style-driven relative displacement for this widget, given
    /// its own region size and its clip size. Returns `None` when the
    /// widget has no such offset configured.
    fn resolve_style_offset(&self, container: Size, clip: Size) -> Option<Offset>;

    /// Produce exactly `size().height` lines, each totalling `size().width`
    /// cells. A widget emitting fewer lines than its size requires is a
    /// programming error the compositor does not attempt to paper over
    /// (§7): the renderer indexes into the returned `Lines` by row rather
    /// than zipping against it, so a short `Lines` panics with an
    /// index-out-of-bounds error instead of silently dropping rows.
    fn get_lines(&self) -> Lines;

    /// Invalidate any cached `get_lines` output. Called by
    /// `update_widget` before re-rendering so a widget that memoizes its
    /// lines picks up content changes.
    fn clear_render_cache(&self);
}

impl fmt::Debug for dyn Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget").field("id", &self.id()).finish()
    }
}

/// A reference-counted, hashable handle to a widget. `Eq`/`Hash`/`PartialEq`
/// delegate to [`Widget::id`] rather than structural or pointer equality —
/// two handles are the same widget iff they report the same id.
#[derive(Clone)]
pub struct WidgetHandle(pub Rc<dyn Widget>);

impl WidgetHandle {
    pub fn new(widget: Rc<dyn Widget>) -> Self {
        Self(widget)
    }
}

impl Deref for WidgetHandle {
    type Target = dyn Widget;
    fn deref(&self) -> &dyn Widget {
        &*self.0
    }
}

impl PartialEq for WidgetHandle {
    fn eq(&self, other: &Self) -> bool {
        self.0.id() == other.0.id()
    }
}

impl Eq for WidgetHandle {}

impl Hash for WidgetHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id().hash(state);
    }
}

impl fmt::Debug for WidgetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WidgetHandle").field(&self.0.id()).finish()
    }
}

/// One child placement returned by [`Layout::arrange`], in the parent's
/// local coordinate space (pre-translation — the arranger adds the parent's
/// absolute origin and subtracts scroll).
#[derive(Clone, Debug)]
pub struct Placement {
    pub region: compositor_geometry::Region,
    pub widget: WidgetHandle,
    pub z: i32,
}

impl Placement {
    pub fn new(region: compositor_geometry::Region, widget: WidgetHandle, z: i32) -> Self {
        Self { region, widget, z }
    }
}

/// The sub-layout capability a container widget exposes.
pub trait Layout {
    /// Compute child placements for `widget` filling `size`, with `scroll`
    /// applied. Returns the placements (sorted by the arranger before
    /// recursion, by `z`) plus the full set of widgets this layout
    /// considered — which may include widgets it chose not to place
    /// visibly; those are still tracked for show/hide diffing.
    fn arrange(&self, widget: &dyn Widget, size: Size, scroll: Offset)
    -> (Vec<Placement>, Vec<WidgetHandle>);
}
