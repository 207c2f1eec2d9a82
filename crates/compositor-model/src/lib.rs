//! Widget capability surface and cell content model.
//!
//! This crate defines the boundary between the compositor and the widget
//! tree it arranges: the [`Widget`] and [`Layout`] traits, widget identity
//! ([`WidgetId`], [`WidgetHandle`]), the z-order key ([`Order`]), child
//! placements ([`Placement`]), and the styled-content model the compositor
//! renders into ([`Style`], [`Segment`], [`Line`], [`Lines`], [`divide`]).
//!
//! The widget tree itself, concrete layout algorithms, and style/CSS
//! resolution are all out of scope here — this crate only describes the
//! shape a widget must present, not how one is built.

mod segment;
mod widget;

pub use segment::{Line, Lines, Segment, Style, divide, line_cell_length};
pub use widget::{Layout, Order, Placement, Widget, WidgetHandle, WidgetId};
