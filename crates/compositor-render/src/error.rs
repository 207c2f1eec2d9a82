use compositor_model::WidgetId;
use thiserror::Error;

/// The compositor's one recoverable, data-dependent failure: a caller
/// referenced a widget or coordinate that isn't (or is no longer) part of
/// the arrangement.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CompositorError {
    #[error("widget {0} is not in the current arrangement")]
    NoWidget(WidgetId),
    #[error("no widget under screen coordinate ({0}, {1})")]
    NoWidgetAt(i32, i32),
}
