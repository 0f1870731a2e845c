//! Surface - Widget and Canvas Boundary
//!
//! ## Responsibilities
//!
//! - Trait surface the embedding frontend implements
//! - Canvas abstraction for preview rendering
//! - Control creation inside named containers
//!
//! Implementations must be `Send + Sync`; the session mutates controls only
//! through these handles, from its own cooperative tasks.

use crate::preview_loop::PreviewFrame;
use std::sync::Arc;

/// Canvas pixel dimensions at request time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

/// Creation parameters for the numeric exposure controls
#[derive(Debug, Clone, Copy)]
pub struct RangeSpec {
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

/// Preview rendering target
pub trait PreviewCanvas: Send + Sync {
    /// Fit the canvas to its container
    fn resize(&self);
    /// Clear the drawing area
    fn clear(&self);
    /// Draw a fully loaded frame
    fn draw_frame(&self, frame: &PreviewFrame);
    /// Current pixel dimensions
    fn size(&self) -> CanvasSize;
}

/// Numeric control (range slider or number box)
pub trait ValueInput: Send + Sync {
    /// Overwrite the displayed value
    fn set_value(&self, value: i64);
}

/// Free-text control
pub trait TextInput: Send + Sync {
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
}

/// Control construction, attaching each control into a named container.
///
/// Event routing is the frontend's side of the contract: change events from
/// the numeric controls go to
/// [`LiveSession::exposure_slider_changed`](crate::session::LiveSession::exposure_slider_changed)
/// / [`LiveSession::exposure_input_changed`](crate::session::LiveSession::exposure_input_changed),
/// and activation of the trigger control to
/// [`LiveSession::capture`](crate::session::LiveSession::capture).
pub trait WidgetFactory: Send + Sync {
    /// Create the preview canvas inside `container`
    fn preview_canvas(&self, container: &str) -> Arc<dyn PreviewCanvas>;
    /// Create a numeric range control inside `container`
    fn range_control(&self, container: &str, range: RangeSpec) -> Arc<dyn ValueInput>;
    /// Create a numeric text control inside `container`
    fn number_control(&self, container: &str, range: RangeSpec) -> Arc<dyn ValueInput>;
    /// Create a free-text control inside `container`
    fn text_control(&self, container: &str) -> Arc<dyn TextInput>;
    /// Create a trigger control inside `container`
    fn trigger_control(&self, container: &str, label: &str);
}
