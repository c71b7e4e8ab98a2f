//! Pointer event types delivered by the host.

use crate::layout::KeyId;

/// A raw pointer or touch event, already stripped of host-specific payload.
///
/// Coordinates are in the same space as the layout's key rectangles.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// First finger down
    TouchStart { x: f64, y: f64 },
    /// Finger moved while down
    TouchMove { x: f64, y: f64 },
    /// Finger lifted
    TouchEnd,
    /// Platform aborted the touch (e.g. a gesture took over)
    TouchCancel,
    /// Primary mouse button pressed (possibly synthesized after a touch)
    MouseDown { x: f64, y: f64 },
    /// Primary mouse button released
    MouseUp { x: f64, y: f64 },
    /// Pointer left the keyboard surface
    MouseLeave,
    /// Click dispatched to a key element
    Click { key: KeyId },
}

/// Which event stream started the current press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Touch,
    Mouse,
}

/// Why a press ended. Every variant cancels the repeat task; only
/// [`PressEnd::Release`] may activate the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressEnd {
    /// Finger lifted or button released over the pressed key
    Release,
    /// Pointer left the surface
    Leave,
    /// Platform cancelled the touch, or a new press superseded this one
    Cancel,
    /// Touch or pointer moved off the pressed key before release
    Drift,
}
