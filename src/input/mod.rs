//! Input handling and press reconciliation.
//!
//! This module turns the host's overlapping touch, mouse and click event
//! streams into exactly one key activation per physical press, and drives
//! hold-to-repeat deletion for the backspace key.

pub mod events;
pub mod repeat;
pub mod state;

// Re-export commonly used types at module level
pub use events::{PointerEvent, PointerSource, PressEnd};
pub use repeat::{RepeatTask, Timing};
pub use state::{InputState, KeyboardSettings, PressPhase};
