//! Library exports for the vkbd keyboard core.
//!
//! Exposes the layout data, the press reconciler and the text buffer so that
//! hosts (browser bindings, native toolkits, the replay CLI) can feed pointer
//! events in and render the resulting state.

pub mod config;
pub mod generate;
pub mod input;
pub mod layout;
pub mod replay;
pub mod session;
pub mod text_buffer;

pub use config::Config;
pub use input::{InputState, KeyboardSettings, PointerEvent};
pub use layout::{KeyId, Language, Layout};
pub use text_buffer::TextBuffer;
