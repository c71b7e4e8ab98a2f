//! Scripted event replay.
//!
//! A replay script is a TOML list of timestamped pointer events. Replaying
//! feeds them through a fresh [`InputState`] with a synthetic clock and
//! reports the resulting text field.
//!
//! ```toml
//! text = "Hello"
//! end_ms = 1200
//!
//! [[events]]
//! at_ms = 0
//! kind = "touch_start"
//! key = "backspace"      # or x = 12.0, y = 30.0
//!
//! [[events]]
//! at_ms = 650
//! kind = "touch_end"
//! ```

use crate::input::{InputState, KeyboardSettings, PointerEvent};
use crate::layout::{KeyId, Language, Layout};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors raised while loading or compiling a replay script.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid script TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("event {index}: unknown key '{key}'")]
    UnknownKey { index: usize, key: KeyId },

    #[error("event {index}: {kind:?} needs either `key` or both `x` and `y`")]
    MissingTarget { index: usize, kind: EventKind },

    #[error("event {index}: at_ms {at_ms} is earlier than the previous event ({previous})")]
    OutOfOrder { index: usize, at_ms: u64, previous: u64 },
}

/// Event kinds accepted in scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    MouseDown,
    MouseUp,
    MouseLeave,
    Click,
}

/// One scripted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptEvent {
    pub at_ms: u64,
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// A full replay script.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    /// Initial text field content (caret at its end)
    #[serde(default)]
    pub text: String,
    /// Initial language, overriding configuration
    #[serde(default)]
    pub language: Option<Language>,
    /// Generator seed for reproducible name/email output
    #[serde(default)]
    pub seed: Option<u64>,
    /// Keep the clock running until this time after the last event
    #[serde(default)]
    pub end_ms: Option<u64>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

/// Final state after a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayOutcome {
    pub text: String,
    pub selection_start: usize,
    pub selection_end: usize,
    pub language: Language,
    pub shift_active: bool,
    pub dark_mode: bool,
    /// Repaints the keyboard requested over the run
    pub redraws: usize,
}

impl Script {
    pub fn from_toml_str(text: &str) -> Result<Self, ReplayError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let text = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Validates the events against `layout`, resolving key targets to points.
    pub fn compile(&self, layout: &Layout) -> Result<Vec<(u64, PointerEvent)>, ReplayError> {
        let mut compiled = Vec::with_capacity(self.events.len());
        let mut previous = 0;

        for (index, event) in self.events.iter().enumerate() {
            if event.at_ms < previous {
                return Err(ReplayError::OutOfOrder {
                    index,
                    at_ms: event.at_ms,
                    previous,
                });
            }
            previous = event.at_ms;

            let point = || target_point(layout, index, event);
            let pointer = match event.kind {
                EventKind::TouchStart => {
                    let (x, y) = point()?;
                    PointerEvent::TouchStart { x, y }
                }
                EventKind::TouchMove => {
                    let (x, y) = point()?;
                    PointerEvent::TouchMove { x, y }
                }
                EventKind::MouseDown => {
                    let (x, y) = point()?;
                    PointerEvent::MouseDown { x, y }
                }
                EventKind::MouseUp => {
                    let (x, y) = point()?;
                    PointerEvent::MouseUp { x, y }
                }
                EventKind::TouchEnd => PointerEvent::TouchEnd,
                EventKind::TouchCancel => PointerEvent::TouchCancel,
                EventKind::MouseLeave => PointerEvent::MouseLeave,
                EventKind::Click => {
                    let key = event.key.clone().ok_or(ReplayError::MissingTarget {
                        index,
                        kind: event.kind,
                    })?;
                    if layout.key(&key).is_none() {
                        return Err(ReplayError::UnknownKey { index, key });
                    }
                    PointerEvent::Click { key }
                }
            };
            compiled.push((event.at_ms, pointer));
        }

        Ok(compiled)
    }

    /// Replays the script against a fresh keyboard.
    pub fn replay(&self, layout: Layout, mut settings: KeyboardSettings) -> Result<ReplayOutcome, ReplayError> {
        let events = self.compile(&layout)?;

        if let Some(language) = self.language {
            settings.language = language;
        }
        let mut state = InputState::new(layout, settings);
        if let Some(seed) = self.seed {
            state.seed_generator(seed);
        }
        state.buffer.set_value(self.text.as_str());
        // Initial paint
        state.take_redraw();

        let base = Instant::now();
        let mut last = 0;
        let mut redraws = 0;
        for (at_ms, event) in &events {
            let now = base + Duration::from_millis(*at_ms);
            // Ticks due at the very same instant lose to the event.
            settle(&mut state, now);
            redraws += usize::from(state.take_redraw());
            state.handle_event(event, now);
            redraws += usize::from(state.take_redraw());
            last = *at_ms;
        }

        let end = self.end_ms.unwrap_or(last).max(last);
        state.tick(base + Duration::from_millis(end));
        redraws += usize::from(state.take_redraw());

        let selection = state.buffer.selection();
        Ok(ReplayOutcome {
            text: state.buffer.value().to_string(),
            selection_start: selection.start,
            selection_end: selection.end,
            language: state.language(),
            shift_active: state.shift_active(),
            dark_mode: state.dark_mode(),
            redraws,
        })
    }
}

fn settle(state: &mut InputState, now: Instant) {
    if let Some(just_before) = now.checked_sub(Duration::from_micros(1)) {
        state.tick(just_before);
    }
}

fn target_point(layout: &Layout, index: usize, event: &ScriptEvent) -> Result<(f64, f64), ReplayError> {
    if let Some(key) = &event.key {
        return layout
            .key(key)
            .map(|descriptor| descriptor.rect.center())
            .ok_or_else(|| ReplayError::UnknownKey {
                index,
                key: key.clone(),
            });
    }
    match (event.x, event.y) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(ReplayError::MissingTarget {
            index,
            kind: event.kind,
        }),
    }
}
