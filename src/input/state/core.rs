//! Keyboard widget state and press-phase state machine.

use crate::config::Config;
use crate::generate::DEFAULT_EMAIL_DOMAINS;
use crate::input::events::PointerSource;
use crate::input::repeat::{RepeatTask, Timing};
use crate::layout::{self, KeyDescriptor, KeyId, KeyLabel, Language, Layout};
use crate::text_buffer::TextBuffer;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Reconciler phase.
///
/// `Released` and `Cancelled` are momentary: every press-end handler passes
/// through them and lands back in `Idle` within the same call, so only the
/// two resting phases are stored.
#[derive(Debug, Clone, PartialEq)]
pub enum PressPhase {
    /// No key held
    Idle,
    /// A key is held down
    Pressed {
        /// The active key
        key: KeyId,
        /// Stream that started the press
        source: PointerSource,
        /// When the press was accepted
        started_at: Instant,
    },
}

/// Start-up settings for an [`InputState`].
#[derive(Debug, Clone)]
pub struct KeyboardSettings {
    pub language: Language,
    pub shift_active: bool,
    pub dark_mode: bool,
    pub timing: Timing,
    pub email_domains: Vec<String>,
}

impl Default for KeyboardSettings {
    fn default() -> Self {
        Self {
            language: Language::En,
            shift_active: false,
            dark_mode: false,
            timing: Timing::default(),
            email_domains: DEFAULT_EMAIL_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl From<&Config> for KeyboardSettings {
    fn from(config: &Config) -> Self {
        Self {
            language: config.keyboard.default_language.resolve(),
            shift_active: false,
            dark_mode: config.keyboard.start_dark,
            timing: Timing::from(&config.timing),
            email_domains: config.generator.email_domains.clone(),
        }
    }
}

/// All mutable keyboard state.
///
/// One owned instance per widget, passed explicitly to every handler. The
/// `has_inserted` and active-key pair is the only coordination between the
/// touch, mouse and click handlers of a single physical tap.
pub struct InputState {
    pub(super) layout: Layout,
    /// Language currently produced by character keys
    pub(super) language: Language,
    /// Shift toggle
    pub(super) shift_active: bool,
    /// Dark-mode toggle (visual only)
    pub(super) dark_mode: bool,
    /// The text field being edited
    pub buffer: TextBuffer,
    pub(super) phase: PressPhase,
    /// The current interaction began with a touch
    pub(super) touch_active: bool,
    /// The current press already produced its effect
    pub(super) has_inserted: bool,
    pub(super) last_press_at: Option<Instant>,
    pub(super) touch_ended_at: Option<Instant>,
    pub(super) repeat: Option<RepeatTask>,
    pub(super) labels: HashMap<KeyId, KeyLabel>,
    pub(super) timing: Timing,
    pub(super) email_domains: Vec<String>,
    pub(super) rng: StdRng,
    /// Whether the host should repaint
    pub needs_redraw: bool,
}

impl InputState {
    /// Creates the widget state and runs the initial relabel pass.
    pub fn new(layout: Layout, settings: KeyboardSettings) -> Self {
        let labels = layout::relabel(&layout, settings.language, settings.shift_active);
        Self {
            layout,
            language: settings.language,
            shift_active: settings.shift_active,
            dark_mode: settings.dark_mode,
            buffer: TextBuffer::new(),
            phase: PressPhase::Idle,
            touch_active: false,
            has_inserted: true,
            last_press_at: None,
            touch_ended_at: None,
            repeat: None,
            labels,
            timing: settings.timing,
            email_domains: settings.email_domains,
            rng: StdRng::from_os_rng(),
            needs_redraw: true,
        }
    }

    /// Replaces the generator's RNG with a seeded one for reproducible output.
    pub fn seed_generator(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn shift_active(&self) -> bool {
        self.shift_active
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn phase(&self) -> &PressPhase {
        &self.phase
    }

    /// The key currently held, which the host renders as pressed.
    pub fn active_key(&self) -> Option<&KeyDescriptor> {
        match &self.phase {
            PressPhase::Pressed { key, .. } => self.layout.key(key),
            PressPhase::Idle => None,
        }
    }

    /// How long the current press has been held at `now`.
    pub fn held_for(&self, now: Instant) -> Option<Duration> {
        match &self.phase {
            PressPhase::Pressed { started_at, .. } => Some(now.saturating_duration_since(*started_at)),
            PressPhase::Idle => None,
        }
    }

    /// Returns whether a repaint was requested since the last call, and clears
    /// the request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn touch_active(&self) -> bool {
        self.touch_active
    }

    pub fn has_inserted(&self) -> bool {
        self.has_inserted
    }

    /// Whether a hold-to-repeat task is armed.
    pub fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }

    /// When the host must call [`InputState::tick`] next, if at all.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.repeat.as_ref().map(RepeatTask::deadline)
    }

    /// Current glyphs for a character key.
    pub fn label(&self, key: &KeyId) -> Option<&KeyLabel> {
        self.labels.get(key)
    }

    pub fn labels(&self) -> &HashMap<KeyId, KeyLabel> {
        &self.labels
    }

    /// Text for the language toggle key.
    pub fn language_key_label(&self) -> &'static str {
        self.language.switch_label()
    }

    /// Recomputes every character key's glyphs from the current state.
    pub(super) fn relabel(&mut self) {
        self.labels = layout::relabel(&self.layout, self.language, self.shift_active);
        self.needs_redraw = true;
    }
}
