//! Configuration type definitions.

use super::enums::LanguageSpec;
use crate::generate::DEFAULT_EMAIL_DOMAINS;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Keyboard start-up settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct KeyboardConfig {
    /// Language active at start-up: "auto", "en" or "ar"
    #[serde(default)]
    pub default_language: LanguageSpec,

    /// Start with dark mode enabled
    #[serde(default)]
    pub start_dark: bool,

    /// Optional TOML layout file replacing the built-in layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_path: Option<PathBuf>,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            default_language: LanguageSpec::Auto,
            start_dark: false,
            layout_path: None,
        }
    }
}

/// Press reconciliation and hold-to-repeat timing.
///
/// The defaults match common mobile browser behavior; most users won't need
/// to change them.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TimingConfig {
    /// Minimum gap between two press starts in ms (valid range: 0 - 1000)
    /// Swallows the duplicate start events some platforms fire for one tap
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Hold time before backspace starts repeating in ms (valid range: 50 - 2000)
    #[serde(default = "default_hold_delay_ms")]
    pub hold_delay_ms: u64,

    /// Gap between repeated deletions in ms (valid range: 10 - 1000)
    #[serde(default = "default_repeat_interval_ms")]
    pub repeat_interval_ms: u64,

    /// How long after a touch ends mouse events are treated as synthesized,
    /// in ms (valid range: 0 - 2000)
    #[serde(default = "default_touch_compat_window_ms")]
    pub touch_compat_window_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            hold_delay_ms: default_hold_delay_ms(),
            repeat_interval_ms: default_repeat_interval_ms(),
            touch_compat_window_ms: default_touch_compat_window_ms(),
        }
    }
}

/// Random name/email generator settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GeneratorConfig {
    /// Domains picked uniformly for generated email addresses
    #[serde(default = "default_email_domains")]
    pub email_domains: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            email_domains: default_email_domains(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_debounce_ms() -> u64 {
    100
}

fn default_hold_delay_ms() -> u64 {
    300
}

fn default_repeat_interval_ms() -> u64 {
    100
}

fn default_touch_compat_window_ms() -> u64 {
    // Covers the 300ms click delay of older mobile browsers with margin
    700
}

pub(super) fn default_email_domains() -> Vec<String> {
    DEFAULT_EMAIL_DOMAINS.iter().map(|d| d.to_string()).collect()
}
