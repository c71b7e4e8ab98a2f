//! Configuration file support for vkbd.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/vkbd/config.toml`. Settings include the start-up language,
//! reconciler timing, and the email domains used by the generator key.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::LanguageSpec;
pub use types::{GeneratorConfig, KeyboardConfig, TimingConfig};

use crate::layout::{Layout, builtin};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [keyboard]
/// default_language = "auto"
/// start_dark = false
///
/// [timing]
/// debounce_ms = 100
/// hold_delay_ms = 300
/// repeat_interval_ms = 100
///
/// [generator]
/// email_domains = ["gmail.com", "example.org"]
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Start-up keyboard state and layout source
    #[serde(default)]
    pub keyboard: KeyboardConfig,

    /// Reconciler and hold-to-repeat timing
    #[serde(default)]
    pub timing: TimingConfig,

    /// Random content generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `debounce_ms`: 0 - 1000
    /// - `hold_delay_ms`: 50 - 2000
    /// - `repeat_interval_ms`: 10 - 1000
    /// - `touch_compat_window_ms`: 0 - 2000
    /// - `email_domains`: non-empty, no `@` or whitespace
    fn validate_and_clamp(&mut self) {
        clamp_ms("debounce_ms", &mut self.timing.debounce_ms, 0, 1000);
        clamp_ms("hold_delay_ms", &mut self.timing.hold_delay_ms, 50, 2000);
        clamp_ms("repeat_interval_ms", &mut self.timing.repeat_interval_ms, 10, 1000);
        clamp_ms(
            "touch_compat_window_ms",
            &mut self.timing.touch_compat_window_ms,
            0,
            2000,
        );

        self.generator.email_domains.retain(|domain| {
            let valid = !domain.is_empty()
                && !domain.contains('@')
                && !domain.chars().any(char::is_whitespace);
            if !valid {
                warn!("Ignoring invalid email domain '{}'", domain);
            }
            valid
        });
        if self.generator.email_domains.is_empty() {
            warn!("No usable email_domains configured, falling back to defaults");
            self.generator.email_domains = types::default_email_domains();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("vkbd");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if it doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the configuration to `config_path`, creating parent directories.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Writes the documented example config to `config_path`.
    ///
    /// # Errors
    /// Returns an error if a config file already exists there or it cannot be written.
    pub fn create_default_file(config_path: &Path) -> Result<()> {
        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(config_path, default_config)?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Loads the configured layout file, or the built-in layout when none is set.
    pub fn layout(&self) -> Result<Layout> {
        match &self.keyboard.layout_path {
            Some(path) => Layout::load(path)
                .with_context(|| format!("Failed to load layout from {}", path.display())),
            None => Ok(builtin::default_layout()),
        }
    }
}

fn clamp_ms(name: &str, value: &mut u64, min: u64, max: u64) {
    if !(min..=max).contains(&*value) {
        warn!("Invalid {} {}, clamping to {}-{} range", name, value, min, max);
        *value = (*value).clamp(min, max);
    }
}
