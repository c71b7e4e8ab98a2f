//! Configuration enum types.

use crate::layout::Language;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Start-up language choice.
///
/// ```toml
/// [keyboard]
/// default_language = "auto"   # or "en" / "ar"
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LanguageSpec {
    /// Arabic when the process locale starts with `ar`, English otherwise
    #[default]
    Auto,
    /// Always start in English
    En,
    /// Always start in Arabic
    Ar,
}

impl LanguageSpec {
    /// Resolves to a concrete language, consulting the environment for `Auto`.
    pub fn resolve(self) -> Language {
        match self {
            Self::Auto => Language::from_env(),
            Self::En => Language::En,
            Self::Ar => Language::Ar,
        }
    }
}
