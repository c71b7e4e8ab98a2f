//! TOML layout files.
//!
//! A layout file lists keys in paint order; character data mirrors the
//! four markup attributes (`base`, `shifted`, `ar`, `ar_shifted`).
//!
//! ```toml
//! [[keys]]
//! id = "q"
//! rect = { x = 0, y = 0, w = 40, h = 50 }
//! base = "q"
//! shifted = "Q"
//! ar = "ض"
//!
//! [[keys]]
//! id = "backspace"
//! kind = "backspace"
//! rect = { x = 40, y = 0, w = 80, h = 50 }
//! ```

use super::{KeyChars, KeyDescriptor, KeyId, KeyKind, Layout, Rect};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating a layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid layout TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("layout defines no keys")]
    Empty,

    #[error("duplicate key id '{0}'")]
    DuplicateKey(KeyId),

    #[error("character key '{0}' has no characters")]
    NoCharacters(KeyId),
}

#[derive(Debug, Serialize, Deserialize)]
struct LayoutFile {
    #[serde(default)]
    keys: Vec<KeyEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct KeyEntry {
    id: KeyId,
    #[serde(default = "default_kind")]
    kind: KeyKind,
    rect: Rect,
    #[serde(flatten)]
    chars: KeyChars,
}

fn default_kind() -> KeyKind {
    KeyKind::Char
}

impl Layout {
    /// Parses a layout from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, LayoutError> {
        let file: LayoutFile = toml::from_str(text)?;
        if file.keys.is_empty() {
            return Err(LayoutError::Empty);
        }

        let keys = file
            .keys
            .into_iter()
            .map(|entry| KeyDescriptor {
                id: entry.id,
                kind: entry.kind,
                rect: entry.rect,
                chars: entry.chars,
            })
            .collect();
        Self::new(keys)
    }

    /// Reads and parses a layout file.
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let text = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let layout = Self::from_toml_str(&text)?;
        info!("Loaded layout with {} keys from {}", layout.len(), path.display());
        Ok(layout)
    }

    /// Serializes the layout back to the file format.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        let file = LayoutFile {
            keys: self
                .keys()
                .map(|key| KeyEntry {
                    id: key.id.clone(),
                    kind: key.kind,
                    rect: key.rect,
                    chars: key.chars.clone(),
                })
                .collect(),
        };
        toml::to_string_pretty(&file)
    }
}
