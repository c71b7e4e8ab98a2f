//! Key descriptors: identity, behavior, geometry and character data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable key identity (e.g. `"q"`, `"backspace"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyId(String);

impl KeyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for KeyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// What a key does when it is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    /// Inserts the character resolved for the current language/shift state
    Char,
    /// Deletes backward, repeating while held
    Backspace,
    /// Inserts a single space
    Space,
    /// Inserts a newline
    Enter,
    /// Toggles the shift state
    Shift,
    /// Toggles between English and Arabic
    Language,
    /// Inserts a random "First Last" name
    GenerateName,
    /// Inserts a random email address
    GenerateEmail,
    /// Toggles dark mode
    DarkMode,
}

/// Axis-aligned hit rectangle in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment: the right and bottom edges belong to the neighbor.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// The four character values a key may carry.
///
/// Any of them may be absent; a character key with nothing resolvable
/// inserts nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChars {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shifted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar_shifted: Option<String>,
}

impl KeyChars {
    pub fn is_empty(&self) -> bool {
        self.base.is_none() && self.shifted.is_none() && self.ar.is_none() && self.ar_shifted.is_none()
    }
}

/// Immutable description of one key element.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyDescriptor {
    pub id: KeyId,
    pub kind: KeyKind,
    pub rect: Rect,
    pub chars: KeyChars,
}

impl KeyDescriptor {
    pub fn new(id: impl Into<KeyId>, kind: KeyKind, rect: Rect) -> Self {
        Self {
            id: id.into(),
            kind,
            rect,
            chars: KeyChars::default(),
        }
    }

    /// Character key with all four values given as `&str`; empty strings mean absent.
    pub fn char_key(
        id: impl Into<KeyId>,
        rect: Rect,
        base: &str,
        shifted: &str,
        ar: &str,
        ar_shifted: &str,
    ) -> Self {
        let present = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            id: id.into(),
            kind: KeyKind::Char,
            rect,
            chars: KeyChars {
                base: present(base),
                shifted: present(shifted),
                ar: present(ar),
                ar_shifted: present(ar_shifted),
            },
        }
    }
}
