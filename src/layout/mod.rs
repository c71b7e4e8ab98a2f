//! Keyboard layout data and character resolution.
//!
//! A [`Layout`] is an ordered list of [`KeyDescriptor`]s (paint order: later
//! keys sit on top). Which character a key produces, and which glyphs it
//! displays, is a pure function of the key, the current [`Language`] and the
//! shift state, so labels and inserted text can never drift apart.

pub mod builtin;
pub mod file;
pub mod key;
pub mod language;

pub use file::LayoutError;
pub use key::{KeyChars, KeyDescriptor, KeyId, KeyKind, Rect};
pub use language::Language;

use std::collections::HashMap;

/// Resolves the element under a point, the `elementAtPoint` of the host.
pub trait HitTest {
    /// Returns the topmost key containing `(x, y)`, if any.
    fn key_at(&self, x: f64, y: f64) -> Option<&KeyDescriptor>;
}

/// Ordered, id-indexed set of keys.
#[derive(Debug, Clone)]
pub struct Layout {
    keys: Vec<KeyDescriptor>,
    index: HashMap<KeyId, usize>,
}

impl Layout {
    /// Builds a layout, rejecting duplicate ids and character keys that carry
    /// no characters at all.
    pub fn new(keys: Vec<KeyDescriptor>) -> Result<Self, LayoutError> {
        let mut index = HashMap::with_capacity(keys.len());
        for (position, key) in keys.iter().enumerate() {
            if key.kind == KeyKind::Char && key.chars.is_empty() {
                return Err(LayoutError::NoCharacters(key.id.clone()));
            }
            if index.insert(key.id.clone(), position).is_some() {
                return Err(LayoutError::DuplicateKey(key.id.clone()));
            }
        }
        Ok(Self { keys, index })
    }

    pub fn key(&self, id: &KeyId) -> Option<&KeyDescriptor> {
        self.index.get(id).map(|&position| &self.keys[position])
    }

    /// All keys in paint order.
    pub fn keys(&self) -> impl Iterator<Item = &KeyDescriptor> {
        self.keys.iter()
    }

    /// Keys whose labels follow the language/shift state.
    pub fn char_keys(&self) -> impl Iterator<Item = &KeyDescriptor> {
        self.keys.iter().filter(|key| key.kind == KeyKind::Char)
    }

    /// First key of the given kind, used to locate special keys.
    pub fn find_kind(&self, kind: KeyKind) -> Option<&KeyDescriptor> {
        self.keys.iter().find(|key| key.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl HitTest for Layout {
    fn key_at(&self, x: f64, y: f64) -> Option<&KeyDescriptor> {
        self.keys.iter().rev().find(|key| key.rect.contains(x, y))
    }
}

/// Character a key produces for the given language and shift state.
///
/// Priority: the language+shift variant (when shift is active), then the
/// language's primary character, then the Latin base character.
pub fn resolve_char(chars: &KeyChars, language: Language, shift_active: bool) -> Option<&str> {
    let (primary, shifted) = match language {
        Language::En => (&chars.base, &chars.shifted),
        Language::Ar => (&chars.ar, &chars.ar_shifted),
    };

    let shifted = if shift_active { shifted.as_deref() } else { None };
    shifted
        .or(primary.as_deref())
        .or(chars.base.as_deref())
}

/// Glyphs displayed on a character key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLabel {
    /// Large glyph; always equal to what the key inserts
    pub primary: String,
    /// Small hint glyph: what the key would insert with shift toggled
    pub secondary: Option<String>,
}

/// Computes the label for one key.
pub fn resolve_label(chars: &KeyChars, language: Language, shift_active: bool) -> KeyLabel {
    let primary = resolve_char(chars, language, shift_active).unwrap_or_default();
    let secondary = resolve_char(chars, language, !shift_active)
        .filter(|other| *other != primary)
        .map(str::to_string);

    KeyLabel {
        primary: primary.to_string(),
        secondary,
    }
}

/// Full relabel pass over every character key.
pub fn relabel(layout: &Layout, language: Language, shift_active: bool) -> HashMap<KeyId, KeyLabel> {
    layout
        .char_keys()
        .map(|key| (key.id.clone(), resolve_label(&key.chars, language, shift_active)))
        .collect()
}
