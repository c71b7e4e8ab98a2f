use crate::generate;
use crate::layout::{self, KeyId, KeyKind, Language};
use log::{debug, warn};

use super::InputState;

impl InputState {
    /// Performs a key's effect. Called once per completed press.
    pub(super) fn activate(&mut self, id: &KeyId) {
        let Some(key) = self.layout.key(id) else {
            warn!("Activated unknown key '{}'", id);
            return;
        };

        match key.kind {
            KeyKind::Char => {
                let text = layout::resolve_char(&key.chars, self.language, self.shift_active)
                    .map(str::to_owned);
                match text {
                    Some(text) => self.insert_text(&text),
                    None => debug!("Key '{}' has no character for {}", id, self.language),
                }
            }
            KeyKind::Backspace => self.delete_backward(),
            KeyKind::Space => self.insert_text(" "),
            KeyKind::Enter => self.insert_text("\n"),
            KeyKind::Shift => self.toggle_shift(),
            KeyKind::Language => self.toggle_language(),
            KeyKind::GenerateName => self.generate_name(),
            KeyKind::GenerateEmail => self.generate_email(),
            KeyKind::DarkMode => self.toggle_dark_mode(),
        }
    }

    /// Inserts text at the caret, replacing any selection.
    pub fn insert_text(&mut self, text: &str) {
        self.buffer.insert(text);
        self.needs_redraw = true;
    }

    /// Deletes the selection or the char before the caret.
    pub fn delete_backward(&mut self) {
        if self.buffer.delete_backward() {
            self.needs_redraw = true;
        }
    }

    pub fn toggle_shift(&mut self) {
        self.shift_active = !self.shift_active;
        debug!("Shift {}", if self.shift_active { "on" } else { "off" });
        self.relabel();
    }

    pub fn toggle_language(&mut self) {
        self.set_language(self.language.toggled());
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        debug!("Language set to {}", language);
        self.relabel();
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.needs_redraw = true;
    }

    /// Inserts a random "First Last" name.
    pub fn generate_name(&mut self) {
        let name = generate::full_name(&mut self.rng);
        self.insert_text(&name);
    }

    /// Inserts a random email address.
    pub fn generate_email(&mut self) {
        let address = generate::email(&mut self.rng, &self.email_domains);
        self.insert_text(&address);
    }
}
