//! Selection-aware text buffer standing in for the host text field.
//!
//! Positions are counted in chars (Unicode scalar values), never bytes, so a
//! caret can never land inside a multi-byte Arabic letter.

use std::ops::Range;

/// Text content plus a selection range.
///
/// Invariant: `0 <= start <= end <= char_len(content)`. A collapsed selection
/// (`start == end`) is a plain caret.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    content: String,
    start: usize,
    end: usize,
}

impl TextBuffer {
    /// Creates an empty buffer with the caret at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer holding `text` with the caret collapsed at its end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut buffer = Self::new();
        buffer.set_value(text);
        buffer
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    /// Length of the content in chars.
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn selection(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Caret position, i.e. the selection start.
    pub fn caret(&self) -> usize {
        self.start
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Replaces the whole content and collapses the caret at the end.
    pub fn set_value(&mut self, text: impl Into<String>) {
        self.content = text.into();
        let len = self.len();
        self.start = len;
        self.end = len;
    }

    /// Sets the selection, clamping it into range and normalizing reversed
    /// bounds the way a native text field does.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.len();
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        self.start = start.min(len);
        self.end = end.min(len);
    }

    /// Replaces the selection (or the caret point) with `text`.
    ///
    /// The caret collapses at `old_start + char_len(text)`.
    pub fn insert(&mut self, text: &str) {
        let from = self.byte_offset(self.start);
        let to = self.byte_offset(self.end);
        self.content.replace_range(from..to, text);

        let caret = self.start + text.chars().count();
        self.start = caret;
        self.end = caret;
    }

    /// Deletes the selection, or the char before a collapsed caret.
    ///
    /// Returns `false` when there was nothing to delete (collapsed caret at 0).
    pub fn delete_backward(&mut self) -> bool {
        if self.is_collapsed() {
            if self.start == 0 {
                return false;
            }
            let from = self.byte_offset(self.start - 1);
            let to = self.byte_offset(self.start);
            self.content.replace_range(from..to, "");
            self.start -= 1;
        } else {
            let from = self.byte_offset(self.start);
            let to = self.byte_offset(self.end);
            self.content.replace_range(from..to, "");
        }
        self.end = self.start;
        true
    }

    /// Byte offset of the char at `index`; `index == len` maps to the end.
    fn byte_offset(&self, index: usize) -> usize {
        self.content
            .char_indices()
            .nth(index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.content.len())
    }
}
