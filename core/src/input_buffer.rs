//! Input buffer with cursor tracking for composed text.
//!
//! The buffer stores rendered text (e.g. "tiếng") and tracks a cursor inside
//! it. The cursor is a byte offset so it can be handed straight to a display
//! protocol, and it is only ever placed on a `char` boundary.

use std::ops::Range;

/// Text buffer tracking a byte-offset cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    cursor: usize, // Byte offset, not char offset
}

impl InputBuffer {
    /// Create a new empty input buffer.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
        }
    }

    /// Get the text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the cursor position (byte offset).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of scalar values in the buffer.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Cursor position counted in scalar values.
    pub fn char_cursor(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    /// Clear the buffer and reset cursor.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Delete the character before the cursor (backspace).
    /// Returns the removed character.
    pub fn delete_before(&mut self) -> Option<char> {
        let prev = self.text[..self.cursor].char_indices().next_back()?.0;
        let ch = self.text.remove(prev);
        self.cursor = prev;
        Some(ch)
    }

    /// Delete the character after the cursor (delete key).
    /// Returns the removed character.
    pub fn delete_after(&mut self) -> Option<char> {
        if self.cursor >= self.text.len() {
            return None;
        }
        Some(self.text.remove(self.cursor))
    }

    /// Move cursor to the left by one character.
    /// Returns true if cursor moved.
    pub fn move_left(&mut self) -> bool {
        match self.text[..self.cursor].char_indices().next_back() {
            Some((prev, _)) => {
                self.cursor = prev;
                true
            }
            None => false,
        }
    }

    /// Move cursor to the right by one character.
    /// Returns true if cursor moved.
    pub fn move_right(&mut self) -> bool {
        match self.text[self.cursor..].chars().next() {
            Some(ch) => {
                self.cursor += ch.len_utf8();
                true
            }
            None => false,
        }
    }

    /// Move cursor to the beginning.
    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to the end.
    pub fn move_to_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Set the cursor position (must be at a character boundary).
    pub fn set_cursor(&mut self, pos: usize) -> bool {
        if pos <= self.text.len() && self.text.is_char_boundary(pos) {
            self.cursor = pos;
            true
        } else {
            false
        }
    }

    /// Replace the scalar values in `range` with `replacement` and place the
    /// cursor right after the inserted text.
    ///
    /// The range is clamped to the buffer, so callers may pass an end past
    /// the last character.
    pub fn replace_chars(&mut self, range: Range<usize>, replacement: &str) {
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end.max(range.start));
        self.text.replace_range(start..end, replacement);
        self.cursor = start + replacement.len();
    }

    /// Byte offset of the `n`th scalar value (or the end of the text).
    pub fn byte_offset(&self, n: usize) -> usize {
        self.text
            .char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
