//! Prompt input field: single-line text with a char-indexed cursor.

/// Editable prompt line
#[derive(Debug, Clone, Default)]
pub struct InputField {
    text: String,
    /// Cursor position as char index
    cursor: usize,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Byte offset of a char index
    fn byte_pos(&self, index: usize) -> usize {
        self.text
            .char_indices()
            .nth(index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Insert a character at the cursor position
    pub fn insert(&mut self, ch: char) {
        let pos = self.byte_pos(self.cursor);
        self.text.insert(pos, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position (paste)
    pub fn insert_str(&mut self, s: &str) {
        for ch in s.chars().filter(|c| !c.is_control()) {
            self.insert(ch);
        }
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let pos = self.byte_pos(self.cursor);
        self.text.remove(pos);
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let pos = self.byte_pos(self.cursor);
            self.text.remove(pos);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Replace the whole text, cursor at end
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Take the text out, leaving the field empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }
}
