use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
    /// Tab pressed; the owner decides where focus goes.
    FocusNext,
}

/// Single-line text field with readline-style editing.
pub struct LineInput {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
}

impl LineInput {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Returns (before_cursor, cursor_char, after_cursor) for styled rendering.
    /// When cursor is at end of text, cursor_char is None.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let byte_offset = self.char_to_byte(self.cursor);
        match self.text[byte_offset..].chars().next() {
            Some(ch) => {
                let next_byte = byte_offset + ch.len_utf8();
                (&self.text[..byte_offset], Some(ch), &self.text[next_byte..])
            }
            None => (&self.text, None, ""),
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Tab | KeyCode::BackTab => return InputResult::FocusNext,

            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.cursor < self.text.chars().count() {
                    self.cursor += 1;
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.chars().count(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.remove_char_at(self.cursor - 1);
                    self.cursor -= 1;
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.text.chars().count() {
                    self.remove_char_at(self.cursor);
                }
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = 0;
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = self.text.chars().count();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
            }
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.delete_word_back();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let byte_offset = self.char_to_byte(self.cursor);
                self.text.insert(byte_offset, ch);
                self.cursor += 1;
            }
            _ => {}
        }
        InputResult::Continue
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn remove_char_at(&mut self, char_idx: usize) {
        let start = self.char_to_byte(char_idx);
        let end = self.char_to_byte(char_idx + 1);
        self.text.replace_range(start..end, "");
    }

    /// Delete word before cursor (unix-word-rubout: skip whitespace, then non-whitespace).
    fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;

        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }

        let start_byte = self.char_to_byte(pos);
        let end_byte = self.char_to_byte(self.cursor);
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_str(input: &mut LineInput, s: &str) {
        for ch in s.chars() {
            input.handle(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn typing_a_band() {
        let mut input = LineInput::new("");
        type_str(&mut input, "6.5");
        assert_eq!(input.value(), "6.5");
        assert_eq!(input.handle(key(KeyCode::Enter)), InputResult::Submit);
    }

    #[test]
    fn insert_at_start_middle_end() {
        let mut input = LineInput::new("ac");
        input.handle(key(KeyCode::Char('d')));
        assert_eq!(input.value(), "acd");

        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Char('z')));
        assert_eq!(input.value(), "zacd");
        assert_eq!(input.cursor, 1);

        input.handle(key(KeyCode::Right));
        input.handle(key(KeyCode::Char('b')));
        assert_eq!(input.value(), "zabcd");
        assert_eq!(input.cursor, 3);
    }

    #[test]
    fn backspace_at_boundaries() {
        let mut input = LineInput::new("ab");
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "a");
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "");
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn delete_at_boundaries() {
        let mut input = LineInput::new("ab");
        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "b");
        assert_eq!(input.cursor, 0);

        input.handle(key(KeyCode::End));
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn multibyte_editing() {
        let mut input = LineInput::new("bậc");
        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "bc");
        assert_eq!(input.render_parts(), ("b", Some('c'), ""));
    }

    #[test]
    fn ctrl_w_word_delete() {
        let mut input = LineInput::new("band 7.5  ");
        input.handle(ctrl('w'));
        assert_eq!(input.value(), "band ");

        let mut empty = LineInput::new("");
        empty.handle(ctrl('w'));
        assert_eq!(empty.value(), "");
    }

    #[test]
    fn ctrl_u_clears() {
        let mut input = LineInput::new("hello world");
        input.handle(ctrl('u'));
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn ctrl_a_and_ctrl_e() {
        let mut input = LineInput::new("test");
        input.handle(ctrl('a'));
        assert_eq!(input.cursor, 0);
        input.handle(ctrl('e'));
        assert_eq!(input.cursor, 4);
    }

    #[test]
    fn control_keys_report_intent() {
        let mut input = LineInput::new("x");
        assert_eq!(input.handle(key(KeyCode::Esc)), InputResult::Cancel);
        assert_eq!(input.handle(key(KeyCode::Tab)), InputResult::FocusNext);
        assert_eq!(input.value(), "x");
    }

    #[test]
    fn render_parts_at_end_has_no_cursor_char() {
        let input = LineInput::new("7.0");
        assert_eq!(input.render_parts(), ("7.0", None, ""));
    }

    #[test]
    fn set_moves_cursor_to_end() {
        let mut input = LineInput::new("");
        input.set("8.5");
        assert_eq!(input.cursor, 3);
    }
}
