use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::widgets::traits::TextAction;
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Text changed.
    Edited,
    /// Only the cursor moved.
    Moved,
    Ignored,
}

/// Single-line text buffer with a char-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    value: String,
    cursor: usize,
}

impl LineEditor {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = char_count(&value);
        Self { value, cursor }
    }

    pub fn at(value: impl Into<String>, cursor: usize) -> Self {
        let value = value.into();
        let cursor = cursor.min(char_count(&value));
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display columns between the start of the text and the cursor.
    pub fn cursor_col(&self) -> usize {
        display_width(&self.value, self.cursor)
    }

    pub fn on_key(&mut self, key: KeyEvent) -> EditOutcome {
        let mods = key.modifiers;
        if mods.contains(KeyModifiers::CONTROL) || mods.contains(KeyModifiers::ALT) {
            return EditOutcome::Ignored;
        }
        match key.code {
            KeyCode::Char(ch) => {
                self.insert(ch);
                EditOutcome::Edited
            }
            KeyCode::Backspace => edited_if(self.backspace()),
            KeyCode::Delete => edited_if(self.delete()),
            KeyCode::Left => moved_if(self.move_to(self.cursor.checked_sub(1))),
            KeyCode::Right => moved_if(self.move_to(Some(self.cursor + 1))),
            KeyCode::Home => moved_if(self.move_to(Some(0))),
            KeyCode::End => moved_if(self.move_to(Some(char_count(&self.value)))),
            _ => EditOutcome::Ignored,
        }
    }

    pub fn on_text_action(&mut self, action: TextAction) -> EditOutcome {
        let changed = match action {
            TextAction::DeleteWordLeft => delete_word_left(&mut self.value, &mut self.cursor),
            TextAction::DeleteWordRight => delete_word_right(&mut self.value, &mut self.cursor),
        };
        edited_if(changed)
    }

    pub fn insert(&mut self, ch: char) {
        let pos = self.cursor.min(char_count(&self.value));
        let byte = byte_index_at_char(&self.value, pos);
        self.value.insert(byte, ch);
        self.cursor = pos + 1;
    }

    fn backspace(&mut self) -> bool {
        let pos = self.cursor.min(char_count(&self.value));
        if pos == 0 {
            return false;
        }
        let byte = byte_index_at_char(&self.value, pos - 1);
        self.value.remove(byte);
        self.cursor = pos - 1;
        true
    }

    fn delete(&mut self) -> bool {
        let pos = self.cursor.min(char_count(&self.value));
        if pos >= char_count(&self.value) {
            return false;
        }
        let byte = byte_index_at_char(&self.value, pos);
        self.value.remove(byte);
        true
    }

    fn move_to(&mut self, target: Option<usize>) -> bool {
        let Some(target) = target else {
            return false;
        };
        let target = target.min(char_count(&self.value));
        if target == self.cursor {
            return false;
        }
        self.cursor = target;
        true
    }
}

fn edited_if(changed: bool) -> EditOutcome {
    if changed {
        EditOutcome::Edited
    } else {
        EditOutcome::Ignored
    }
}

fn moved_if(moved: bool) -> EditOutcome {
    if moved {
        EditOutcome::Moved
    } else {
        EditOutcome::Ignored
    }
}

pub fn char_count(value: &str) -> usize {
    value.chars().count()
}

pub fn display_width(value: &str, chars: usize) -> usize {
    value
        .chars()
        .take(chars)
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(1))
        .sum()
}

pub fn byte_index_at_char(value: &str, char_idx: usize) -> usize {
    value
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}

pub fn delete_word_left(value: &mut String, cursor: &mut usize) -> bool {
    let mut chars: Vec<char> = value.chars().collect();
    let end = (*cursor).min(chars.len());
    let mut start = end;
    while start > 0 && is_separator(chars[start - 1]) {
        start -= 1;
    }
    while start > 0 && !is_separator(chars[start - 1]) {
        start -= 1;
    }
    *cursor = start;
    if start == end {
        return false;
    }
    chars.drain(start..end);
    *value = chars.into_iter().collect();
    true
}

pub fn delete_word_right(value: &mut String, cursor: &mut usize) -> bool {
    let mut chars: Vec<char> = value.chars().collect();
    let start = (*cursor).min(chars.len());
    let mut end = start;
    while end < chars.len() && is_separator(chars[end]) {
        end += 1;
    }
    while end < chars.len() && !is_separator(chars[end]) {
        end += 1;
    }
    *cursor = start;
    if start == end {
        return false;
    }
    chars.drain(start..end);
    *value = chars.into_iter().collect();
    true
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '.' | '/' | ',' | '-' | '@' | '_' | ':')
}

#[cfg(test)]
mod tests {
    use super::{EditOutcome, LineEditor};
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
    use crate::widgets::traits::TextAction;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::plain(code)
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let mut editor = LineEditor::new("ac");
        editor.on_key(key(KeyCode::Left));
        assert_eq!(editor.on_key(key(KeyCode::Char('b'))), EditOutcome::Edited);
        assert_eq!(editor.value(), "abc");
        assert_eq!(editor.cursor(), 2);
    }

    #[test]
    fn backspace_at_start_is_ignored() {
        let mut editor = LineEditor::new("x");
        editor.on_key(key(KeyCode::Home));
        assert_eq!(editor.on_key(key(KeyCode::Backspace)), EditOutcome::Ignored);
        assert_eq!(editor.on_key(key(KeyCode::Delete)), EditOutcome::Edited);
        assert_eq!(editor.value(), "");
    }

    #[test]
    fn control_chords_are_left_to_bindings() {
        let mut editor = LineEditor::new("");
        let chord = KeyEvent {
            code: KeyCode::Char('s'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert_eq!(editor.on_key(chord), EditOutcome::Ignored);
        assert_eq!(editor.value(), "");
    }

    #[test]
    fn delete_word_left_stops_at_comma() {
        let mut editor = LineEditor::new("red,green");
        assert_eq!(
            editor.on_text_action(TextAction::DeleteWordLeft),
            EditOutcome::Edited
        );
        assert_eq!(editor.value(), "red,");
    }

    #[test]
    fn cursor_col_counts_wide_chars() {
        let editor = LineEditor::new("日本");
        assert_eq!(editor.cursor_col(), 4);
    }
}
