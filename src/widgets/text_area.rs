use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::Span;
use crate::widgets::text_edit::{self, EditOutcome, LineEditor};
use crate::widgets::traits::{DrawOutput, RenderContext, TextAction};

/// Multi-line buffer with a gutter and a fixed-height viewport.
#[derive(Debug, Clone)]
pub struct TextArea {
    /// Always at least one element.
    lines: Vec<String>,
    row: usize,
    col: usize,
    top: usize,
    height: usize,
}

impl TextArea {
    pub fn new(height: usize) -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            top: 0,
            height: height.max(1),
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replaces the buffer; the cursor returns to the top.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(String::from).collect();
        self.row = 0;
        self.col = 0;
        self.top = 0;
    }

    pub fn on_key(&mut self, key: KeyEvent) -> EditOutcome {
        let mods = key.modifiers;
        if mods.contains(KeyModifiers::CONTROL) || mods.contains(KeyModifiers::ALT) {
            return EditOutcome::Ignored;
        }
        let outcome = match key.code {
            KeyCode::Enter => {
                self.split_line();
                EditOutcome::Edited
            }
            KeyCode::Backspace if self.col == 0 => self.merge_with_prev(),
            KeyCode::Delete if self.col >= self.current_len() => self.merge_with_next(),
            KeyCode::Left if self.col == 0 && self.row > 0 => {
                self.row -= 1;
                self.col = self.current_len();
                EditOutcome::Moved
            }
            KeyCode::Right if self.col >= self.current_len() && self.row + 1 < self.lines.len() => {
                self.row += 1;
                self.col = 0;
                EditOutcome::Moved
            }
            KeyCode::Up if self.row > 0 => {
                self.row -= 1;
                self.col = self.col.min(self.current_len());
                EditOutcome::Moved
            }
            KeyCode::Down if self.row + 1 < self.lines.len() => {
                self.row += 1;
                self.col = self.col.min(self.current_len());
                EditOutcome::Moved
            }
            KeyCode::Up | KeyCode::Down => EditOutcome::Ignored,
            _ => self.with_line_editor(|editor| editor.on_key(key)),
        };
        self.keep_row_visible();
        outcome
    }

    pub fn on_text_action(&mut self, action: TextAction) -> EditOutcome {
        self.with_line_editor(|editor| editor.on_text_action(action))
    }

    pub fn draw(&self, ctx: &RenderContext, indent: usize, focused: bool) -> DrawOutput {
        let mut out = DrawOutput::new();
        let num_width = self.lines.len().to_string().len();
        let pad = " ".repeat(indent);

        for offset in 0..self.height {
            let idx = self.top + offset;
            let Some(line) = self.lines.get(idx) else {
                out.push(vec![Span::styled(
                    format!("{pad}│ {:>num_width$}", "~"),
                    ctx.theme.hint,
                )]);
                continue;
            };
            let gutter = format!("{pad}│ {:>num_width$} ", idx + 1);
            if focused && idx == self.row {
                out.mark_focus();
                out.set_cursor(gutter.chars().count() + text_edit::display_width(line, self.col));
            }
            out.push(vec![
                Span::styled(gutter, ctx.theme.hint),
                Span::new(line.clone()),
            ]);
        }

        if self.lines.len() > self.height {
            out.push_text(
                format!("{pad}  line {}/{}", self.row + 1, self.lines.len()),
                ctx.theme.hint,
            );
        }
        out
    }

    fn current_len(&self) -> usize {
        text_edit::char_count(&self.lines[self.row])
    }

    fn with_line_editor(&mut self, f: impl FnOnce(&mut LineEditor) -> EditOutcome) -> EditOutcome {
        let mut editor = LineEditor::at(self.lines[self.row].clone(), self.col);
        let outcome = f(&mut editor);
        self.col = editor.cursor();
        self.lines[self.row] = editor.value().to_string();
        outcome
    }

    fn split_line(&mut self) {
        let line = &self.lines[self.row];
        let byte = text_edit::byte_index_at_char(line, self.col.min(text_edit::char_count(line)));
        let right = line[byte..].to_string();
        self.lines[self.row].truncate(byte);
        self.row += 1;
        self.col = 0;
        self.lines.insert(self.row, right);
    }

    fn merge_with_prev(&mut self) -> EditOutcome {
        if self.row == 0 {
            return EditOutcome::Ignored;
        }
        let current = self.lines.remove(self.row);
        self.row -= 1;
        self.col = self.current_len();
        self.lines[self.row].push_str(&current);
        EditOutcome::Edited
    }

    fn merge_with_next(&mut self) -> EditOutcome {
        if self.row + 1 >= self.lines.len() {
            return EditOutcome::Ignored;
        }
        let next = self.lines.remove(self.row + 1);
        self.lines[self.row].push_str(&next);
        EditOutcome::Edited
    }

    fn keep_row_visible(&mut self) {
        if self.row < self.top {
            self.top = self.row;
        } else if self.row >= self.top + self.height {
            self.top = self.row + 1 - self.height;
        }
    }
}
