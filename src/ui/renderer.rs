use crate::terminal::CursorPos;
use crate::ui::span::SpanLine;
use crate::widgets::traits::DrawOutput;

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
    /// Row the viewport keeps visible when there is no cursor.
    pub focus_row: Option<u16>,
}

impl RenderFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `out`, translating its local cursor to frame rows.
    pub fn push(&mut self, out: DrawOutput) {
        let row_offset = self.lines.len() as u16;
        if self.cursor.is_none()
            && let Some(local) = out.cursor
        {
            self.cursor = Some(CursorPos {
                col: local.col,
                row: row_offset.saturating_add(local.row),
            });
        }
        if self.focus_row.is_none() {
            self.focus_row = out.focus_row.map(|row| row_offset.saturating_add(row));
        }
        self.lines.extend(out.lines);
    }

    pub fn blank(&mut self) {
        self.lines.push(Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use super::RenderFrame;
    use crate::ui::style::Style;
    use crate::widgets::traits::DrawOutput;

    #[test]
    fn push_translates_cursor_and_focus() {
        let mut frame = RenderFrame::new();
        frame.blank();
        frame.blank();

        let mut out = DrawOutput::new();
        out.push_text("a", Style::new());
        out.mark_focus();
        out.set_cursor(3);
        out.push_text("b", Style::new());
        frame.push(out);

        let cursor = frame.cursor.expect("cursor");
        assert_eq!((cursor.row, cursor.col), (3, 3));
        assert_eq!(frame.focus_row, Some(3));
        assert_eq!(frame.lines.len(), 4);
    }
}
