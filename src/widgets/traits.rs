use crate::terminal::{CursorPos, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::Style;
use crate::ui::theme::Theme;

// ---------------------------------------------------------------------------
// Render context & output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub width: u16,
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
    /// Text cursor, relative to the first line of this output.
    pub cursor: Option<CursorPos>,
    /// Row of the focused control, used to keep it on screen.
    pub focus_row: Option<u16>,
}

impl DrawOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self) -> u16 {
        self.lines.len() as u16
    }

    pub fn push(&mut self, line: SpanLine) {
        self.lines.push(line);
    }

    pub fn push_text(&mut self, text: impl Into<String>, style: Style) {
        self.lines.push(vec![Span::styled(text, style)]);
    }

    pub fn blank(&mut self) {
        self.lines.push(Vec::new());
    }

    /// Marks the next pushed line as the focused one.
    pub fn mark_focus(&mut self) {
        if self.focus_row.is_none() {
            self.focus_row = Some(self.row());
        }
    }

    /// Places the cursor on the next pushed line at display column `col`.
    pub fn set_cursor(&mut self, col: usize) {
        self.cursor = Some(CursorPos {
            col: col.min(u16::MAX as usize) as u16,
            row: self.row(),
        });
    }

    /// Appends `other`, shifting its cursor and focus row below current lines.
    pub fn extend(&mut self, other: DrawOutput) {
        let offset = self.row();
        if self.cursor.is_none() {
            self.cursor = other.cursor.map(|cur| CursorPos {
                col: cur.col,
                row: cur.row.saturating_add(offset),
            });
        }
        if self.focus_row.is_none() {
            self.focus_row = other.focus_row.map(|row| row.saturating_add(offset));
        }
        self.lines.extend(other.lines);
    }
}

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One-line status message shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetAction {
    Notify(Notice),
}

#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }

    pub fn notify(notice: Notice) -> Self {
        Self::with_action(WidgetAction::Notify(notice))
    }

    pub fn merge(&mut self, other: Self) {
        self.handled |= other.handled;
        self.request_render |= other.request_render;
        self.actions.extend(other.actions);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAction {
    DeleteWordLeft,
    DeleteWordRight,
}

// ---------------------------------------------------------------------------
// Drawable / Interactive
// ---------------------------------------------------------------------------

pub trait Drawable {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput;
}

pub trait Interactive {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult;

    fn on_text_action(&mut self, _action: TextAction) -> InteractionResult {
        InteractionResult::ignored()
    }

    fn focus_next(&mut self) -> InteractionResult;
    fn focus_prev(&mut self) -> InteractionResult;
}
