use crate::ui::span::{Span, SpanLine};
use crate::ui::style::Style;
use crate::widgets::text_edit::LineEditor;
use crate::widgets::traits::{DrawOutput, RenderContext};
use unicode_width::UnicodeWidthStr;

pub fn focus_marker(focused: bool) -> &'static str {
    if focused { "> " } else { "  " }
}

/// `> Label: value` line. A focused row shows `editor` (with its cursor)
/// instead of `value`; an empty value shows `placeholder`.
pub fn text_row(
    out: &mut DrawOutput,
    ctx: &RenderContext,
    indent: usize,
    label: &str,
    value: &str,
    placeholder: &str,
    editor: Option<&LineEditor>,
) {
    let focused = editor.is_some();
    let prefix = format!("{}{}{}: ", " ".repeat(indent), focus_marker(focused), label);
    let label_style = if focused { ctx.theme.focused } else { ctx.theme.label };

    let shown = editor.map(LineEditor::value).unwrap_or(value);
    let mut line: SpanLine = vec![Span::styled(prefix.clone(), label_style)];
    if shown.is_empty() {
        line.push(Span::styled(placeholder, ctx.theme.placeholder));
    } else {
        line.push(Span::new(shown));
    }

    if let Some(editor) = editor {
        out.mark_focus();
        out.set_cursor(UnicodeWidthStr::width(prefix.as_str()) + editor.cursor_col());
    }
    out.push(line);
}

/// `> [ Caption ]` line.
pub fn button_row(
    out: &mut DrawOutput,
    ctx: &RenderContext,
    indent: usize,
    caption: &str,
    focused: bool,
) {
    let style = if focused { ctx.theme.focused } else { ctx.theme.button };
    if focused {
        out.mark_focus();
    }
    out.push(vec![
        Span::new(format!("{}{}", " ".repeat(indent), focus_marker(focused))),
        Span::styled(format!("[ {caption} ]"), style),
    ]);
}

/// `> Label: ◀ value ▶` line for a left/right picker.
pub fn picker_row(
    out: &mut DrawOutput,
    ctx: &RenderContext,
    indent: usize,
    label: &str,
    value: &str,
    focused: bool,
) {
    let label_style = if focused { ctx.theme.focused } else { ctx.theme.label };
    if focused {
        out.mark_focus();
    }
    let value_style: Style = if focused { ctx.theme.heading } else { ctx.theme.label };
    out.push(vec![
        Span::styled(
            format!("{}{}{}: ", " ".repeat(indent), focus_marker(focused), label),
            label_style,
        ),
        Span::styled(format!("◀ {value} ▶"), value_style),
    ]);
}

#[cfg(test)]
mod tests {
    use super::{button_row, text_row};
    use crate::ui::span::line_text;
    use crate::ui::theme::Theme;
    use crate::widgets::text_edit::LineEditor;
    use crate::widgets::traits::{DrawOutput, RenderContext};

    #[test]
    fn focused_text_row_places_cursor_after_prefix() {
        let theme = Theme::default();
        let ctx = RenderContext { theme: &theme, width: 80 };
        let mut out = DrawOutput::new();
        out.blank();
        let editor = LineEditor::new("abc");
        text_row(&mut out, &ctx, 0, "Name", "", "empty", Some(&editor));

        assert_eq!(line_text(&out.lines[1]), "> Name: abc");
        let cursor = out.cursor.expect("cursor");
        assert_eq!((cursor.row, cursor.col), (1, 11));
        assert_eq!(out.focus_row, Some(1));
    }

    #[test]
    fn unfocused_empty_row_shows_placeholder() {
        let theme = Theme::default();
        let ctx = RenderContext { theme: &theme, width: 80 };
        let mut out = DrawOutput::new();
        text_row(&mut out, &ctx, 2, "Name", "", "empty", None);
        button_row(&mut out, &ctx, 0, "Go", false);
        assert_eq!(line_text(&out.lines[0]), "    Name: empty");
        assert_eq!(line_text(&out.lines[1]), "  [ Go ]");
        assert!(out.cursor.is_none());
    }
}
