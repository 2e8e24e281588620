use crate::core::builder::FormBuilderState;
use crate::settings::DEFAULT_TITLE;
use crate::terminal::KeyEvent;
use crate::widgets::builder_view::BuilderView;
use crate::widgets::traits::{
    Drawable, DrawOutput, InteractionResult, Interactive, Notice, NoticeLevel, RenderContext,
    TextAction, WidgetAction,
};

const KEY_HINTS: &str = concat!(
    "Tab/↓ next  Shift+Tab/↑ prev  Enter activate  ",
    "Ctrl+S save  Ctrl+L load  Ctrl+E edit  Ctrl+Q quit",
);

/// Top-level container: the title, the builder it mounts and a status line.
pub struct Shell {
    title: String,
    builder: BuilderView,
    notice: Option<Notice>,
    exit_requested: bool,
}

impl Shell {
    pub fn new(title: impl Into<String>, state: FormBuilderState) -> Self {
        Self {
            title: title.into(),
            builder: BuilderView::new(state),
            notice: None,
            exit_requested: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn builder(&self) -> &BuilderView {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut BuilderView {
        &mut self.builder
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) -> bool {
        self.notice.take().is_some()
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn should_exit(&self) -> bool {
        self.exit_requested
    }

    /// Returns true when the action changed what is on screen.
    pub fn apply_action(&mut self, action: WidgetAction) -> bool {
        match action {
            WidgetAction::Notify(notice) => {
                self.notice = Some(notice);
                true
            }
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, FormBuilderState::default())
    }
}

impl Drawable for Shell {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let mut out = DrawOutput::new();
        out.push_text(self.title.clone(), ctx.theme.title);
        out.blank();
        out.extend(self.builder.draw(ctx));
        out.blank();
        match &self.notice {
            Some(notice) => {
                let style = match notice.level {
                    NoticeLevel::Info => ctx.theme.notice,
                    NoticeLevel::Error => ctx.theme.error,
                };
                out.push_text(notice.message.clone(), style);
            }
            None => out.blank(),
        }
        out.push_text(KEY_HINTS, ctx.theme.hint);
        out
    }
}

impl Interactive for Shell {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        self.builder.on_key(key)
    }

    fn on_text_action(&mut self, action: TextAction) -> InteractionResult {
        self.builder.on_text_action(action)
    }

    fn focus_next(&mut self) -> InteractionResult {
        self.builder.focus_next()
    }

    fn focus_prev(&mut self) -> InteractionResult {
        self.builder.focus_prev()
    }
}

#[cfg(test)]
mod tests {
    use super::Shell;
    use crate::core::builder::FormBuilderState;
    use crate::ui::span::line_text;
    use crate::ui::theme::Theme;
    use crate::widgets::traits::{Drawable, Notice, RenderContext, WidgetAction};

    #[test]
    fn draws_title_then_builder() {
        let shell = Shell::default();
        let theme = Theme::default();
        let ctx = RenderContext { theme: &theme, width: 80 };
        let lines: Vec<String> = shell.draw(&ctx).lines.iter().map(line_text).collect();
        assert_eq!(lines[0], "Dynamic Form Generator");
        assert_eq!(lines[2], "Form Generator");
    }

    #[test]
    fn notices_replace_each_other_until_dismissed() {
        let mut shell = Shell::new("Custom", FormBuilderState::default());
        assert!(shell.apply_action(WidgetAction::Notify(Notice::info("one"))));
        assert!(shell.apply_action(WidgetAction::Notify(Notice::error("two"))));
        assert_eq!(shell.notice().map(|n| n.message.as_str()), Some("two"));
        assert!(shell.dismiss_notice());
        assert!(!shell.dismiss_notice());
        assert_eq!(shell.title(), "Custom");
    }
}
