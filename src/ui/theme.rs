use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub heading: Style,
    pub label: Style,
    pub hint: Style,
    pub error: Style,
    pub notice: Style,
    pub placeholder: Style,
    pub focused: Style,
    pub button: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::new().color(Color::Cyan).bold(),
            heading: Style::new().bold(),
            label: Style::new(),
            hint: Style::new().color(Color::DarkGrey),
            error: Style::new().color(Color::Red),
            notice: Style::new().color(Color::Yellow),
            placeholder: Style::new().color(Color::DarkGrey),
            focused: Style::new().color(Color::Cyan).bold(),
            button: Style::new().color(Color::Green),
        }
    }
}
