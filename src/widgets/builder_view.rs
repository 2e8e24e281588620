use crate::core::builder::{FieldEdit, FormBuilderState};
use crate::core::field::{FieldType, split_options};
use crate::error::EditError;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::widgets::base::{button_row, picker_row, text_row};
use crate::widgets::preview::{PreviewOutcome, PreviewView};
use crate::widgets::text_area::TextArea;
use crate::widgets::text_edit::{EditOutcome, LineEditor};
use crate::widgets::traits::{
    Drawable, DrawOutput, InteractionResult, Interactive, Notice, RenderContext, TextAction,
};

pub const CONFIG_ROWS: usize = 8;
pub const ERROR_SUMMARY: &str = "Please fix the following errors:";

/// One focusable row of the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    FormName,
    Qualification,
    QualificationMarks,
    AddField,
    Label(usize),
    Options(usize),
    Accept(usize),
    Remove(usize),
    Submit,
    Save,
    Load,
    Config,
}

impl Target {
    fn edits_text(self) -> bool {
        matches!(
            self,
            Self::FormName
                | Self::QualificationMarks
                | Self::Label(_)
                | Self::Options(_)
                | Self::Accept(_)
        )
    }
}

/// Focus order for the current state. Rows come and go with the field list
/// and the qualification selection.
pub fn targets(state: &FormBuilderState) -> Vec<Target> {
    let mut out = vec![Target::FormName, Target::Qualification];
    if state.qualification().marks_label().is_some() {
        out.push(Target::QualificationMarks);
    }
    out.push(Target::AddField);
    for (index, field) in state.fields().iter().enumerate() {
        out.push(Target::Label(index));
        if field.field_type().has_options() {
            out.push(Target::Options(index));
        }
        if field.field_type() == FieldType::File {
            out.push(Target::Accept(index));
        }
        out.push(Target::Remove(index));
    }
    out.extend([Target::Submit, Target::Save, Target::Load, Target::Config]);
    out
}

fn options_caption(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Dropdown => "Dropdown Options (comma-separated)",
        _ => "Options (comma-separated)",
    }
}

pub struct BuilderView {
    state: FormBuilderState,
    focus: usize,
    add_choice: usize,
    editor: LineEditor,
    config: TextArea,
    preview: Option<PreviewView>,
}

impl BuilderView {
    pub fn new(state: FormBuilderState) -> Self {
        let config = TextArea::new(CONFIG_ROWS).with_text(state.config_text());
        let preview = state
            .is_submitted()
            .then(|| PreviewView::new(state.fields()));
        let mut view = Self {
            state,
            focus: 0,
            add_choice: 0,
            editor: LineEditor::default(),
            config,
            preview,
        };
        view.sync_editor();
        view
    }

    pub fn state(&self) -> &FormBuilderState {
        &self.state
    }

    pub fn current(&self) -> Option<Target> {
        targets(&self.state).get(self.focus).copied()
    }

    pub fn add_choice(&self) -> FieldType {
        FieldType::ALL[self.add_choice % FieldType::ALL.len()]
    }

    /// Moves focus to `target` if it is currently on screen.
    pub fn focus_target(&mut self, target: Target) -> bool {
        let Some(idx) = targets(&self.state).iter().position(|t| *t == target) else {
            return false;
        };
        self.set_focus(idx);
        true
    }

    fn set_focus(&mut self, idx: usize) {
        let len = targets(&self.state).len();
        self.focus = idx.min(len.saturating_sub(1));
        self.sync_editor();
        self.sync_config();
    }

    fn move_focus(&mut self, forward: bool) -> bool {
        let len = targets(&self.state).len();
        let next = if forward {
            (self.focus + 1 < len).then_some(self.focus + 1)
        } else {
            self.focus.checked_sub(1)
        };
        match next {
            Some(idx) => {
                self.set_focus(idx);
                true
            }
            None => false,
        }
    }

    fn text_value(&self, target: Target) -> String {
        let field = |index: usize| self.state.fields().get(index);
        match target {
            Target::FormName => self.state.name().to_string(),
            Target::QualificationMarks => self.state.qualification().marks().to_string(),
            Target::Label(index) => field(index).map(|f| f.label.clone()).unwrap_or_default(),
            Target::Options(index) => field(index).map(|f| f.options_text()).unwrap_or_default(),
            Target::Accept(index) => field(index)
                .and_then(|f| f.file_spec())
                .and_then(|spec| spec.accept.clone())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn sync_editor(&mut self) {
        if let Some(target) = self.current()
            && target.edits_text()
        {
            self.editor = LineEditor::new(self.text_value(target));
        }
    }

    fn sync_config(&mut self) {
        if self.current() != Some(Target::Config) && self.config.text() != self.state.config_text()
        {
            self.config.set_text(self.state.config_text());
        }
    }

    fn commit_editor(&mut self, target: Target) -> Result<(), EditError> {
        let value = self.editor.value().to_string();
        match target {
            Target::FormName => self.state.set_name(value),
            Target::QualificationMarks => *self.state.qualification_mut().marks_mut() = value,
            Target::Label(index) => self.state.edit_field(index, FieldEdit::Label(value))?,
            Target::Options(index) => {
                let options = split_options(&value);
                self.state.edit_field(index, FieldEdit::Options(options))?;
            }
            Target::Accept(index) => self.state.edit_field(index, FieldEdit::Accept(Some(value)))?,
            _ => {}
        }
        Ok(())
    }

    fn after_outcome(&mut self, target: Target, outcome: EditOutcome) -> InteractionResult {
        match outcome {
            EditOutcome::Ignored => InteractionResult::ignored(),
            EditOutcome::Moved => InteractionResult::handled(),
            EditOutcome::Edited => match self.commit_editor(target) {
                Ok(()) => InteractionResult::handled(),
                Err(err) => InteractionResult::notify(Notice::error(err.to_string())),
            },
        }
    }

    pub fn submit(&mut self) -> InteractionResult {
        if self.state.is_submitted() {
            return InteractionResult::ignored();
        }
        match self.state.submit() {
            Ok(()) => {
                self.preview = Some(PreviewView::new(self.state.fields()));
                InteractionResult::notify(Notice::info("Form submitted"))
            }
            Err(errors) => InteractionResult::notify(Notice::error(format!(
                "{} field(s) need attention",
                errors.len()
            ))),
        }
    }

    pub fn edit_form(&mut self) -> InteractionResult {
        if !self.state.is_submitted() {
            return InteractionResult::ignored();
        }
        self.state.edit();
        self.preview = None;
        self.set_focus(self.focus);
        InteractionResult::handled()
    }

    pub fn save(&mut self) -> InteractionResult {
        self.state.save_config();
        self.config.set_text(self.state.config_text());
        InteractionResult::notify(Notice::info("Form configuration saved"))
    }

    pub fn load(&mut self) -> InteractionResult {
        match self.state.load_config() {
            Ok(()) => {
                self.config.set_text(self.state.config_text());
                self.set_focus(self.focus);
                InteractionResult::notify(Notice::info("Form configuration loaded"))
            }
            Err(err) => InteractionResult::notify(Notice::error(format!(
                "Error loading form configuration: {err}"
            ))),
        }
    }

    fn press_button(&mut self, target: Target) -> InteractionResult {
        match target {
            Target::AddField => {
                let index = self.state.add_field(self.add_choice());
                self.focus_target(Target::Label(index));
                InteractionResult::handled()
            }
            Target::Remove(index) => {
                self.state.remove_field(index);
                if !self.focus_target(Target::Label(index)) {
                    let last = index.checked_sub(1).map(Target::Remove);
                    if !last.is_some_and(|t| self.focus_target(t)) {
                        self.focus_target(Target::AddField);
                    }
                }
                InteractionResult::handled()
            }
            Target::Submit => self.submit(),
            Target::Save => self.save(),
            Target::Load => self.load(),
            _ => InteractionResult::ignored(),
        }
    }

    fn on_builder_key(&mut self, key: KeyEvent) -> InteractionResult {
        let Some(target) = self.current() else {
            return InteractionResult::ignored();
        };

        if target == Target::Config {
            let outcome = self.config.on_key(key);
            if outcome == EditOutcome::Edited {
                self.state.set_config_text(self.config.text());
            }
            if outcome != EditOutcome::Ignored {
                return InteractionResult::handled();
            }
        }

        match key.code {
            KeyCode::Up | KeyCode::Down => {
                return if self.move_focus(key.code == KeyCode::Down) {
                    InteractionResult::handled()
                } else {
                    InteractionResult::ignored()
                };
            }
            KeyCode::Left | KeyCode::Right if target == Target::Qualification => {
                let forward = key.code == KeyCode::Right;
                self.state.qualification_mut().cycle(forward);
                return InteractionResult::handled();
            }
            KeyCode::Left | KeyCode::Right if target == Target::AddField => {
                let len = FieldType::ALL.len();
                self.add_choice = if key.code == KeyCode::Right {
                    (self.add_choice + 1) % len
                } else {
                    (self.add_choice + len - 1) % len
                };
                return InteractionResult::handled();
            }
            KeyCode::Enter if target.edits_text() => {
                self.move_focus(true);
                return InteractionResult::handled();
            }
            KeyCode::Enter => return self.press_button(target),
            _ => {}
        }

        if target.edits_text() {
            let outcome = self.editor.on_key(key);
            return self.after_outcome(target, outcome);
        }
        InteractionResult::ignored()
    }

    fn draw_builder(&self, ctx: &RenderContext) -> DrawOutput {
        let mut out = DrawOutput::new();
        let current = self.current();
        let editor_for = |target: Target| (current == Some(target)).then_some(&self.editor);
        let state = &self.state;

        out.push_text("Form Generator", ctx.theme.heading);
        out.blank();
        text_row(
            &mut out,
            ctx,
            0,
            "Form Name",
            state.name(),
            "untitled form",
            editor_for(Target::FormName),
        );

        let qualification = state.qualification();
        let selected = qualification
            .selected()
            .map(|q| q.caption())
            .unwrap_or("<none>");
        picker_row(
            &mut out,
            ctx,
            0,
            "Qualification",
            selected,
            current == Some(Target::Qualification),
        );
        if qualification.shows_panel() {
            out.push_text("    Qualification Specific Fields", ctx.theme.heading);
            if let Some(label) = qualification.marks_label() {
                text_row(
                    &mut out,
                    ctx,
                    4,
                    &label,
                    qualification.marks(),
                    "",
                    editor_for(Target::QualificationMarks),
                );
            }
        }

        picker_row(
            &mut out,
            ctx,
            0,
            "Add Field",
            self.add_choice().add_caption(),
            current == Some(Target::AddField),
        );
        out.blank();

        if !state.errors().is_empty() {
            out.push_text(ERROR_SUMMARY, ctx.theme.error);
            for line in state.errors().summary_lines() {
                out.push_text(format!("  - {line}"), ctx.theme.error);
            }
            out.blank();
        }

        if state.fields().is_empty() {
            out.push_text("  No fields yet. Pick a type above and press Enter.", ctx.theme.hint);
            out.blank();
        }

        for (index, field) in state.fields().iter().enumerate() {
            let field_type = field.field_type();
            out.push_text(format!("Field {} ({field_type})", index + 1), ctx.theme.heading);
            text_row(
                &mut out,
                ctx,
                2,
                "Label",
                &field.label,
                "",
                editor_for(Target::Label(index)),
            );
            if field_type.has_options() {
                text_row(
                    &mut out,
                    ctx,
                    2,
                    options_caption(field_type),
                    &field.options_text(),
                    "",
                    editor_for(Target::Options(index)),
                );
            }
            if let Some(spec) = field.file_spec() {
                text_row(
                    &mut out,
                    ctx,
                    2,
                    "Accept",
                    spec.accept.as_deref().unwrap_or(""),
                    "any type, e.g. image/png,application/pdf",
                    editor_for(Target::Accept(index)),
                );
                if let Some(file) = &spec.value {
                    out.push_text(format!("    File: {}", file.name), ctx.theme.label);
                }
            }
            if let Some(message) = state.errors().get(index) {
                out.push(vec![Span::styled(format!("    ! {message}"), ctx.theme.error)]);
            }
            button_row(&mut out, ctx, 2, "Remove", current == Some(Target::Remove(index)));
            out.blank();
        }

        button_row(&mut out, ctx, 0, "Submit", current == Some(Target::Submit));
        button_row(&mut out, ctx, 0, "Save", current == Some(Target::Save));
        button_row(&mut out, ctx, 0, "Load", current == Some(Target::Load));
        out.blank();

        let config_focused = current == Some(Target::Config);
        let style = if config_focused { ctx.theme.focused } else { ctx.theme.label };
        out.push_text("Configuration (JSON)", style);
        out.extend(self.config.draw(ctx, 2, config_focused));
        out
    }
}

impl Drawable for BuilderView {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        match &self.preview {
            Some(preview) if self.state.is_submitted() => preview.draw(ctx, &self.state),
            _ => self.draw_builder(ctx),
        }
    }
}

impl Interactive for BuilderView {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if self.state.is_submitted()
            && let Some(preview) = self.preview.as_mut()
        {
            let (mut result, outcome) = preview.on_key(key, &mut self.state);
            if outcome == PreviewOutcome::EditRequested {
                result.merge(self.edit_form());
            }
            return result;
        }
        let result = self.on_builder_key(key);
        self.sync_config();
        result
    }

    fn on_text_action(&mut self, action: TextAction) -> InteractionResult {
        if self.state.is_submitted()
            && let Some(preview) = self.preview.as_mut()
        {
            return preview.on_text_action(action);
        }
        match self.current() {
            Some(Target::Config) => {
                let outcome = self.config.on_text_action(action);
                if outcome == EditOutcome::Edited {
                    self.state.set_config_text(self.config.text());
                }
                if outcome == EditOutcome::Ignored {
                    InteractionResult::ignored()
                } else {
                    InteractionResult::handled()
                }
            }
            Some(target) if target.edits_text() => {
                let outcome = self.editor.on_text_action(action);
                let result = self.after_outcome(target, outcome);
                self.sync_config();
                result
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn focus_next(&mut self) -> InteractionResult {
        let moved = if self.state.is_submitted()
            && let Some(preview) = self.preview.as_mut()
        {
            preview.focus_next()
        } else {
            self.move_focus(true)
        };
        if moved {
            InteractionResult::handled()
        } else {
            InteractionResult::ignored()
        }
    }

    fn focus_prev(&mut self) -> InteractionResult {
        let moved = if self.state.is_submitted()
            && let Some(preview) = self.preview.as_mut()
        {
            preview.focus_prev()
        } else {
            self.move_focus(false)
        };
        if moved {
            InteractionResult::handled()
        } else {
            InteractionResult::ignored()
        }
    }
}
