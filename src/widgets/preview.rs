//! Read-only rendering of a submitted form definition.
//!
//! [`render_preview`] is a pure function of the form name, its fields and the
//! preview's local input state. [`PreviewView`] owns that local state (typed
//! text, picked options) and routes file selections back into the builder.

use crate::core::builder::FormBuilderState;
use crate::core::field::{FieldType, FileRef, FormField};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::widgets::base::{button_row, focus_marker, text_row};
use crate::widgets::text_area::TextArea;
use crate::widgets::text_edit::{EditOutcome, LineEditor};
use crate::widgets::traits::{DrawOutput, InteractionResult, Notice, RenderContext, TextAction};
use std::fs;
use std::io;
use std::path::Path;

pub const TEXTAREA_ROWS: usize = 4;

/// Name shared by the radio buttons of the field at `index`.
pub fn radio_group(index: usize) -> String {
    format!("radio_{index}")
}

/// Local, never-persisted state behind one preview control.
#[derive(Debug, Clone)]
pub enum PreviewInput {
    Text(LineEditor),
    Textarea(TextArea),
    Dropdown { selected: usize },
    Checkbox { checked: Vec<bool>, highlight: usize },
    Radio { group: String, selected: Option<usize>, highlight: usize },
    File { path: LineEditor },
}

impl PreviewInput {
    pub fn for_field(index: usize, field: &FormField) -> Self {
        match field.field_type() {
            FieldType::Text => Self::Text(LineEditor::default()),
            FieldType::Textarea => Self::Textarea(TextArea::new(TEXTAREA_ROWS)),
            FieldType::Dropdown => Self::Dropdown { selected: 0 },
            FieldType::Checkbox => Self::Checkbox {
                checked: vec![false; field.options.len()],
                highlight: 0,
            },
            FieldType::Radio => Self::Radio {
                group: radio_group(index),
                selected: None,
                highlight: 0,
            },
            FieldType::File => Self::File {
                path: LineEditor::default(),
            },
        }
    }
}

/// Focus slot: one per field, then the two buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewFocus {
    Field(usize),
    Submit,
    EditForm,
}

pub fn render_preview(
    ctx: &RenderContext,
    name: &str,
    fields: &[FormField],
    inputs: &[PreviewInput],
    focus: Option<PreviewFocus>,
) -> DrawOutput {
    let mut out = DrawOutput::new();
    out.push_text(name.to_string(), ctx.theme.title);
    out.blank();

    for (index, (field, input)) in fields.iter().zip(inputs).enumerate() {
        let focused = focus == Some(PreviewFocus::Field(index));
        render_control(&mut out, ctx, field, input, focused);
        out.blank();
    }

    button_row(&mut out, ctx, 0, "Submit", focus == Some(PreviewFocus::Submit));
    button_row(&mut out, ctx, 0, "Edit Form", focus == Some(PreviewFocus::EditForm));
    out
}

fn render_control(
    out: &mut DrawOutput,
    ctx: &RenderContext,
    field: &FormField,
    input: &PreviewInput,
    focused: bool,
) {
    let heading = if focused { ctx.theme.focused } else { ctx.theme.heading };
    if focused {
        out.mark_focus();
    }
    out.push_text(format!("{}{}", focus_marker(focused), field.label), heading);

    match input {
        PreviewInput::Text(editor) => {
            text_row(out, ctx, 2, "Answer", editor.value(), "", focused.then_some(editor));
        }
        PreviewInput::Textarea(area) => {
            out.extend(area.draw(ctx, 4, focused));
        }
        PreviewInput::Dropdown { selected } => {
            let shown = field
                .options
                .get(*selected)
                .map(String::as_str)
                .unwrap_or("(no options)");
            out.push(vec![Span::new(format!("    ◀ {shown} ▶"))]);
        }
        PreviewInput::Checkbox { checked, highlight } => {
            for (idx, option) in field.options.iter().enumerate() {
                let mark = if checked.get(idx).copied().unwrap_or(false) { "x" } else { " " };
                let style = if focused && idx == *highlight {
                    ctx.theme.focused
                } else {
                    ctx.theme.label
                };
                out.push(vec![Span::styled(format!("    [{mark}] {option}"), style)]);
            }
        }
        PreviewInput::Radio { selected, highlight, .. } => {
            for (idx, option) in field.options.iter().enumerate() {
                let mark = if *selected == Some(idx) { "•" } else { " " };
                let style = if focused && idx == *highlight {
                    ctx.theme.focused
                } else {
                    ctx.theme.label
                };
                out.push(vec![Span::styled(format!("    ({mark}) {option}"), style)]);
            }
        }
        PreviewInput::File { path } => {
            let spec = field.file_spec();
            let editor = focused.then_some(path);
            let hint = "type a path, Enter to pick";
            text_row(out, ctx, 2, "Path", path.value(), hint, editor);
            if let Some(accept) = spec.and_then(|spec| spec.accept.as_deref()) {
                out.push_text(format!("    Accepts: {accept}"), ctx.theme.hint);
            }
            if let Some(file) = spec.and_then(|spec| spec.value.as_ref()) {
                out.push_text(format!("    File: {}", file.name), ctx.theme.label);
            }
        }
    }
}

/// File metadata lookup for a typed path. Contents are never opened.
pub fn file_ref_from_path(path: &Path) -> io::Result<FileRef> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a file", path.display()),
        ));
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    Ok(FileRef::new(name, mime))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewOutcome {
    Stay,
    EditRequested,
}

#[derive(Debug, Clone)]
pub struct PreviewView {
    inputs: Vec<PreviewInput>,
    focus: usize,
}

impl PreviewView {
    pub fn new(fields: &[FormField]) -> Self {
        Self {
            inputs: fields
                .iter()
                .enumerate()
                .map(|(index, field)| PreviewInput::for_field(index, field))
                .collect(),
            focus: 0,
        }
    }

    pub fn inputs(&self) -> &[PreviewInput] {
        &self.inputs
    }

    fn slots(&self) -> usize {
        self.inputs.len() + 2
    }

    pub fn focus(&self) -> PreviewFocus {
        match self.focus {
            idx if idx < self.inputs.len() => PreviewFocus::Field(idx),
            idx if idx == self.inputs.len() => PreviewFocus::Submit,
            _ => PreviewFocus::EditForm,
        }
    }

    pub fn focus_next(&mut self) -> bool {
        if self.focus + 1 < self.slots() {
            self.focus += 1;
            return true;
        }
        false
    }

    pub fn focus_prev(&mut self) -> bool {
        if self.focus > 0 {
            self.focus -= 1;
            return true;
        }
        false
    }

    pub fn draw(&self, ctx: &RenderContext, state: &FormBuilderState) -> DrawOutput {
        render_preview(ctx, state.name(), state.fields(), &self.inputs, Some(self.focus()))
    }

    pub fn on_key(
        &mut self,
        key: KeyEvent,
        state: &mut FormBuilderState,
    ) -> (InteractionResult, PreviewOutcome) {
        let focus = self.focus();
        let result = match focus {
            PreviewFocus::Field(index) => {
                let options = state.fields().get(index).map_or(0, |f| f.options.len());
                match self.inputs.get_mut(index) {
                    Some(PreviewInput::File { path }) if key.code == KeyCode::Enter => {
                        let path = path.value().to_string();
                        select_file(state, index, Path::new(&path))
                    }
                    Some(input) => control_key(input, options, key),
                    None => InteractionResult::ignored(),
                }
            }
            PreviewFocus::Submit if key.code == KeyCode::Enter => InteractionResult::handled(),
            PreviewFocus::EditForm if key.code == KeyCode::Enter => {
                return (InteractionResult::handled(), PreviewOutcome::EditRequested);
            }
            _ => InteractionResult::ignored(),
        };
        (result, PreviewOutcome::Stay)
    }

    pub fn on_text_action(&mut self, action: TextAction) -> InteractionResult {
        let PreviewFocus::Field(index) = self.focus() else {
            return InteractionResult::ignored();
        };
        let outcome = match self.inputs.get_mut(index) {
            Some(PreviewInput::Text(editor)) | Some(PreviewInput::File { path: editor }) => {
                editor.on_text_action(action)
            }
            Some(PreviewInput::Textarea(area)) => area.on_text_action(action),
            _ => EditOutcome::Ignored,
        };
        render_if(outcome)
    }
}

fn control_key(input: &mut PreviewInput, options: usize, key: KeyEvent) -> InteractionResult {
    match input {
        PreviewInput::Text(editor) | PreviewInput::File { path: editor } => {
            render_if(editor.on_key(key))
        }
        PreviewInput::Textarea(area) => render_if(area.on_key(key)),
        PreviewInput::Dropdown { selected } => match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if options > 0 => {
                *selected = step(*selected, options, key.code == KeyCode::Left);
                InteractionResult::handled()
            }
            _ => InteractionResult::ignored(),
        },
        PreviewInput::Checkbox { checked, highlight } => match key.code {
            KeyCode::Left | KeyCode::Right if options > 0 => {
                *highlight = step(*highlight, options, key.code == KeyCode::Left);
                InteractionResult::handled()
            }
            KeyCode::Char(' ') => match checked.get_mut(*highlight) {
                Some(flag) => {
                    *flag = !*flag;
                    InteractionResult::handled()
                }
                None => InteractionResult::ignored(),
            },
            _ => InteractionResult::ignored(),
        },
        PreviewInput::Radio { selected, highlight, .. } => match key.code {
            KeyCode::Left | KeyCode::Right if options > 0 => {
                *highlight = step(*highlight, options, key.code == KeyCode::Left);
                InteractionResult::handled()
            }
            KeyCode::Char(' ') if *highlight < options => {
                *selected = Some(*highlight);
                InteractionResult::handled()
            }
            _ => InteractionResult::ignored(),
        },
    }
}

fn select_file(state: &mut FormBuilderState, index: usize, path: &Path) -> InteractionResult {
    let file = match file_ref_from_path(path) {
        Ok(file) => file,
        Err(err) => {
            return InteractionResult::notify(Notice::error(format!(
                "Cannot use {}: {err}",
                path.display()
            )));
        }
    };
    let name = file.name.clone();
    match state.on_file_selected(index, file) {
        Ok(()) => InteractionResult::notify(Notice::info(format!("Selected {name}"))),
        Err(err) => InteractionResult::notify(Notice::error(err.to_string())),
    }
}

fn step(current: usize, len: usize, backwards: bool) -> usize {
    if backwards {
        (current + len - 1) % len
    } else {
        (current + 1) % len
    }
}

fn render_if(outcome: EditOutcome) -> InteractionResult {
    match outcome {
        EditOutcome::Ignored => InteractionResult::ignored(),
        EditOutcome::Edited | EditOutcome::Moved => InteractionResult::handled(),
    }
}
