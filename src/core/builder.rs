use crate::core::accept::AcceptFilter;
use crate::core::config;
use crate::core::definition::FormDefinition;
use crate::core::field::{FieldType, FileRef, FormField};
use crate::core::qualification::QualificationState;
use crate::core::validation::{ValidationPolicy, ValidationResult, validate_fields};
use crate::error::{EditError, FileSelectError, ImportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuilderMode {
    #[default]
    Editing,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Label(String),
    Options(Vec<String>),
    Accept(Option<String>),
}

/// Everything the builder owns: the definition being assembled, the last
/// validation pass, the editing/submitted mode and the auxiliary inputs that
/// never reach the definition.
#[derive(Debug, Clone)]
pub struct FormBuilderState {
    definition: FormDefinition,
    errors: ValidationResult,
    mode: BuilderMode,
    policy: ValidationPolicy,
    qualification: QualificationState,
    config_text: String,
}

impl Default for FormBuilderState {
    fn default() -> Self {
        Self::new(ValidationPolicy::default())
    }
}

impl FormBuilderState {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self {
            definition: FormDefinition::default(),
            errors: ValidationResult::new(),
            mode: BuilderMode::Editing,
            policy,
            qualification: QualificationState::default(),
            config_text: config::export_config(&[]),
        }
    }

    pub fn with_fields(mut self, fields: Vec<FormField>) -> Self {
        self.definition.fields = fields;
        self.fields_changed();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.definition.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.definition.name = name.into();
    }

    pub fn fields(&self) -> &[FormField] {
        &self.definition.fields
    }

    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    pub fn mode(&self) -> BuilderMode {
        self.mode
    }

    pub fn is_submitted(&self) -> bool {
        self.mode == BuilderMode::Submitted
    }

    pub fn qualification(&self) -> &QualificationState {
        &self.qualification
    }

    pub fn qualification_mut(&mut self) -> &mut QualificationState {
        &mut self.qualification
    }

    /// Editable JSON buffer; regenerated whenever the field list changes.
    pub fn config_text(&self) -> &str {
        &self.config_text
    }

    pub fn set_config_text(&mut self, text: impl Into<String>) {
        self.config_text = text.into();
    }

    pub fn add_field(&mut self, field_type: FieldType) -> usize {
        self.definition.fields.push(FormField::new(field_type));
        self.fields_changed();
        let index = self.definition.fields.len() - 1;
        tracing::debug!(index, %field_type, "field added");
        index
    }

    /// Out-of-range indexes leave the state alone.
    pub fn remove_field(&mut self, index: usize) -> Option<FormField> {
        if index >= self.definition.fields.len() {
            return None;
        }
        let removed = self.definition.fields.remove(index);
        self.errors.shift_after_removal(index);
        self.fields_changed();
        tracing::debug!(index, field_type = %removed.field_type(), "field removed");
        Some(removed)
    }

    pub fn edit_field(&mut self, index: usize, edit: FieldEdit) -> Result<(), EditError> {
        let len = self.definition.fields.len();
        let field = self
            .definition
            .field_mut(index)
            .ok_or(EditError::OutOfRange { index, len })?;
        match edit {
            FieldEdit::Label(label) => field.label = label,
            FieldEdit::Options(options) => field.options = options,
            FieldEdit::Accept(accept) => {
                let spec = field
                    .file_spec_mut()
                    .ok_or(EditError::NotAFileField { index })?;
                spec.accept = accept.filter(|value| !value.is_empty());
            }
        }
        self.fields_changed();
        Ok(())
    }

    pub fn validate(&mut self) -> &ValidationResult {
        self.errors = validate_fields(&self.definition.fields, &self.policy);
        &self.errors
    }

    /// Moves to `Submitted` only when validation comes back clean.
    pub fn submit(&mut self) -> Result<(), ValidationResult> {
        if self.validate().is_empty() {
            self.mode = BuilderMode::Submitted;
            tracing::info!(fields = self.definition.fields.len(), "form submitted");
            Ok(())
        } else {
            tracing::warn!(errors = self.errors.len(), "form validation failed");
            Err(self.errors.clone())
        }
    }

    /// Back to editing with every entered value kept.
    pub fn edit(&mut self) {
        self.mode = BuilderMode::Editing;
    }

    pub fn export_config(&self) -> String {
        config::export_config(&self.definition.fields)
    }

    /// Replaces the field list only if `text` parses.
    pub fn import_config(&mut self, text: &str) -> Result<(), ImportError> {
        let fields = config::import_config(text)?;
        self.definition.fields = fields;
        self.errors.clear();
        self.fields_changed();
        tracing::info!(fields = self.definition.fields.len(), "form configuration loaded");
        Ok(())
    }

    pub fn save_config(&mut self) -> String {
        let json = self.export_config();
        tracing::info!(config = %json, "form configuration saved");
        self.config_text.clone_from(&json);
        json
    }

    pub fn load_config(&mut self) -> Result<(), ImportError> {
        let text = self.config_text.clone();
        self.import_config(&text).inspect_err(|err| {
            tracing::error!(error = %err, "error loading form configuration");
        })
    }

    /// Stores `file` on a file field unless its `accept` filter refuses it.
    pub fn on_file_selected(
        &mut self,
        index: usize,
        file: FileRef,
    ) -> Result<(), FileSelectError> {
        let html = self.policy.html_accept;
        let len = self.definition.fields.len();
        let spec = self
            .definition
            .field_mut(index)
            .ok_or(EditError::OutOfRange { index, len })?
            .file_spec_mut()
            .ok_or(EditError::NotAFileField { index })?;

        if let Some(accept) = spec.accept.as_deref()
            && !AcceptFilter::parse(accept, html).accepts(&file)
        {
            tracing::warn!(
                index,
                file = %file.name,
                mime = %file.mime,
                accept,
                "file rejected"
            );
            return Err(FileSelectError::Rejected {
                name: file.name,
                mime: file.mime,
            });
        }

        spec.value = Some(file);
        self.fields_changed();
        Ok(())
    }

    fn fields_changed(&mut self) {
        self.config_text = self.export_config();
    }
}

#[cfg(test)]
mod tests {
    use super::{BuilderMode, FieldEdit, FormBuilderState};
    use crate::core::field::{FieldType, FileRef, FormField, split_options};
    use crate::core::validation::ValidationPolicy;
    use crate::error::{EditError, FileSelectError};

    fn labelled(field_type: FieldType, label: &str) -> FormField {
        FormField::new(field_type).with_label(label)
    }

    #[test]
    fn add_field_appends_blank_field() {
        let mut state = FormBuilderState::default();
        assert_eq!(state.add_field(FieldType::Text), 0);
        assert_eq!(state.add_field(FieldType::File), 1);
        assert_eq!(state.fields()[1], FormField::new(FieldType::File));
    }

    #[test]
    fn remove_field_shifts_followers() {
        let mut state = FormBuilderState::default().with_fields(vec![
            labelled(FieldType::Text, "a"),
            labelled(FieldType::Text, "b"),
            labelled(FieldType::Text, "c"),
        ]);

        let removed = state.remove_field(1).expect("in range");
        assert_eq!(removed.label, "b");
        let labels: Vec<_> = state.fields().iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "c"]);
    }

    #[test]
    fn remove_field_out_of_range_is_noop() {
        let mut state =
            FormBuilderState::default().with_fields(vec![labelled(FieldType::Text, "a")]);
        assert!(state.remove_field(5).is_none());
        assert_eq!(state.fields().len(), 1);
    }

    #[test]
    fn remove_field_keeps_errors_aligned() {
        let mut state = FormBuilderState::default().with_fields(vec![
            FormField::new(FieldType::Text),
            labelled(FieldType::Text, "ok"),
            FormField::new(FieldType::Radio).with_label("r"),
        ]);
        state.validate();
        state.remove_field(0);
        assert_eq!(state.errors().get(0), None);
        assert_eq!(state.errors().get(1), Some("radio must have options"));
    }

    #[test]
    fn edit_field_updates_one_attribute() {
        let mut state = FormBuilderState::default();
        state.add_field(FieldType::Checkbox);
        state
            .edit_field(0, FieldEdit::Label("Hobbies".into()))
            .expect("label");
        state
            .edit_field(0, FieldEdit::Options(split_options("chess,go")))
            .expect("options");
        assert_eq!(state.fields()[0].label, "Hobbies");
        assert_eq!(state.fields()[0].options, vec!["chess", "go"]);
    }

    #[test]
    fn edit_field_rejects_bad_targets() {
        let mut state = FormBuilderState::default();
        state.add_field(FieldType::Text);
        assert_eq!(
            state.edit_field(3, FieldEdit::Label("x".into())),
            Err(EditError::OutOfRange { index: 3, len: 1 })
        );
        assert_eq!(
            state.edit_field(0, FieldEdit::Accept(Some("image/*".into()))),
            Err(EditError::NotAFileField { index: 0 })
        );
    }

    #[test]
    fn submit_requires_clean_validation() {
        let mut state = FormBuilderState::default();
        state.add_field(FieldType::Dropdown);

        let errors = state.submit().expect_err("invalid");
        assert_eq!(errors.get(0), Some("dropdown must have options"));
        assert_eq!(state.mode(), BuilderMode::Editing);
        assert_eq!(state.errors().len(), 1);

        state.edit_field(0, FieldEdit::Label("City".into())).expect("label");
        state
            .edit_field(0, FieldEdit::Options(vec!["Pune".into()]))
            .expect("options");
        state.submit().expect("valid");
        assert_eq!(state.mode(), BuilderMode::Submitted);
        assert!(state.errors().is_empty());
    }

    #[test]
    fn edit_returns_to_editing_with_data() {
        let mut state = FormBuilderState::default()
            .with_name("Signup")
            .with_fields(vec![labelled(FieldType::Text, "Name")]);
        state.submit().expect("valid");
        state.edit();
        assert_eq!(state.mode(), BuilderMode::Editing);
        assert_eq!(state.name(), "Signup");
        assert_eq!(state.fields().len(), 1);
    }

    #[test]
    fn empty_form_submits() {
        let mut state = FormBuilderState::default();
        assert!(state.submit().is_ok());
        assert!(state.is_submitted());
    }

    #[test]
    fn strict_policy_flags_checkbox() {
        let mut state = FormBuilderState::new(ValidationPolicy::strict())
            .with_fields(vec![labelled(FieldType::Checkbox, "Hobbies")]);
        assert!(state.submit().is_err());
    }

    #[test]
    fn failed_import_leaves_state_untouched() {
        let mut state =
            FormBuilderState::default().with_fields(vec![labelled(FieldType::Text, "Name")]);
        let before = state.fields().to_vec();
        assert!(state.import_config("not json").is_err());
        assert_eq!(state.fields(), before.as_slice());
    }

    #[test]
    fn import_replaces_fields_and_clears_errors() {
        let mut state = FormBuilderState::default();
        state.add_field(FieldType::Text);
        state.validate();
        state
            .import_config(r#"[{"type":"radio","label":"Size","options":["S"]}]"#)
            .expect("import");
        assert_eq!(state.fields().len(), 1);
        assert_eq!(state.fields()[0].field_type(), FieldType::Radio);
        assert!(state.errors().is_empty());
    }

    #[test]
    fn config_buffer_tracks_fields_until_loaded() {
        let mut state = FormBuilderState::default();
        state.add_field(FieldType::Text);
        state.edit_field(0, FieldEdit::Label("Name".into())).expect("label");
        assert_eq!(state.config_text(), state.export_config());

        state.set_config_text(r#"[{"type":"textarea","label":"Bio"}]"#);
        state.load_config().expect("load");
        assert_eq!(state.fields()[0].field_type(), FieldType::Textarea);
        assert_eq!(state.config_text(), state.export_config());

        state.set_config_text("{broken");
        assert!(state.load_config().is_err());
        assert_eq!(state.fields()[0].label, "Bio");
        assert_eq!(state.config_text(), "{broken");
    }

    #[test]
    fn save_config_refreshes_buffer() {
        let mut state =
            FormBuilderState::default().with_fields(vec![labelled(FieldType::Text, "Name")]);
        state.set_config_text("scratch");
        let json = state.save_config();
        assert_eq!(json, state.export_config());
        assert_eq!(state.config_text(), json);
    }

    #[test]
    fn qualification_stays_out_of_export() {
        let mut state = FormBuilderState::default();
        state
            .qualification_mut()
            .select(crate::core::qualification::Qualification::from_value("HSC"));
        state.qualification_mut().marks_mut().push_str("91");
        assert_eq!(state.export_config(), "[]");
        assert!(state.validate().is_empty());
    }

    #[test]
    fn file_selection_respects_accept() {
        let photo = labelled(FieldType::File, "Photo").with_accept("image/png, image/jpeg");
        let mut state = FormBuilderState::default().with_fields(vec![photo]);

        let err = state
            .on_file_selected(0, FileRef::new("notes.txt", "text/plain"))
            .expect_err("rejected");
        assert!(matches!(err, FileSelectError::Rejected { .. }));
        assert_eq!(err.to_string(), "Invalid file type. Please upload a valid file.");
        assert!(state.fields()[0].file_spec().and_then(|s| s.value.as_ref()).is_none());

        state
            .on_file_selected(0, FileRef::new("me.jpg", "image/jpeg"))
            .expect("accepted");
        assert_eq!(
            state.fields()[0]
                .file_spec()
                .and_then(|s| s.value.as_ref())
                .map(|f| f.name.as_str()),
            Some("me.jpg")
        );
    }

    #[test]
    fn wildcard_accept_is_literal_by_default() {
        let photo = labelled(FieldType::File, "Photo").with_accept("image/*");
        let mut state = FormBuilderState::default().with_fields(vec![photo.clone()]);
        let err = state
            .on_file_selected(0, FileRef::new("cat.png", "image/png"))
            .expect_err("rejected");
        assert!(matches!(err, FileSelectError::Rejected { .. }));

        let policy = ValidationPolicy {
            html_accept: true,
            ..ValidationPolicy::default()
        };
        let mut state = FormBuilderState::new(policy).with_fields(vec![photo]);
        state
            .on_file_selected(0, FileRef::new("cat.png", "image/png"))
            .expect("accepted");
    }

    #[test]
    fn file_selection_without_accept_takes_anything() {
        let mut state =
            FormBuilderState::default().with_fields(vec![labelled(FieldType::File, "Any")]);
        state
            .on_file_selected(0, FileRef::new("a.bin", "application/octet-stream"))
            .expect("accepted");
    }

    #[test]
    fn file_selection_on_text_field_fails() {
        let mut state =
            FormBuilderState::default().with_fields(vec![labelled(FieldType::Text, "Name")]);
        let err = state
            .on_file_selected(0, FileRef::new("a", "text/plain"))
            .expect_err("not a file field");
        assert_eq!(err, FileSelectError::Field(EditError::NotAFileField { index: 0 }));
    }
}
