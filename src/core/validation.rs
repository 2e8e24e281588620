use crate::core::field::{FieldType, FormField};
use serde::Deserialize;
use std::collections::BTreeMap;

pub const EMPTY_LABEL_MESSAGE: &str = "Label cannot be empty";

/// Which field types must carry at least one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Extends the options rule to checkbox groups. Off by default, so a
    /// checkbox group without options passes like it always has.
    pub checkbox_requires_options: bool,
    /// Reads a file field's `accept` list with HTML conventions (`type/*`,
    /// `.ext`, case-insensitive MIME). Off means the type must equal one of
    /// the trimmed entries exactly.
    pub html_accept: bool,
}

impl ValidationPolicy {
    pub fn strict() -> Self {
        Self {
            checkbox_requires_options: true,
            ..Self::default()
        }
    }

    pub fn requires_options(&self, field_type: FieldType) -> bool {
        match field_type {
            FieldType::Dropdown | FieldType::Radio => true,
            FieldType::Checkbox => self.checkbox_requires_options,
            _ => false,
        }
    }
}

/// Field index to error message, one message per field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    errors: BTreeMap<usize, String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.errors.get(&index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.errors.iter().map(|(index, msg)| (*index, msg.as_str()))
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Replaces any earlier message for `index`.
    pub fn set(&mut self, index: usize, message: impl Into<String>) {
        self.errors.insert(index, message.into());
    }

    /// `Field <n>: <message>` per entry, `n` being the 1-based position.
    pub fn summary_lines(&self) -> Vec<String> {
        self.iter()
            .map(|(index, msg)| format!("Field {}: {msg}", index + 1))
            .collect()
    }

    /// Keeps entries aligned with the field list after the field at `removed`
    /// is deleted.
    pub fn shift_after_removal(&mut self, removed: usize) {
        self.errors = std::mem::take(&mut self.errors)
            .into_iter()
            .filter(|(index, _)| *index != removed)
            .map(|(index, msg)| if index > removed { (index - 1, msg) } else { (index, msg) })
            .collect();
    }
}

pub fn options_message(field_type: FieldType) -> String {
    format!("{field_type} must have options")
}

/// Checks run in order and the last failing check owns the message, so an
/// option-bearing field with neither label nor options reports the options
/// error.
pub fn validate_field(field: &FormField, policy: &ValidationPolicy) -> Option<String> {
    let mut error = None;
    if field.label.trim().is_empty() {
        error = Some(EMPTY_LABEL_MESSAGE.to_string());
    }
    if policy.requires_options(field.field_type()) && field.options.is_empty() {
        error = Some(options_message(field.field_type()));
    }
    error
}

pub fn validate_fields(fields: &[FormField], policy: &ValidationPolicy) -> ValidationResult {
    let mut result = ValidationResult::new();
    for (index, field) in fields.iter().enumerate() {
        if let Some(message) = validate_field(field, policy) {
            result.set(index, message);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{EMPTY_LABEL_MESSAGE, ValidationPolicy, ValidationResult, validate_fields};
    use crate::core::field::{FieldType, FormField};

    #[test]
    fn whitespace_label_is_empty() {
        let fields = vec![FormField::new(FieldType::Text).with_label("   ")];
        let result = validate_fields(&fields, &ValidationPolicy::default());
        assert_eq!(result.get(0), Some(EMPTY_LABEL_MESSAGE));
    }

    #[test]
    fn options_error_wins_over_label_error() {
        let fields = vec![FormField::new(FieldType::Dropdown)];
        let result = validate_fields(&fields, &ValidationPolicy::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result.get(0), Some("dropdown must have options"));
    }

    #[test]
    fn radio_needs_options() {
        let fields = vec![
            FormField::new(FieldType::Radio).with_label("Gender"),
            FormField::new(FieldType::Radio)
                .with_label("Size")
                .with_options(["S", "M"]),
        ];
        let result = validate_fields(&fields, &ValidationPolicy::default());
        assert_eq!(result.get(0), Some("radio must have options"));
        assert_eq!(result.get(1), None);
    }

    #[test]
    fn empty_option_string_counts_as_an_option() {
        let fields = vec![
            FormField::new(FieldType::Dropdown)
                .with_label("City")
                .with_options([""]),
        ];
        assert!(validate_fields(&fields, &ValidationPolicy::default()).is_empty());
    }

    #[test]
    fn checkbox_options_rule_follows_policy() {
        let fields = vec![FormField::new(FieldType::Checkbox).with_label("Hobbies")];
        assert!(validate_fields(&fields, &ValidationPolicy::default()).is_empty());

        let strict = validate_fields(&fields, &ValidationPolicy::strict());
        assert_eq!(strict.get(0), Some("checkbox must have options"));
    }

    #[test]
    fn error_iff_label_blank_or_required_options_missing() {
        let policy = ValidationPolicy::default();
        for field_type in FieldType::ALL {
            for label in ["", " ", "Label"] {
                for options in [Vec::<&str>::new(), vec!["a"]] {
                    let field = FormField::new(field_type)
                        .with_label(label)
                        .with_options(options.clone());
                    let expected = label.trim().is_empty()
                        || (matches!(field_type, FieldType::Dropdown | FieldType::Radio)
                            && options.is_empty());
                    let result = validate_fields(std::slice::from_ref(&field), &policy);
                    assert_eq!(
                        result.get(0).is_some(),
                        expected,
                        "{field_type} label={label:?} options={options:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn shift_after_removal_rekeys_entries() {
        let mut result = ValidationResult::new();
        result.set(0, "a");
        result.set(2, "c");
        result.set(3, "d");

        result.shift_after_removal(2);

        let entries: Vec<_> = result.iter().collect();
        assert_eq!(entries, vec![(0, "a"), (2, "d")]);
    }
}
