use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Dropdown,
    Checkbox,
    Radio,
    File,
}

impl FieldType {
    pub const ALL: [FieldType; 6] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Dropdown,
        FieldType::Checkbox,
        FieldType::Radio,
        FieldType::File,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Dropdown => "dropdown",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::File => "file",
        }
    }

    /// Caption used on the builder's "add field" picker.
    pub fn add_caption(self) -> &'static str {
        match self {
            Self::Text => "Text Input",
            Self::Textarea => "Text Area",
            Self::Dropdown => "Dropdown",
            Self::Checkbox => "Checkbox",
            Self::Radio => "Radio Button",
            Self::File => "File Upload",
        }
    }

    pub fn has_options(self) -> bool {
        matches!(self, Self::Dropdown | Self::Checkbox | Self::Radio)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata of a user-picked file. File contents are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    #[serde(rename = "type")]
    pub mime: String,
}

impl FileRef {
    pub fn new(name: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileSpec {
    pub accept: Option<String>,
    pub value: Option<FileRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Textarea,
    Dropdown,
    Checkbox,
    Radio,
    File(FileSpec),
}

impl FieldKind {
    pub fn new(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text => Self::Text,
            FieldType::Textarea => Self::Textarea,
            FieldType::Dropdown => Self::Dropdown,
            FieldType::Checkbox => Self::Checkbox,
            FieldType::Radio => Self::Radio,
            FieldType::File => Self::File(FileSpec::default()),
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Text => FieldType::Text,
            Self::Textarea => FieldType::Textarea,
            Self::Dropdown => FieldType::Dropdown,
            Self::Checkbox => FieldType::Checkbox,
            Self::Radio => FieldType::Radio,
            Self::File(_) => FieldType::File,
        }
    }
}

/// One input control of a form definition.
///
/// `options` is carried by every field so the exported text keeps a stable
/// shape, but it only drives rendering for dropdown, checkbox and radio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FieldRecord", into = "FieldRecord")]
pub struct FormField {
    pub kind: FieldKind,
    pub label: String,
    pub options: Vec<String>,
}

impl FormField {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            kind: FieldKind::new(field_type),
            label: String::new(),
            options: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        if let FieldKind::File(spec) = &mut self.kind {
            spec.accept = Some(accept.into());
        }
        self
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    pub fn file_spec(&self) -> Option<&FileSpec> {
        match &self.kind {
            FieldKind::File(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn file_spec_mut(&mut self) -> Option<&mut FileSpec> {
        match &mut self.kind {
            FieldKind::File(spec) => Some(spec),
            _ => None,
        }
    }

    /// Options as the builder's comma-separated editor shows them.
    pub fn options_text(&self) -> String {
        self.options.join(",")
    }
}

/// Splits an options editor string on every comma. Pieces are kept verbatim:
/// no trimming, no dedup, and an empty input yields a single empty option.
pub fn split_options(raw: &str) -> Vec<String> {
    raw.split(',').map(ToOwned::to_owned).collect()
}

/// Flat textual shape of a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FieldRecord {
    #[serde(rename = "type")]
    field_type: FieldType,
    label: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    accept: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "picked_file"
    )]
    value: Option<FileRef>,
}

/// Browser exports carry a picked file as `{}`.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EmptyValue {}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredFile {
    File(FileRef),
    Empty(EmptyValue),
}

/// `{}` and `null` both read as "no file picked".
fn picked_file<'de, D>(deserializer: D) -> Result<Option<FileRef>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StoredFile>::deserialize(deserializer)? {
        Some(StoredFile::File(file)) => Some(file),
        Some(StoredFile::Empty(_)) | None => None,
    })
}

impl TryFrom<FieldRecord> for FormField {
    type Error = String;

    fn try_from(record: FieldRecord) -> Result<Self, Self::Error> {
        let kind = match record.field_type {
            FieldType::File => FieldKind::File(FileSpec {
                accept: record.accept,
                value: record.value,
            }),
            other => {
                if record.accept.is_some() || record.value.is_some() {
                    return Err(format!(
                        "{other} field cannot carry file attributes (accept/value)"
                    ));
                }
                FieldKind::new(other)
            }
        };
        Ok(Self {
            kind,
            label: record.label,
            options: record.options,
        })
    }
}

impl From<FormField> for FieldRecord {
    fn from(field: FormField) -> Self {
        let field_type = field.field_type();
        let (accept, value) = match field.kind {
            FieldKind::File(spec) => (spec.accept, spec.value),
            _ => (None, None),
        };
        Self {
            field_type,
            label: field.label,
            options: field.options,
            accept,
            value,
        }
    }
}
