//! Textual form configuration: a pretty-printed JSON array of fields.

use crate::core::field::FormField;
use crate::error::ImportError;
use std::fs;
use std::path::Path;

pub fn export_config(fields: &[FormField]) -> String {
    // Serializing derived types into a String has no failure path.
    serde_json::to_string_pretty(fields).unwrap_or_else(|_| "[]".to_string())
}

pub fn import_config(text: &str) -> Result<Vec<FormField>, ImportError> {
    Ok(serde_json::from_str(text)?)
}

pub fn read_config_file(path: &Path) -> Result<Vec<FormField>, ImportError> {
    let text = fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    import_config(&text)
}

#[cfg(test)]
mod tests {
    use super::{export_config, import_config, read_config_file};
    use crate::core::field::{FieldType, FileRef, FormField};
    use crate::error::ImportError;
    use std::io::Write;

    #[test]
    fn export_uses_two_space_indent() {
        let fields = vec![FormField::new(FieldType::Text).with_label("Name")];
        let expected = concat!(
            "[\n",
            "  {\n",
            "    \"type\": \"text\",\n",
            "    \"label\": \"Name\",\n",
            "    \"options\": []\n",
            "  }\n",
            "]",
        );
        assert_eq!(export_config(&fields), expected);
    }

    #[test]
    fn empty_list_exports_as_empty_array() {
        assert_eq!(export_config(&[]), "[]");
    }

    #[test]
    fn export_then_import_is_identity() {
        let mut resume = FormField::new(FieldType::File)
            .with_label("Resume")
            .with_accept("application/pdf, .docx");
        if let Some(spec) = resume.file_spec_mut() {
            spec.value = Some(FileRef::new("cv.pdf", "application/pdf"));
        }
        let fields = vec![
            FormField::new(FieldType::Text).with_label("Name"),
            FormField::new(FieldType::Textarea).with_label("Bio"),
            FormField::new(FieldType::Dropdown)
                .with_label("City")
                .with_options(["Pune", " Delhi", ""]),
            FormField::new(FieldType::Checkbox).with_label("Hobbies"),
            FormField::new(FieldType::Radio)
                .with_label("Size")
                .with_options(["S", "M"]),
            resume,
        ];

        let text = export_config(&fields);
        let restored = import_config(&text).expect("round trip");
        assert_eq!(restored, fields);
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        let err = import_config("not json").expect_err("must fail");
        assert!(matches!(err, ImportError::Parse(_)));
    }

    #[test]
    fn unknown_field_type_is_rejected() {
        let err = import_config(r#"[{"type":"slider","label":"x","options":[]}]"#)
            .expect_err("must fail");
        assert!(matches!(err, ImportError::Parse(_)));
    }

    #[test]
    fn non_array_is_rejected() {
        assert!(import_config(r#"{"type":"text","label":"x"}"#).is_err());
    }

    #[test]
    fn reads_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"[{{"type":"radio","label":"Yes?","options":["y","n"]}}]"#)
            .expect("write");

        let fields = read_config_file(file.path()).expect("read");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].options, vec!["y", "n"]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_config_file(std::path::Path::new("/nonexistent/form.json"))
            .expect_err("must fail");
        assert!(matches!(err, ImportError::Io { .. }));
    }
}
