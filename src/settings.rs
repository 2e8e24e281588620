use crate::core::validation::ValidationPolicy;
use crate::error::SettingsError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_TITLE: &str = "Dynamic Form Generator";

/// Settings file contents. Every key is optional.
///
/// ```yaml
/// title: Dynamic Form Generator
/// log_level: info
/// validation:
///   checkbox_requires_options: false
///   html_accept: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub title: String,
    pub log_level: String,
    pub validation: ValidationPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            log_level: "info".to_string(),
            validation: ValidationPolicy::default(),
        }
    }
}

impl Settings {
    pub fn from_yaml(text: &str, path: &Path) -> Result<Self, SettingsError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|source| SettingsError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text, path)
    }
}
