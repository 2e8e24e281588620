use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid form configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read form configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("field index {index} is out of range ({len} fields)")]
    OutOfRange { index: usize, len: usize },
    #[error("field {index} is not a file field")]
    NotAFileField { index: usize },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileSelectError {
    #[error("Invalid file type. Please upload a valid file.")]
    Rejected { name: String, mime: String },
    #[error(transparent)]
    Field(#[from] EditError),
}
