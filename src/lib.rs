//! Terminal form builder: assemble typed fields, validate them, preview the
//! resulting form and move its definition in and out as JSON.

pub mod core;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod settings;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use self::core::{
    BuilderMode, FieldEdit, FieldKind, FieldType, FileRef, FileSpec, FormBuilderState,
    FormDefinition, FormField, ValidationPolicy, ValidationResult,
};
pub use error::{EditError, FileSelectError, ImportError, SettingsError};
pub use settings::Settings;
