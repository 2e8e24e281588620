pub mod accept;
pub mod builder;
pub mod config;
pub mod definition;
pub mod field;
pub mod qualification;
pub mod validation;

pub use builder::{BuilderMode, FieldEdit, FormBuilderState};
pub use definition::FormDefinition;
pub use field::{FieldKind, FieldType, FileRef, FileSpec, FormField};
pub use validation::{ValidationPolicy, ValidationResult};
