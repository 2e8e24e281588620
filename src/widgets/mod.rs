pub mod base;
pub mod builder_view;
pub mod preview;
pub mod shell;
pub mod text_area;
pub mod text_edit;
pub mod traits;
