pub mod artifact_view;
pub mod button;
pub mod input_field;
pub mod notice;
pub mod text_edit;
pub mod traits;
