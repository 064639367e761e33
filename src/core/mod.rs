pub mod controller;
pub mod form_state;
pub mod form_values;
pub mod validation;
pub mod value;
pub mod value_path;
