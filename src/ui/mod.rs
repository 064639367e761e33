pub mod class_names;
pub mod frame;
pub mod span;
pub mod style;
pub mod theme;
