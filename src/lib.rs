pub mod app;
pub mod capture;
pub mod clipboard;
pub mod config;
pub mod core;
pub mod error;
pub mod terminal;
pub mod ui;
pub mod widgets;

#[cfg(test)]
mod test_support;

pub use core::controller;
pub use core::validation;
pub use ui::frame;
