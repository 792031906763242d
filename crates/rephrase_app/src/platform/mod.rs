mod app;
mod clipboard;
mod effects;
mod keymap;
pub mod logging;
mod terminal;
mod ui;

pub use app::run_app;
