//! TUI: App state, event loop, screens, widgets.

pub mod action;
pub mod app;
pub mod error;
pub mod flow;
pub mod screens;
pub mod widgets;

pub use app::{App, Screen};
pub use error::AppError;
