//! Reusable TUI widgets.

pub mod confirm;
pub mod form;
pub mod image_viewer;
pub mod toast;

pub use confirm::{Answer, ConfirmDialog, draw_confirm};
pub use form::{FieldKind, Form, FormField, draw_form};
pub use image_viewer::{ImageViewer, draw_image_viewer};
pub use toast::{Toast, ToastKind, draw_toast};
