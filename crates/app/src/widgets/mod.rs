//! Widgets making up the upload window.

pub mod drag_drop;
pub mod file_picker;
pub mod upload_zone;

pub use drag_drop::DragDropHandler;
pub use file_picker::{FileFilter, FilePickerWidget};
pub use upload_zone::UploadZone;
