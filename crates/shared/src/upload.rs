//! Data model for the single-file upload zone.
//!
//! A selection comes from either a file picker or a drop gesture and is held
//! until it is replaced by another selection.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the bytes of a selected file live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// File on the local filesystem, read when the upload starts
    Path(PathBuf),
    /// Content already in memory (e.g. dropped by a web backend)
    Memory(Bytes),
}

/// The file currently chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Display name (file name only, no directories)
    pub name: String,
    /// Declared media type, if the source provided one
    pub media_type: Option<String>,
    pub source: FileSource,
}

impl SelectedFile {
    /// Build a selection from a path, deriving name and media type from it.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let media_type = media_type_for_path(&path).map(str::to_string);

        Self {
            name,
            media_type,
            source: FileSource::Path(path),
        }
    }

    /// Build a selection from in-memory bytes.
    pub fn from_bytes(
        name: impl Into<String>,
        media_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type,
            source: FileSource::Memory(Bytes::from(bytes)),
        }
    }
}

/// A file input change: zero or one file.
#[derive(Debug, Clone, Default)]
pub struct PickEvent {
    pub files: Vec<SelectedFile>,
}

impl PickEvent {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(file: SelectedFile) -> Self {
        Self { files: vec![file] }
    }
}

/// A drop gesture carrying the dropped file list.
#[derive(Debug, Clone, Default)]
pub struct DropEvent {
    pub files: Vec<SelectedFile>,
}

impl DropEvent {
    pub fn new(files: Vec<SelectedFile>) -> Self {
        Self { files }
    }
}

/// Upload completion percentage, always within 0..=100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UploadProgress(u8);

impl UploadProgress {
    pub const ZERO: Self = Self(0);
    pub const COMPLETE: Self = Self(100);

    /// Percentage for `loaded` out of `total` bytes, rounded to nearest.
    ///
    /// Returns `None` when the total is unknown or zero.
    pub fn from_bytes(loaded: u64, total: Option<u64>) -> Option<Self> {
        let total = total.filter(|t| *t > 0)?;
        let ratio = loaded.min(total) as f64 / total as f64;
        Some(Self((ratio * 100.0).round() as u8))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Fraction in 0.0..=1.0, for progress bars.
    pub fn fraction(self) -> f32 {
        f32::from(self.0) / 100.0
    }
}

/// Where the widget is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadPhase {
    /// Nothing selected yet
    #[default]
    Idle,
    /// A file is selected and may be submitted
    Ready,
    /// A transfer is in flight
    Uploading,
    /// The server accepted the file and the host was told to navigate away
    Redirected,
}

/// Declared media type for a file path, by extension.
pub fn media_type_for_path(path: &std::path::Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();

    let media_type = match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        "csv" => "text/csv",
        "json" => "application/json",
        "zip" => "application/zip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => return None,
    };
    Some(media_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_progress_rounds_to_nearest() {
        assert_eq!(UploadProgress::from_bytes(1, Some(3)).unwrap().percent(), 33);
        assert_eq!(UploadProgress::from_bytes(2, Some(3)).unwrap().percent(), 67);
        assert_eq!(UploadProgress::from_bytes(200, Some(200)).unwrap(), UploadProgress::COMPLETE);
    }

    #[test]
    fn test_progress_unknown_total() {
        assert!(UploadProgress::from_bytes(50, None).is_none());
        assert!(UploadProgress::from_bytes(50, Some(0)).is_none());
    }

    #[test]
    fn test_progress_never_exceeds_complete() {
        let p = UploadProgress::from_bytes(500, Some(200)).unwrap();
        assert_eq!(p, UploadProgress::COMPLETE);
        assert!((p.fraction() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_selected_file_from_path() {
        let file = SelectedFile::from_path("/tmp/reports/Q3 Report.PDF");
        assert_eq!(file.name, "Q3 Report.PDF");
        assert_eq!(file.media_type.as_deref(), Some("application/pdf"));
        assert_eq!(file.source, FileSource::Path(PathBuf::from("/tmp/reports/Q3 Report.PDF")));
    }

    #[test]
    fn test_media_type_for_path() {
        assert_eq!(media_type_for_path(Path::new("a.pdf")), Some("application/pdf"));
        assert_eq!(media_type_for_path(Path::new("a.png")), Some("image/png"));
        assert_eq!(media_type_for_path(Path::new("Makefile")), None);
        assert_eq!(media_type_for_path(Path::new("a.xyz")), None);
    }
}
