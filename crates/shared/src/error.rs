//! Error taxonomy for the upload zone.

use std::path::PathBuf;

/// Everything that can go wrong between selecting a file and the server's answer.
///
/// Only `Status`, `Network` and `ReadFile` end a transfer and are shown to
/// the user; the rest are returned so callers can log them.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("Rejected dropped file of type {}", media_type.as_deref().unwrap_or("<unknown>"))]
    RejectedFileType { media_type: Option<String> },

    #[error("An upload is already in progress")]
    AlreadyUploading,

    #[error("The upload was already accepted")]
    AlreadyAccepted,

    #[error("Server answered with status {status}")]
    Status { status: u16 },

    #[error("Transport error: {0}")]
    Network(String),

    #[error("Could not read {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_names_type() {
        let err = UploadError::RejectedFileType {
            media_type: Some("image/png".into()),
        };
        assert_eq!(err.to_string(), "Rejected dropped file of type image/png");

        let err = UploadError::RejectedFileType { media_type: None };
        assert!(err.to_string().contains("<unknown>"));
    }
}
