pub mod error;
pub mod events;
pub mod upload;

pub use error::UploadError;
pub use events::{TransferEvent, TransferResponse, WidgetOutcome};
pub use upload::{DropEvent, FileSource, PickEvent, SelectedFile, UploadPhase, UploadProgress};

pub mod settings {
    use serde::{Deserialize, Serialize};

    fn default_chunk_size() -> usize {
        64 * 1024
    }

    fn default_timeout_secs() -> u64 {
        300
    }

    /// Configuration injected into the upload zone and its transport.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UploadSettings {
        pub server_url: String,              // e.g., "http://127.0.0.1:5000"
        pub endpoint_path: String,           // e.g., "/upload"
        pub field_name: String,              // multipart field holding the file
        pub accepted_media_type: String,     // only type accepted on drop
        pub failure_message: String,         // shown when a transfer fails
        #[serde(default = "default_chunk_size")]
        pub chunk_size: usize,
        #[serde(default = "default_timeout_secs")]
        pub timeout_secs: u64,
    }

    impl Default for UploadSettings {
        fn default() -> Self {
            Self {
                server_url: "http://127.0.0.1:5000".into(),
                endpoint_path: "/upload".into(),
                field_name: "pdf".into(),
                accepted_media_type: "application/pdf".into(),
                failure_message: "Falha no upload.".into(),
                chunk_size: default_chunk_size(),
                timeout_secs: default_timeout_secs(),
            }
        }
    }

    impl UploadSettings {
        /// Apply `PDF_DROP_SERVER_URL` / `PDF_DROP_ENDPOINT` overrides.
        pub fn with_env_overrides(mut self) -> Self {
            if let Ok(url) = std::env::var("PDF_DROP_SERVER_URL") {
                if !url.trim().is_empty() {
                    self.server_url = url.trim().to_string();
                }
            }
            if let Ok(path) = std::env::var("PDF_DROP_ENDPOINT") {
                if !path.trim().is_empty() {
                    self.endpoint_path = path.trim().to_string();
                }
            }
            self
        }

        /// Full URL the file is posted to.
        pub fn endpoint_url(&self) -> String {
            let base = self.server_url.trim_end_matches('/');
            if self.endpoint_path.starts_with('/') {
                format!("{}{}", base, self.endpoint_path)
            } else {
                format!("{}/{}", base, self.endpoint_path)
            }
        }
    }
}
