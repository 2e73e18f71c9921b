pub mod upload_client;

pub use upload_client::{HttpUploader, ProgressFn, UploadRequest, UploadTransport};
