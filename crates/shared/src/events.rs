//! Events flowing from a transfer back to the upload zone, and the actions
//! the zone asks its host to perform.

use serde::{Deserialize, Serialize};

/// The server's terminal answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResponse {
    /// HTTP status of the final response (after redirects)
    pub status: u16,
    /// Resolved URL of the final response
    pub url: String,
}

impl TransferResponse {
    pub fn new(status: u16, url: impl Into<String>) -> Self {
        Self {
            status,
            url: url.into(),
        }
    }

    /// Any status in [200, 300) counts as success.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One step of an in-flight transfer.
///
/// A transfer emits zero or more `Progress` events with non-decreasing
/// `loaded`, followed by exactly one `Finished` or `Errored`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferEvent {
    Progress { loaded: u64, total: Option<u64> },
    Finished(TransferResponse),
    Errored(String),
}

impl TransferEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransferEvent::Progress { .. })
    }
}

/// What the host must do after a transfer ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetOutcome {
    /// Replace the current page with this URL
    Navigate(String),
    /// Show a blocking failure notification
    NotifyFailure(String),
}
