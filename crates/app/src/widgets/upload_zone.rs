//! Single-file upload zone.
//!
//! Holds the current selection, the drag-over flag and the progress of the one
//! in-flight transfer. The transfer runs on a background thread and reports
//! back over a channel that the UI drains once per frame with [`UploadZone::poll`].

use services::{ProgressFn, UploadRequest, UploadTransport};
use shared::settings::UploadSettings;
use shared::{
    DropEvent, PickEvent, SelectedFile, TransferEvent, UploadError, UploadPhase, UploadProgress,
    WidgetOutcome,
};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;

pub struct UploadZone {
    settings: UploadSettings,
    transport: Arc<dyn UploadTransport>,
    selected: Option<SelectedFile>,
    progress: UploadProgress,
    dragging: bool,
    phase: UploadPhase,
    /// Events of the in-flight transfer, if any
    events_rx: Option<Receiver<TransferEvent>>,
}

impl UploadZone {
    pub fn new(settings: UploadSettings, transport: Arc<dyn UploadTransport>) -> Self {
        Self {
            settings,
            transport,
            selected: None,
            progress: UploadProgress::ZERO,
            dragging: false,
            phase: UploadPhase::Idle,
            events_rx: None,
        }
    }

    /// File input changed. Keeps the first file, if any; no type check.
    pub fn pick(&mut self, event: PickEvent) {
        match event.files.into_iter().next() {
            Some(file) => {
                tracing::debug!(file = %file.name, "File picked");
                self.select(file);
            }
            None => tracing::debug!("Pick without a file, keeping selection"),
        }
    }

    /// Something was dropped on the zone.
    ///
    /// Only the first entry is considered, and only if its declared media type
    /// is exactly the accepted one. Rejections are returned but never shown.
    pub fn on_drop(&mut self, event: DropEvent) -> Result<(), UploadError> {
        self.dragging = false;

        let Some(file) = event.files.into_iter().next() else {
            return Err(UploadError::RejectedFileType { media_type: None });
        };

        if !self.accepts(file.media_type.as_deref()) {
            tracing::debug!(file = %file.name, media_type = ?file.media_type, "Ignoring dropped file");
            return Err(UploadError::RejectedFileType {
                media_type: file.media_type,
            });
        }

        tracing::debug!(file = %file.name, "File dropped");
        self.select(file);
        Ok(())
    }

    /// Whether a file declaring `media_type` would be taken on drop.
    pub fn accepts(&self, media_type: Option<&str>) -> bool {
        media_type == Some(self.settings.accepted_media_type.as_str())
    }

    pub fn accepted_media_type(&self) -> &str {
        &self.settings.accepted_media_type
    }

    pub fn drag_over(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Start uploading the selected file.
    ///
    /// Without a selection this does nothing and returns `NoFileSelected`.
    /// Once the server has accepted the file the zone is finished and every
    /// further submit is refused.
    pub fn submit(&mut self) -> Result<(), UploadError> {
        let file = self.selected.clone().ok_or(UploadError::NoFileSelected)?;
        match self.phase {
            UploadPhase::Uploading => return Err(UploadError::AlreadyUploading),
            UploadPhase::Redirected => return Err(UploadError::AlreadyAccepted),
            UploadPhase::Idle | UploadPhase::Ready => {}
        }

        let (tx, rx) = channel::<TransferEvent>();
        self.events_rx = Some(rx);
        self.phase = UploadPhase::Uploading;
        self.progress = UploadProgress::ZERO;

        let request = UploadRequest::new(&self.settings, file);
        let transport = self.transport.clone();
        tracing::info!(url = %request.url, file = %request.file.name, "Starting upload");

        std::thread::spawn(move || run_upload(transport, request, tx));
        Ok(())
    }

    /// Apply every transfer event received since the last call.
    ///
    /// Returns the action the host must take once the transfer has ended.
    pub fn poll(&mut self) -> Option<WidgetOutcome> {
        let rx = self.events_rx.take()?;
        let mut outcome = None;

        loop {
            match rx.try_recv() {
                Ok(event) => {
                    let terminal = event.is_terminal();
                    if let Some(o) = self.handle_event(event) {
                        outcome = Some(o);
                    }
                    if terminal {
                        return outcome;
                    }
                }
                Err(TryRecvError::Empty) => {
                    self.events_rx = Some(rx);
                    return outcome;
                }
                Err(TryRecvError::Disconnected) => {
                    return self.handle_event(TransferEvent::Errored(
                        "upload worker stopped without an answer".into(),
                    ));
                }
            }
        }
    }

    /// Apply one transfer event. Events outside an upload are ignored.
    pub fn handle_event(&mut self, event: TransferEvent) -> Option<WidgetOutcome> {
        if self.phase != UploadPhase::Uploading {
            tracing::debug!(?event, phase = ?self.phase, "Ignoring transfer event");
            return None;
        }

        match event {
            TransferEvent::Progress { loaded, total } => {
                if let Some(next) = UploadProgress::from_bytes(loaded, total) {
                    self.progress = self.progress.max(next);
                }
                None
            }
            TransferEvent::Finished(response) if response.is_success() => {
                tracing::info!(status = response.status, url = %response.url, "Upload accepted");
                self.phase = UploadPhase::Redirected;
                self.events_rx = None;
                Some(WidgetOutcome::Navigate(response.url))
            }
            TransferEvent::Finished(response) => self.fail(UploadError::Status {
                status: response.status,
            }),
            TransferEvent::Errored(message) => self.fail(UploadError::Network(message)),
        }
    }

    fn fail(&mut self, error: UploadError) -> Option<WidgetOutcome> {
        tracing::warn!(%error, "Upload failed");
        self.progress = UploadProgress::ZERO;
        self.phase = UploadPhase::Ready;
        self.events_rx = None;
        Some(WidgetOutcome::NotifyFailure(self.settings.failure_message.clone()))
    }

    fn select(&mut self, file: SelectedFile) {
        self.selected = Some(file);
        if self.phase == UploadPhase::Idle {
            self.phase = UploadPhase::Ready;
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// Name shown next to the zone; empty when nothing is selected.
    pub fn file_name(&self) -> &str {
        self.selected.as_ref().map(|f| f.name.as_str()).unwrap_or("")
    }

    pub fn progress(&self) -> UploadProgress {
        self.progress
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn is_uploading(&self) -> bool {
        self.phase == UploadPhase::Uploading
    }

    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && matches!(self.phase, UploadPhase::Idle | UploadPhase::Ready)
    }
}

/// Body of the upload thread: drive the transport and forward its events.
fn run_upload(transport: Arc<dyn UploadTransport>, request: UploadRequest, tx: Sender<TransferEvent>) {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            let _ = tx.send(TransferEvent::Errored(format!(
                "Failed to start async runtime: {}",
                e
            )));
            return;
        }
    };

    let progress_tx = tx.clone();
    let progress: ProgressFn = Arc::new(move |loaded, total| {
        let _ = progress_tx.send(TransferEvent::Progress { loaded, total });
    });

    let terminal = match rt.block_on(transport.upload(request, progress)) {
        Ok(response) => TransferEvent::Finished(response),
        Err(e) => TransferEvent::Errored(e.to_string()),
    };
    let _ = tx.send(terminal);
}
