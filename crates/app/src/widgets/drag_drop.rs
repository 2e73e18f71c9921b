//! Drag and drop handler feeding the upload zone.
//!
//! Uses egui's hovered/dropped file input to drive the zone's drag state and drops.

use super::upload_zone::UploadZone;
use egui::{Context, DroppedFile, Id, Response, RichText, Sense, Ui, Vec2};
use shared::{DropEvent, SelectedFile};
use std::path::Path;

/// What the zone would do with the file currently hovering over the window.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HoverVerdict {
    Accepted { name: Option<String> },
    Rejected,
    /// The backend did not tell us what is being dragged
    Unknown,
}

/// Handler for drag and drop file operations.
pub struct DragDropHandler {
    /// Whether files are currently being dragged over the window
    hovering: bool,
    verdict: HoverVerdict,
    /// ID for the drop zone
    id: Id,
}

impl DragDropHandler {
    /// Create a new drag and drop handler.
    pub fn new(id: impl std::hash::Hash) -> Self {
        Self {
            hovering: false,
            verdict: HoverVerdict::Unknown,
            id: Id::new(id),
        }
    }

    /// Forward this frame's drag gestures and drops to the zone.
    ///
    /// Call this each frame before drawing.
    pub fn update(&mut self, ctx: &Context, zone: &mut UploadZone) {
        let (hovered, dropped) = ctx.input(|i| {
            (
                i.raw.hovered_files.clone(),
                i.raw.dropped_files.clone(),
            )
        });
        let hovering = !hovered.is_empty();

        if hovering && !self.hovering {
            zone.drag_over();
        } else if !hovering && self.hovering && dropped.is_empty() {
            zone.drag_leave();
        }
        self.hovering = hovering;

        self.verdict = match hovered.first() {
            Some(first) => {
                match declared_media_type(&first.mime, first.path.as_deref(), "") {
                    Some(media_type) if zone.accepts(Some(&media_type)) => HoverVerdict::Accepted {
                        name: first
                            .path
                            .as_deref()
                            .and_then(Path::file_name)
                            .map(|n| n.to_string_lossy().into_owned()),
                    },
                    Some(_) => HoverVerdict::Rejected,
                    None => HoverVerdict::Unknown,
                }
            }
            None => HoverVerdict::Unknown,
        };

        // Only the first dropped entry counts, even when it has no usable content
        if let Some(first) = dropped.first() {
            let files = selected_from_dropped(first).into_iter().collect();
            if let Err(e) = zone.on_drop(DropEvent::new(files)) {
                tracing::debug!(%e, "Drop ignored");
            }
        }
    }

    /// Show the drop zone, labelled with the current file name.
    pub fn show_drop_zone(&self, ui: &mut Ui, zone: &UploadZone, size: Vec2) -> Response {
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
        let dragging = zone.is_dragging();

        let visuals = if dragging {
            ui.visuals().widgets.hovered
        } else {
            ui.visuals().widgets.inactive
        };

        ui.painter().rect(
            rect,
            4.0,
            if dragging {
                visuals.bg_fill.gamma_multiply(1.2)
            } else {
                visuals.bg_fill
            },
            visuals.bg_stroke,
        );

        if dragging {
            let stroke = egui::Stroke::new(2.0, self.accent(ui));
            ui.painter().rect_stroke(rect, 4.0, stroke);
        }

        let label = match (dragging, &self.verdict) {
            (true, HoverVerdict::Rejected) => "🚫 Not a PDF".to_string(),
            (true, _) => "📥 Drop the PDF here".to_string(),
            (false, _) if zone.file_name().is_empty() => "📄 Drag a PDF here".to_string(),
            (false, _) => format!("📄 {}", zone.file_name()),
        };

        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(16.0),
            if dragging {
                ui.visuals().strong_text_color()
            } else {
                ui.visuals().text_color()
            },
        );

        response
    }

    /// While something is dragged over the window, tell the user whether the
    /// zone will take it and which file it would replace.
    pub fn show_drag_overlay(&self, ctx: &Context, zone: &UploadZone) {
        if !self.hovering {
            return;
        }

        let headline = match &self.verdict {
            HoverVerdict::Accepted { name: Some(name) } => format!("📥 Release to upload {}", name),
            HoverVerdict::Accepted { name: None } | HoverVerdict::Unknown => {
                "📥 Drop a PDF to upload".to_string()
            }
            HoverVerdict::Rejected => {
                format!("🚫 Only {} files are accepted", zone.accepted_media_type())
            }
        };
        let replaces = (self.verdict != HoverVerdict::Rejected && !zone.file_name().is_empty())
            .then(|| format!("Replaces {}", zone.file_name()));

        egui::Area::new(self.id.with("overlay"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_BOTTOM, Vec2::new(0.0, -16.0))
            .show(ctx, |ui| {
                let accent = self.accent(ui);
                egui::Frame::popup(ui.style())
                    .stroke(egui::Stroke::new(2.0, accent))
                    .show(ui, |ui| {
                        ui.label(RichText::new(headline).strong().color(accent));
                        if let Some(replaces) = replaces {
                            ui.label(RichText::new(replaces).weak());
                        }
                    });
            });
    }

    fn accent(&self, ui: &Ui) -> egui::Color32 {
        match self.verdict {
            HoverVerdict::Rejected => ui.visuals().error_fg_color,
            _ => ui.visuals().selection.bg_fill,
        }
    }
}

/// Media type a dragged file declares: the backend's MIME type, or the one
/// implied by its extension when the backend leaves it empty (native backends).
fn declared_media_type(mime: &str, path: Option<&Path>, name: &str) -> Option<String> {
    if !mime.is_empty() {
        return Some(mime.to_string());
    }
    let path = path.unwrap_or_else(|| Path::new(name));
    shared::upload::media_type_for_path(path).map(str::to_string)
}

/// Turn a dropped file into a selection.
///
/// Returns `None` when the backend handed over neither a path nor the bytes.
pub fn selected_from_dropped(file: &DroppedFile) -> Option<SelectedFile> {
    let media_type = declared_media_type(&file.mime, file.path.as_deref(), &file.name);

    if let Some(path) = &file.path {
        let mut selected = SelectedFile::from_path(path);
        selected.media_type = media_type;
        return Some(selected);
    }

    let bytes = file.bytes.as_ref()?;
    Some(SelectedFile::from_bytes(file.name.clone(), media_type, bytes.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{HoveredFile, RawInput};
    use services::{ProgressFn, UploadRequest, UploadTransport};
    use shared::settings::UploadSettings;
    use shared::{PickEvent, TransferResponse, UploadError};
    use std::path::PathBuf;
    use std::sync::Arc;

    /// Transport for zones that are never submitted.
    struct OfflineTransport;

    #[async_trait::async_trait]
    impl UploadTransport for OfflineTransport {
        async fn upload(
            &self,
            _request: UploadRequest,
            _progress: ProgressFn,
        ) -> Result<TransferResponse, UploadError> {
            Err(UploadError::Network("offline".into()))
        }
    }

    fn zone() -> UploadZone {
        UploadZone::new(UploadSettings::default(), Arc::new(OfflineTransport))
    }

    fn hovered(path: &str) -> HoveredFile {
        HoveredFile {
            path: Some(PathBuf::from(path)),
            ..Default::default()
        }
    }

    fn dropped(path: &str) -> DroppedFile {
        DroppedFile {
            path: Some(PathBuf::from(path)),
            ..Default::default()
        }
    }

    /// Run one egui frame carrying the given hover/drop input through the handler.
    fn frame(
        ctx: &Context,
        handler: &mut DragDropHandler,
        zone: &mut UploadZone,
        hovered_files: Vec<HoveredFile>,
        dropped_files: Vec<DroppedFile>,
    ) {
        let input = RawInput {
            hovered_files,
            dropped_files,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| handler.update(ctx, zone));
    }

    #[test]
    fn test_hover_then_leave_toggles_drag_state() {
        let ctx = Context::default();
        let mut handler = DragDropHandler::new("test");
        let mut zone = zone();

        frame(&ctx, &mut handler, &mut zone, vec![hovered("/docs/scan.pdf")], vec![]);
        assert!(zone.is_dragging());
        assert_eq!(
            handler.verdict,
            HoverVerdict::Accepted {
                name: Some("scan.pdf".into())
            }
        );

        frame(&ctx, &mut handler, &mut zone, vec![hovered("/docs/scan.pdf")], vec![]);
        assert!(zone.is_dragging());

        frame(&ctx, &mut handler, &mut zone, vec![], vec![]);
        assert!(!zone.is_dragging());
        assert!(zone.selected_file().is_none());
        assert_eq!(handler.verdict, HoverVerdict::Unknown);
    }

    #[test]
    fn test_hovering_other_type_is_flagged() {
        let ctx = Context::default();
        let mut handler = DragDropHandler::new("test");
        let mut zone = zone();

        frame(&ctx, &mut handler, &mut zone, vec![hovered("/pics/cat.png")], vec![]);
        assert!(zone.is_dragging());
        assert_eq!(handler.verdict, HoverVerdict::Rejected);

        let unnamed = HoveredFile::default();
        frame(&ctx, &mut handler, &mut zone, vec![unnamed], vec![]);
        assert_eq!(handler.verdict, HoverVerdict::Unknown);
    }

    #[test]
    fn test_drop_as_hover_ends_selects_pdf() {
        let ctx = Context::default();
        let mut handler = DragDropHandler::new("test");
        let mut zone = zone();

        frame(&ctx, &mut handler, &mut zone, vec![hovered("/docs/scan.pdf")], vec![]);
        assert!(zone.is_dragging());

        frame(&ctx, &mut handler, &mut zone, vec![], vec![dropped("/docs/scan.pdf")]);
        assert!(!zone.is_dragging());
        assert_eq!(zone.file_name(), "scan.pdf");
        assert_eq!(
            zone.selected_file().unwrap().source,
            shared::FileSource::Path(PathBuf::from("/docs/scan.pdf"))
        );
    }

    #[test]
    fn test_rejected_drop_keeps_selection() {
        let ctx = Context::default();
        let mut handler = DragDropHandler::new("test");
        let mut zone = zone();
        zone.pick(PickEvent::single(SelectedFile::from_path("/docs/kept.pdf")));

        frame(&ctx, &mut handler, &mut zone, vec![hovered("/pics/cat.png")], vec![]);
        frame(&ctx, &mut handler, &mut zone, vec![], vec![dropped("/pics/cat.png")]);

        assert!(!zone.is_dragging());
        assert_eq!(zone.file_name(), "kept.pdf");
    }

    #[test]
    fn test_contentless_first_entry_blocks_later_pdf() {
        let ctx = Context::default();
        let mut handler = DragDropHandler::new("test");
        let mut zone = zone();

        let ghost = DroppedFile {
            name: "ghost.pdf".into(),
            ..Default::default()
        };
        frame(
            &ctx,
            &mut handler,
            &mut zone,
            vec![],
            vec![ghost, dropped("/docs/second.pdf")],
        );

        assert!(zone.selected_file().is_none());
        assert!(!zone.is_dragging());
    }

    #[test]
    fn test_native_drop_uses_extension() {
        let selected = selected_from_dropped(&dropped("/home/ana/scan.pdf")).unwrap();
        assert_eq!(selected.name, "scan.pdf");
        assert_eq!(selected.media_type.as_deref(), Some("application/pdf"));
    }

    #[test]
    fn test_declared_mime_wins_over_extension() {
        let file = DroppedFile {
            path: Some(PathBuf::from("/home/ana/renamed.pdf")),
            mime: "image/png".into(),
            ..Default::default()
        };
        let selected = selected_from_dropped(&file).unwrap();
        assert_eq!(selected.media_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn test_web_drop_keeps_bytes() {
        let file = DroppedFile {
            name: "upload.pdf".into(),
            mime: "application/pdf".into(),
            bytes: Some(Arc::from(&b"%PDF"[..])),
            ..Default::default()
        };
        let selected = selected_from_dropped(&file).unwrap();
        assert_eq!(
            selected.source,
            shared::FileSource::Memory(bytes::Bytes::from_static(b"%PDF"))
        );
        assert_eq!(selected.media_type.as_deref(), Some("application/pdf"));
    }

    #[test]
    fn test_drop_without_content_is_skipped() {
        let file = DroppedFile {
            name: "ghost.pdf".into(),
            ..Default::default()
        };
        assert!(selected_from_dropped(&file).is_none());
    }
}
