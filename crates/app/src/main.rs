use eframe::egui;
use services::HttpUploader;
use shared::{UploadPhase, WidgetOutcome};
use std::sync::Arc;
use std::time::Duration;

mod utils;
mod widgets;

use widgets::{DragDropHandler, FileFilter, FilePickerWidget, UploadZone};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = utils::load_settings_or_default();
    tracing::info!(endpoint = %settings.endpoint_url(), "Loaded settings");
    let transport = Arc::new(HttpUploader::new(&settings)?);
    let zone = UploadZone::new(settings, transport);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 320.0])
            .with_min_inner_size([360.0, 260.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "PDF Drop",
        options,
        Box::new(move |_cc| {
            Box::new(PdfDropApp {
                zone,
                drop_handler: DragDropHandler::new("upload_zone"),
                picker: FilePickerWidget::new()
                    .with_title("Choose a PDF")
                    .with_filter(FileFilter::pdf())
                    .with_filter(FileFilter::all_files()),
            })
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to run window: {}", e))
}

struct PdfDropApp {
    zone: UploadZone,
    drop_handler: DragDropHandler,
    picker: FilePickerWidget,
}

impl PdfDropApp {
    fn apply_outcome(&mut self, ctx: &egui::Context, outcome: WidgetOutcome) {
        match outcome {
            WidgetOutcome::Navigate(url) => {
                if let Err(e) = open::that(&url) {
                    tracing::warn!(%url, "Could not open result page: {}", e);
                }
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            WidgetOutcome::NotifyFailure(message) => {
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Error)
                    .set_title("PDF Drop")
                    .set_description(message.as_str())
                    .set_buttons(rfd::MessageButtons::Ok)
                    .show();
            }
        }
    }
}

impl eframe::App for PdfDropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drop_handler.update(ctx, &mut self.zone);

        // Poll the transfer (non-blocking)
        if let Some(outcome) = self.zone.poll() {
            self.apply_outcome(ctx, outcome);
        }
        if self.zone.is_uploading() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Upload a PDF");
            ui.add_space(8.0);

            let width = ui.available_width();
            self.drop_handler
                .show_drop_zone(ui, &self.zone, egui::vec2(width, 140.0));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!self.zone.is_uploading(), egui::Button::new("Choose file…"))
                    .clicked()
                {
                    let event = self.picker.pick();
                    self.zone.pick(event);
                }

                if ui
                    .add_enabled(self.zone.can_submit(), egui::Button::new("Upload"))
                    .clicked()
                {
                    if let Err(e) = self.zone.submit() {
                        tracing::debug!(%e, "Submit ignored");
                    }
                }
            });

            ui.add_space(4.0);
            ui.label(match self.zone.phase() {
                UploadPhase::Idle => "No file selected",
                UploadPhase::Ready => "Ready to upload",
                UploadPhase::Uploading => "Uploading…",
                UploadPhase::Redirected => "Opening result…",
            });

            if self.zone.is_uploading() {
                ui.add_space(8.0);
                ui.add(
                    egui::ProgressBar::new(self.zone.progress().fraction())
                        .show_percentage()
                        .animate(true),
                );
            }
        });

        self.drop_handler.show_drag_overlay(ctx, &self.zone);
    }
}
