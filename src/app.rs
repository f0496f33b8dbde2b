use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use eframe::egui::{self, Stroke};
use log::error;

use crate::download;
use crate::localizations::Localizations;
use crate::models::{AppState, DialogKind, TaskKind, WorkerEvent};
use crate::probe;
use crate::theme::*;
use crate::ui;
use crate::updater;

pub struct ShellApp {
    pub state: AppState,
    localizer: Localizations,
    event_sender: Sender<WorkerEvent>,
    event_receiver: Receiver<WorkerEvent>,
}

impl Default for ShellApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellApp {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let localizer = Localizations::new();

        let mut state = AppState::default();
        state.download_dir = dirs::download_dir().unwrap_or_else(|| PathBuf::from("."));
        state.status = localizer
            .lookup_single_language("status-ready", None)
            .unwrap_or_else(|| "Ready".to_string());

        let mut app = Self {
            state,
            localizer,
            event_sender: tx,
            event_receiver: rx,
        };
        app.spawn_startup_tasks();
        app
    }

    /// Make sure the helper binary is present and warn once if ffmpeg is
    /// missing. Both run in the background and report over the channel.
    fn spawn_startup_tasks(&mut self) {
        probe::check_companion(self.event_sender.clone());

        self.state.active = Some(TaskKind::FetchHelper);
        updater::ensure_helper(self.event_sender.clone());
    }

    pub fn start_download(&mut self, ctx: &egui::Context) {
        if self.state.active.is_some() {
            return;
        }

        let Some(url) = download::normalized_url(&self.state.url).map(str::to_string) else {
            self.state.last_error = Some(
                self.localizer
                    .lookup_single_language("error-no-url", None)
                    .unwrap_or_else(|| "Please enter a YouTube URL.".to_string()),
            );
            return;
        };

        let helper = match updater::helper_path() {
            Ok(path) if path.exists() => path,
            Ok(_) => {
                let message = self
                    .localizer
                    .lookup_single_language("error-helper-missing", None)
                    .unwrap_or_else(|| "yt-dlp binary is missing.".to_string());
                self.state.last_error = Some(message.clone());
                self.show_error_dialog(&message);
                return;
            }
            Err(e) => {
                error!("cannot resolve helper path: {e:#}");
                self.state.last_error = Some(e.to_string());
                return;
            }
        };

        self.state.active = Some(TaskKind::Download);
        self.state.last_error = None;
        self.state.show_open_folder = false;
        self.state.status = self
            .localizer
            .lookup_single_language("status-downloading", None)
            .unwrap_or_else(|| "Starting download...".to_string());

        download::start_download(
            helper,
            url,
            self.state.format,
            self.state.download_dir.clone(),
            self.event_sender.clone(),
        );
        ctx.request_repaint();
    }

    pub fn update_helper(&mut self, ctx: &egui::Context) {
        if self.state.active.is_some() {
            return;
        }

        self.state.active = Some(TaskKind::UpdateHelper);
        self.state.last_error = None;
        self.state.status = self
            .localizer
            .lookup_single_language("status-updating", None)
            .unwrap_or_else(|| "Updating yt-dlp...".to_string());

        updater::update_helper(self.event_sender.clone());
        ctx.request_repaint();
    }

    fn process_worker_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.event_receiver.try_recv() {
            if let Some(dialog) = self.state.apply_event(event) {
                self.show_dialog(dialog);
            }
            ctx.request_repaint();
        }
    }

    fn show_dialog(&self, dialog: DialogKind) {
        match dialog {
            DialogKind::CompanionMissing => {
                let _ = rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Warning)
                    .set_title(
                        &self
                            .localizer
                            .lookup_single_language("warn-companion-title", None)
                            .unwrap_or_else(|| "Missing Dependency".to_string()),
                    )
                    .set_description(
                        &self
                            .localizer
                            .lookup_single_language("warn-companion-body", None)
                            .unwrap_or_else(|| "FFmpeg is not installed.".to_string()),
                    )
                    .show();
            }
            DialogKind::FetchFailed(message) => {
                let prefix = self
                    .localizer
                    .lookup_single_language("error-fetch-failed", None)
                    .unwrap_or_else(|| "Failed to download yt-dlp:".to_string());
                self.show_error_dialog(&format!("{prefix}\n{message}"));
            }
            DialogKind::DownloadFailed(message) => {
                let prefix = self
                    .localizer
                    .lookup_single_language("error-download-failed", None)
                    .unwrap_or_else(|| "Download failed:".to_string());
                self.show_error_dialog(&format!("{prefix}\n{message}"));
            }
        }
    }

    fn show_error_dialog(&self, message: &str) {
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(
                &self
                    .localizer
                    .lookup_single_language("error-title", None)
                    .unwrap_or_else(|| "Error".to_string()),
            )
            .set_description(message)
            .show();
    }

    fn heading_text(&self) -> String {
        let title = self
            .localizer
            .lookup_single_language("app-title", None)
            .unwrap_or_else(|| "YouTube Downloader".to_string());
        if self.state.helper_version.is_empty() {
            title
        } else {
            format!("{} (yt-dlp v{})", title, self.state.helper_version)
        }
    }

    pub fn update_ui(&mut self, ctx: &egui::Context) {
        self.process_worker_events(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.heading_text());

            ui.add_space(20.0);

            let url_response = ui::render_url_input(ui, &mut self.state, &self.localizer);
            if url_response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.start_download(ctx);
            }

            ui.add_space(10.0);
            ui::render_format_selector(ui, &mut self.state, &self.localizer);
            ui.add_space(20.0);

            ui::render_status(ui, &self.state, &self.localizer);
            ui.add_space((ui.available_height() - 100.0).max(0.0));

            self.render_buttons(ui, ctx);
        });

        // Keep repainting while a worker is running so its events are
        // drained promptly even without input.
        if self.state.active.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    fn render_buttons(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let idle = self.state.active.is_none();

        ui.horizontal(|ui| {
            ui.add_space(ui.available_width() / 2.0 - 150.0);

            let button_text = self
                .localizer
                .lookup_single_language("download-button", None)
                .unwrap_or_else(|| "Start Download".to_string());

            let download_button = egui::Button::new(
                egui::RichText::new(button_text)
                    .size(BUTTON_FONT_SIZE)
                    .color(BUTTON_MAIN_TEXT),
            )
            .min_size(MIN_SIZE_BUTTON)
            .fill(PRIMARY_BUTTON_BG)
            .rounding(ROUNDING_BUTTON)
            .stroke(Stroke::new(1.0, BORDER_COLOR));

            if ui.add_enabled(idle, download_button).clicked() {
                self.start_download(ctx);
            }

            ui.add_space(20.0);

            let update_button = egui::Button::new(
                egui::RichText::new(
                    self.localizer
                        .lookup_single_language("update-button", None)
                        .unwrap_or_else(|| "Update yt-dlp".to_string()),
                )
                .size(BUTTON_FONT_SIZE)
                .color(BUTTON_MAIN_TEXT),
            )
            .min_size(MIN_SIZE_BUTTON)
            .fill(SECONDARY_BUTTON_BG)
            .rounding(ROUNDING_BUTTON)
            .stroke(Stroke::new(1.0, BORDER_COLOR));

            if ui.add_enabled(idle, update_button).clicked() {
                self.update_helper(ctx);
            }
        });
    }
}

impl eframe::App for ShellApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_ui(ctx);
    }
}
