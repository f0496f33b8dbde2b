use eframe::egui;

use crate::download;
use crate::localizations::Localizations;
use crate::models::{AppState, DownloadFormat};
use crate::theme::*;

pub fn render_url_input(
    ui: &mut egui::Ui,
    state: &mut AppState,
    localizer: &Localizations,
) -> egui::Response {
    ui.label(
        localizer
            .lookup_single_language("url-label", None)
            .unwrap_or_else(|| "Video URL:".to_string()),
    );

    egui::Frame::group(ui.style())
        .fill(egui::Color32::from_rgb(250, 250, 250))
        .stroke(egui::Stroke::new(1.0, egui::Color32::LIGHT_GRAY))
        .rounding(4.0)
        .show(ui, |ui| {
            ui.add_sized(
                [ui.available_width(), 40.0],
                egui::TextEdit::singleline(&mut state.url)
                    .hint_text(
                        localizer
                            .lookup_single_language("url-placeholder", None)
                            .unwrap_or_else(|| "Enter video URL".to_string()),
                    )
                    .font(egui::FontId::proportional(16.0)),
            )
        })
        .inner
}

pub fn render_format_selector(ui: &mut egui::Ui, state: &mut AppState, localizer: &Localizations) {
    ui.horizontal(|ui| {
        ui.label(
            localizer
                .lookup_single_language("download-format", None)
                .unwrap_or_else(|| "Download as:".to_string()),
        );

        let mp4_label = localizer
            .lookup_single_language("format-mp4", None)
            .unwrap_or_else(|| "MP4 (Video)".to_string());
        let mp3_label = localizer
            .lookup_single_language("format-mp3", None)
            .unwrap_or_else(|| "MP3 (Audio only)".to_string());

        ui.radio_value(&mut state.format, DownloadFormat::MP4, mp4_label);
        ui.radio_value(&mut state.format, DownloadFormat::MP3, mp3_label);
    });
}

pub fn render_status(ui: &mut egui::Ui, state: &AppState, localizer: &Localizations) {
    egui::Frame::group(ui.style())
        .fill(STATUS_BG)
        .rounding(8.0)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.add_space(10.0);

                let status_text = if let Some(error) = &state.last_error {
                    egui::RichText::new(format!("Error: {}", error)).color(TEXT_ERROR)
                } else {
                    egui::RichText::new(&state.status).color(egui::Color32::DARK_GRAY)
                };
                ui.horizontal(|ui| {
                    if state.active.is_some() {
                        ui.add(egui::Spinner::new());
                    }
                    ui.label(status_text);
                });

                if state.show_open_folder {
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if ui
                            .button(
                                localizer
                                    .lookup_single_language("open-folder-button", None)
                                    .unwrap_or_else(|| "Open folder".to_string()),
                            )
                            .clicked()
                        {
                            download::open_folder(&state.download_dir);
                        }
                        ui.label(
                            egui::RichText::new(state.download_dir.to_string_lossy())
                                .color(SECONDARY_TEXT),
                        );
                    });
                }

                ui.add_space(10.0);
            });
        });
}
