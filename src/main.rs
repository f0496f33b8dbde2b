use eframe::egui;

mod app;
mod download;
mod localizations;
mod models;
mod probe;
mod theme;
mod ui;
mod updater;

use app::ShellApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 380.0])
            .with_min_inner_size([480.0, 320.0])
            .with_title("YouTube Downloader"),
        ..Default::default()
    };

    eframe::run_native(
        "YouTube Downloader",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Box::new(ShellApp::new())
        }),
    )
}
