mod app;
mod config;
mod error;
mod upload;
mod utils;

use app::SheetConverter;
use clap::Parser;
use config::Settings;
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Excel to PDF Converter")
            .with_inner_size([600.0, 680.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Excel to PDF Converter",
        options,
        Box::new(move |cc| Box::new(SheetConverter::new(cc, settings))),
    )
}
