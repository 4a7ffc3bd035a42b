mod app;
mod chart;
mod data;
mod state;
mod theme;
mod ui;

use app::AirViewApp;
use clap::Parser;
use data::loader::Source;
use eframe::egui;
use theme::Theme;

/// Air-quality readings viewer: four particulate-matter charts built from a
/// fetched readings document, with embedded fallback data.
#[derive(Parser, Debug)]
#[command(name = "airview", version, about)]
struct Args {
    /// Readings document: an http(s) URL or a local JSON file.
    /// When omitted, the embedded fallback readings are shown.
    #[arg(long)]
    source: Option<String>,

    /// Skip any fetch and use the embedded fallback readings.
    #[arg(long)]
    offline: bool,

    /// Initial theme, overriding the stored preference.
    #[arg(long, value_enum)]
    theme: Option<Theme>,
}

fn main() -> eframe::Result {
    env_logger::init();

    let args = Args::parse();
    let source = Source::from_args(args.source.as_deref(), args.offline);
    log::info!("readings source: {}", source.describe());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "AirView – Air Quality Readings",
        options,
        Box::new(move |cc| Ok(Box::new(AirViewApp::new(cc, source, args.theme)))),
    )
}
