mod app;
mod cache;
mod state;
mod ui;

use std::path::PathBuf;

use app::PaperExplorerApp;
use clap::Parser;
use eframe::egui;

/// Interactive explorer for research-paper metadata.
#[derive(Parser)]
#[command(name = "paper-explorer", version, about)]
struct Cli {
    /// Metadata file to load (.csv, .tsv, .json or .parquet)
    #[arg(default_value = "metadata.csv")]
    input: PathBuf,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Paper Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(PaperExplorerApp::new(&cli.input)))),
    )
}
