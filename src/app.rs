use std::path::Path;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{overview, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PaperExplorerApp {
    pub state: AppState,
}

impl PaperExplorerApp {
    /// Start the dashboard with `input` already loaded.
    pub fn new(input: &Path) -> Self {
        let mut state = AppState::default();
        state.load(input);
        Self { state }
    }
}

impl eframe::App for PaperExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, sample table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            overview::central_panel(ui, &mut self.state);
        });
    }
}
