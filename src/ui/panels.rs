use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};
use paper_explorer::data::export::DEFAULT_EXPORT_NAME;
use paper_explorer::data::filter::abstract_bounds;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters and Controls");
    ui.separator();

    let analysis = match &state.analysis {
        Some(analysis) => Arc::clone(analysis),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };
    let Some(filter) = state.filter.as_mut() else {
        return;
    };

    let mut changed = false;
    let mut journal_action = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year range ----
            if let Some((min_year, max_year)) = analysis.summary.year_range {
                ui.strong("Publication year range");
                let mut start = *filter.years.start();
                let mut end = *filter.years.end();
                changed |= ui
                    .add(Slider::new(&mut start, min_year..=max_year).text("from"))
                    .changed();
                changed |= ui
                    .add(Slider::new(&mut end, min_year..=max_year).text("to"))
                    .changed();
                filter.years = start.min(end)..=end.max(start);
                ui.separator();
            }

            // ---- Journals (top 15) ----
            let journals = &analysis.aggregates.top_journals;
            let header_text = format!(
                "Journals  ({}/{})",
                filter.journals.len(),
                journals.len()
            );
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("journal_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            journal_action = Some(JournalAction::SelectAll);
                        }
                        if ui.small_button("None").clicked() {
                            journal_action = Some(JournalAction::Clear);
                        }
                    });
                    if filter.journals.is_empty() {
                        ui.weak("No journal selected: showing all journals");
                    }

                    for (journal, count) in journals {
                        let mut checked = filter.journals.contains(journal);
                        if ui
                            .checkbox(&mut checked, format!("{journal}  ({count})"))
                            .changed()
                        {
                            journal_action = Some(JournalAction::Toggle(journal.clone()));
                        }
                    }
                });
            ui.separator();

            // ---- Abstract length ----
            let (lo, hi) = abstract_bounds(&analysis);
            ui.strong("Abstract word count range");
            let mut min_words = *filter.abstract_words.start();
            let mut max_words = *filter.abstract_words.end();
            changed |= ui
                .add(Slider::new(&mut min_words, lo..=hi).text("min"))
                .changed();
            changed |= ui
                .add(Slider::new(&mut max_words, lo..=hi).text("max"))
                .changed();
            filter.abstract_words = min_words.min(max_words)..=max_words.max(min_words);
        });

    // Journal actions refilter on their own; sliders need an explicit pass.
    match journal_action {
        Some(JournalAction::SelectAll) => state.select_all_journals(),
        Some(JournalAction::Clear) => state.select_no_journals(),
        Some(JournalAction::Toggle(journal)) => state.toggle_journal(&journal),
        None if changed => state.refilter(),
        None => {}
    }
}

/// Journal selection change requested by the side panel.
enum JournalAction {
    SelectAll,
    Clear,
    Toggle(String),
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let reload_enabled = state.input_path.is_some();
            if ui
                .add_enabled(reload_enabled, egui::Button::new("Reload"))
                .clicked()
            {
                if let Some(path) = state.input_path.clone() {
                    state.load(&path);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(path) = &state.input_path {
            ui.label(path.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::DARK_GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open paper metadata")
        .add_filter("Supported files", &["csv", "tsv", "tab", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv", "tab"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}

pub fn save_filtered_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Download filtered data as CSV")
        .set_file_name(DEFAULT_EXPORT_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_filtered(&path);
    }
}
