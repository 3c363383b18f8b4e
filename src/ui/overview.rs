use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use super::{panels, plot};
use crate::state::{AppState, Tab};

/// Rows shown in the sample-data table.
const SAMPLE_ROWS: usize = 20;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new("Paper Metadata Explorer").size(28.0));

    let Some(analysis) = state.analysis.clone() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            let msg = state
                .status_message
                .clone()
                .unwrap_or_else(|| "Open a metadata file  (File → Open…)".to_string());
            ui.heading(msg);
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Metrics ----
            ui.columns(3, |cols| {
                metric(&mut cols[0], "Total Papers", analysis.summary.total_papers.to_string());
                metric(&mut cols[1], "Filtered Papers", state.visible_indices.len().to_string());
                metric(
                    &mut cols[2],
                    "Average Abstract Length",
                    format!("{:.1} words", state.filtered_summary.mean_abstract_words),
                );
            });
            ui.separator();

            // ---- Dataset overview ----
            ui.heading("Dataset Overview");
            ui.columns(2, |cols| {
                let summary = &analysis.summary;
                let ui = &mut cols[0];
                ui.strong("Key Statistics:");
                if let Some((first, last)) = summary.year_range {
                    ui.label(format!("• Time range: {first} - {last}"));
                }
                ui.label(format!("• Number of unique journals: {}", summary.unique_journals));
                ui.label(format!("• Papers with abstracts: {}", summary.papers_with_abstracts));
                if let Some(journal) = &summary.most_common_journal {
                    ui.label(format!("• Most common journal: {journal}"));
                }

                let ui = &mut cols[1];
                ui.strong("Filter Information:");
                if let Some(filter) = &state.filter {
                    ui.label(format!(
                        "• Selected years: {} - {}",
                        filter.years.start(),
                        filter.years.end()
                    ));
                    ui.label(format!(
                        "• Selected journals: {} of {}",
                        filter.journals.len(),
                        analysis.aggregates.top_journals.len()
                    ));
                    ui.label(format!(
                        "• Abstract length: {} - {} words",
                        filter.abstract_words.start(),
                        filter.abstract_words.end()
                    ));
                }
            });
            ui.separator();

            // ---- Visualizations ----
            ui.heading("Visualizations");
            ui.horizontal(|ui: &mut Ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(&mut state.tab, tab, tab.label());
                }
            });
            ui.add_space(6.0);

            let aggregates = &state.filtered_aggregates;
            match state.tab {
                Tab::PublicationsOverTime => {
                    ui.strong("Publications by Year");
                    plot::publications_by_year(ui, aggregates);
                }
                Tab::JournalAnalysis => {
                    ui.strong("Top Journals");
                    plot::top_journals(ui, aggregates);
                    ui.add_space(8.0);
                    ui.strong("Abstract Length Distribution");
                    plot::abstract_lengths(ui, aggregates);
                }
                Tab::ContentAnalysis => {
                    ui.strong("Common Words in Titles");
                    plot::title_words(ui, aggregates);
                    ui.add_space(8.0);
                    ui.strong("Data Sources");
                    if analysis.table.has_source {
                        plot::sources(ui, aggregates);
                    } else {
                        ui.label("The input has no source column.");
                    }
                }
                Tab::SampleData => sample_data(ui, state),
            }
        });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value).size(24.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Sample data table
// ---------------------------------------------------------------------------

fn sample_data(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Sample of Filtered Data");

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::remainder().at_least(240.0).clip(true))
        .column(Column::auto().at_least(140.0))
        .column(Column::auto())
        .column(Column::auto())
        .header(20.0, |mut header| {
            for name in ["Title", "Journal", "Year", "Abstract words"] {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for record in state.visible_records().take(SAMPLE_ROWS) {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&record.title);
                    });
                    row.col(|ui| {
                        ui.label(&record.journal);
                    });
                    row.col(|ui| {
                        ui.label(record.year.to_string());
                    });
                    row.col(|ui| {
                        ui.label(record.abstract_word_count.to_string());
                    });
                });
            }
        });

    ui.add_space(8.0);
    if ui
        .add_enabled(
            !state.visible_indices.is_empty(),
            egui::Button::new("Download filtered data as CSV"),
        )
        .clicked()
    {
        panels::save_filtered_dialog(state);
    }
}
