use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};
use paper_explorer::chart::{abstract_histogram, CHART_TITLE_WORDS};
use paper_explorer::color::{self, Rgb8};
use paper_explorer::data::aggregate::Aggregates;

use super::to_color32;

const PLOT_HEIGHT: f32 = 320.0;
/// Journals shown in the dashboard chart.
const CHART_JOURNALS: usize = 10;

// ---------------------------------------------------------------------------
// Generic bar plot
// ---------------------------------------------------------------------------

/// Render labelled counts as a bar chart. Hovering a bar shows its label.
fn bar_plot(
    ui: &mut Ui,
    id: &str,
    series: &str,
    bars: Vec<Bar>,
    color: Color32,
    x_label: &str,
    y_label: &str,
) {
    if bars.is_empty() {
        ui.label("No data for the current filters.");
        return;
    }

    let chart = BarChart::new(bars).name(series).color(color);

    Plot::new(id)
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

fn labelled_bars(counts: &[(String, usize)], colors: &[Rgb8]) -> Vec<Bar> {
    counts
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            let mut bar = Bar::new(i as f64, *count as f64).name(label).width(0.8);
            if !colors.is_empty() {
                bar = bar.fill(to_color32(colors[i % colors.len()]));
            }
            bar
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

pub fn publications_by_year(ui: &mut Ui, aggregates: &Aggregates) {
    let bars = aggregates
        .year_counts
        .iter()
        .map(|(year, count)| {
            Bar::new(*year as f64, *count as f64)
                .name(year.to_string())
                .width(0.8)
        })
        .collect();
    bar_plot(
        ui,
        "publications_by_year",
        "Publications",
        bars,
        to_color32(color::SKY_BLUE),
        "Year",
        "Number of Publications",
    );
}

pub fn top_journals(ui: &mut Ui, aggregates: &Aggregates) {
    let top: Vec<(String, usize)> = aggregates
        .top_journals
        .iter()
        .take(CHART_JOURNALS)
        .cloned()
        .collect();
    bar_plot(
        ui,
        "top_journals",
        "Publications",
        labelled_bars(&top, &[color::LIGHT_GREEN]),
        to_color32(color::LIGHT_GREEN),
        "Journal (rank)",
        "Number of Publications",
    );
    ranked_legend(ui, &top);
}

pub fn title_words(ui: &mut Ui, aggregates: &Aggregates) {
    let top: Vec<(String, usize)> = aggregates
        .title_words
        .iter()
        .take(CHART_TITLE_WORDS)
        .cloned()
        .collect();
    bar_plot(
        ui,
        "title_words",
        "Frequency",
        labelled_bars(&top, &[color::LIGHT_CORAL]),
        to_color32(color::LIGHT_CORAL),
        "Word (rank)",
        "Frequency",
    );
    ranked_legend(ui, &top);
}

pub fn abstract_lengths(ui: &mut Ui, aggregates: &Aggregates) {
    let hist = abstract_histogram(&aggregates.abstract_lengths);
    let bars = hist
        .counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(i, &count)| {
            let start = hist.bin_start(i);
            Bar::new(start + hist.bin_width / 2.0, count as f64)
                .width(hist.bin_width)
                .name(format!("{start:.0}–{:.0} words", start + hist.bin_width))
        })
        .collect();
    bar_plot(
        ui,
        "abstract_lengths",
        "Abstracts",
        bars,
        to_color32(color::ORANGE),
        "Number of Words in Abstract",
        "Frequency",
    );
}

pub fn sources(ui: &mut Ui, aggregates: &Aggregates) {
    let palette = color::generate_palette(aggregates.source_counts.len());
    bar_plot(
        ui,
        "sources",
        "Papers",
        labelled_bars(&aggregates.source_counts, &palette),
        to_color32(color::PURPLE),
        "Source (rank)",
        "Number of Papers",
    );
    ranked_legend(ui, &aggregates.source_counts);
}

/// Bars are placed by rank; list the labels underneath.
fn ranked_legend(ui: &mut Ui, counts: &[(String, usize)]) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (i, (label, count)) in counts.iter().enumerate() {
            ui.small(rank_label(i, label, *count));
        }
    });
}

/// One-based legend entry for the bar at position `index`.
fn rank_label(index: usize, label: &str, count: usize) -> String {
    format!("{}. {label} ({count})", index + 1)
}
