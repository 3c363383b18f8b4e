use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use paper_explorer::chart::export_charts;
use paper_explorer::data::aggregate::Aggregates;
use paper_explorer::data::stats::DatasetSummary;
use paper_explorer::analyze_file;
use serde::Serialize;

/// Render the aggregate views of a metadata file to static images.
#[derive(Parser)]
#[command(name = "export_charts", version, about)]
struct Cli {
    /// Metadata file (.csv, .tsv, .json or .parquet)
    #[arg(short, long, default_value = "metadata.csv")]
    input: PathBuf,

    /// Directory the PNG files and summary.json are written to
    #[arg(short, long, default_value = "images")]
    out_dir: PathBuf,
}

#[derive(Serialize)]
struct Report<'a> {
    source: String,
    summary: &'a DatasetSummary,
    aggregates: &'a Aggregates,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let analysis = analyze_file(&cli.input)
        .with_context(|| format!("analyzing {}", cli.input.display()))?;

    let written = export_charts(&analysis.aggregates, &cli.out_dir)
        .with_context(|| format!("writing charts to {}", cli.out_dir.display()))?;

    let summary_path = cli.out_dir.join("summary.json");
    let file = File::create(&summary_path)
        .with_context(|| format!("creating {}", summary_path.display()))?;
    serde_json::to_writer_pretty(
        BufWriter::new(file),
        &Report {
            source: analysis.source.display().to_string(),
            summary: &analysis.summary,
            aggregates: &analysis.aggregates,
        },
    )
    .context("writing summary.json")?;

    println!(
        "Visualizations saved to {} ({} files)",
        cli.out_dir.display(),
        written.len() + 1
    );

    let summary = &analysis.summary;
    println!("\n=== SUMMARY STATISTICS ===");
    println!("Total papers: {}", summary.total_papers);
    if let Some((first, last)) = summary.year_range {
        println!("Time range: {first} - {last}");
    }
    if let Some(journal) = &summary.most_common_journal {
        println!("Journals with most papers: {journal}");
    }
    println!(
        "Average abstract length: {:.1} words",
        summary.mean_abstract_words
    );
    Ok(())
}
