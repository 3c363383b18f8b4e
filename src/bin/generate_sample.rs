use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use paper_explorer::Error;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const JOURNALS: [(&str, f64); 15] = [
    ("Journal of Medical Research", 0.10),
    ("The Lancet", 0.08),
    ("New England Journal of Medicine", 0.07),
    ("Nature", 0.06),
    ("Science", 0.05),
    ("BMJ", 0.09),
    ("JAMA", 0.08),
    ("PLOS One", 0.12),
    ("PubMed", 0.10),
    ("Clinical Medicine", 0.05),
    ("Epidemiology", 0.04),
    ("Public Health", 0.03),
    ("Virology", 0.02),
    ("Immunology", 0.02),
    ("Unknown", 0.09),
];

const SOURCES: [&str; 5] = ["PMC", "WHO", "CZI", "NIH", "Other"];

const COVID_WORDS: [&str; 18] = [
    "COVID", "SARS", "Coronavirus", "Pandemic", "Vaccine", "Transmission", "Lockdown", "Mask",
    "Distance", "Infection", "Variant", "Immunity", "Treatment", "Symptoms", "Testing", "Spread",
    "Outbreak", "Isolation",
];

const COMMON_WORDS: [&str; 20] = [
    "Study", "Analysis", "Review", "Case", "Report", "Clinical", "Trial", "Effect", "Impact",
    "Model", "Data", "Results", "Findings", "Patients", "Health", "Public", "Medical", "Research",
    "Evaluation", "Assessment",
];

const IMPLICATIONS: [&str; 3] = ["public health", "clinical practice", "policy making"];

/// Generate a synthetic paper metadata file.
#[derive(Parser)]
#[command(name = "generate_sample", version, about)]
struct Cli {
    /// Number of records to generate
    #[arg(short, long, default_value_t = 200)]
    rows: usize,

    /// PRNG seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Output file (.csv or .parquet)
    #[arg(short, long, default_value = "sample_metadata.csv")]
    output: PathBuf,

    /// Probability of corrupting each of abstract, journal and date
    #[arg(long, default_value_t = 0.0)]
    noise: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    fn choose<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    /// Pick from `(item, weight)` pairs.
    fn choose_weighted<'a>(&mut self, items: &[(&'a str, f64)]) -> &'a str {
        let total: f64 = items.iter().map(|(_, w)| w).sum();
        let mut target = self.next_f64() * total;
        for &(item, weight) in items {
            if target < weight {
                return item;
            }
            target -= weight;
        }
        items[items.len() - 1].0
    }

    /// `k` distinct items in random order (partial Fisher–Yates).
    fn sample<'a>(&mut self, items: &[&'a str], k: usize) -> Vec<&'a str> {
        let mut pool = items.to_vec();
        let k = k.min(pool.len());
        for i in 0..k {
            let j = i + self.below(pool.len() - i);
            pool.swap(i, j);
        }
        pool.truncate(k);
        pool
    }

    fn shuffle(&mut self, items: &mut [&str]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

#[derive(Debug, Serialize)]
struct SampleRow {
    cord_uid: String,
    title: String,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    journal: Option<String>,
    publish_time: String,
    authors: String,
    url: String,
    source_x: String,
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// A date between 2020-01-01 and 2022-12-31 as `YYYY-MM-DD`.
fn random_date(rng: &mut SimpleRng) -> String {
    let year = 2020 + rng.below(3) as i32;
    let month = 1 + rng.below(12) as u32;
    let day = 1 + rng.below(days_in_month(year, month) as usize) as u32;
    format!("{year:04}-{month:02}-{day:02}")
}

fn generate_row(i: usize, rng: &mut SimpleRng, noise: f64) -> SampleRow {
    let mut words = rng.sample(&COVID_WORDS, 3);
    words.extend(rng.sample(&COMMON_WORDS, 2));
    rng.shuffle(&mut words);
    let title = format!("{}: A Comprehensive Analysis", words.join(" "));

    let abstract_text = format!(
        "This study examines {} in the context of {}. \
         Our findings suggest significant implications for {}. \
         Further research is needed to confirm these results.",
        rng.choose(&COVID_WORDS),
        rng.choose(&COMMON_WORDS),
        rng.choose(&IMPLICATIONS),
    );

    let mut journal = Some(rng.choose_weighted(&JOURNALS).to_string());
    let mut publish_time = random_date(rng);
    let source_x = rng.choose(&SOURCES).to_string();

    let abstract_text = if rng.chance(noise) {
        None
    } else {
        Some(abstract_text)
    };
    if rng.chance(noise) {
        journal = journal.map(|j| format!("  {j}  "));
    }
    if rng.chance(noise) {
        journal = None;
    }
    if rng.chance(noise) {
        publish_time = "unknown date".to_string();
    }

    SampleRow {
        cord_uid: format!("sample{i:06}"),
        title,
        abstract_text,
        journal,
        publish_time,
        authors: format!(
            "Researcher{}, Coauthor{}, Collaborator{}",
            i % 10,
            (i + 1) % 10,
            (i + 2) % 10
        ),
        url: format!("https://example.com/paper{i}"),
        source_x,
    }
}

fn write_csv(rows: &[SampleRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_parquet(rows: &[SampleRow], path: &Path) -> Result<()> {
    fn column<'a>(
        rows: &'a [SampleRow],
        f: impl Fn(&'a SampleRow) -> Option<&'a str>,
    ) -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    }

    let names = [
        "cord_uid",
        "title",
        "abstract",
        "journal",
        "publish_time",
        "authors",
        "url",
        "source_x",
    ];
    let schema = Arc::new(Schema::new(
        names
            .iter()
            .map(|n| Field::new(*n, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            column(rows, |r| Some(r.cord_uid.as_str())),
            column(rows, |r| Some(r.title.as_str())),
            column(rows, |r| r.abstract_text.as_deref()),
            column(rows, |r| r.journal.as_deref()),
            column(rows, |r| Some(r.publish_time.as_str())),
            column(rows, |r| Some(r.authors.as_str())),
            column(rows, |r| Some(r.url.as_str())),
            column(rows, |r| Some(r.source_x.as_str())),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if !(0.0..=1.0).contains(&cli.noise) {
        bail!("--noise must be between 0 and 1, got {}", cli.noise);
    }

    let mut rng = SimpleRng::new(cli.seed);
    let rows: Vec<SampleRow> = (0..cli.rows)
        .map(|i| generate_row(i, &mut rng, cli.noise))
        .collect();

    let ext = cli
        .output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "parquet" | "pq" => write_parquet(&rows, &cli.output)?,
        "csv" => write_csv(&rows, &cli.output)?,
        other => return Err(Error::UnsupportedFormat(other.to_string()).into()),
    }

    log::info!("Generated {} rows with seed {}", rows.len(), cli.seed);
    println!(
        "Sample data saved to {} with {} rows",
        cli.output.display(),
        rows.len()
    );
    Ok(())
}
