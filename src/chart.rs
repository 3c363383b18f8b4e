//! Static chart rendering.
//!
//! Charts are plain bar plots drawn straight onto an [`RgbImage`]: a white
//! canvas, two axis lines and one bar per value scaled to the largest. Labels
//! are not drawn; `summary.json` written next to the images carries them.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

use crate::color::{self, Rgb8};
use crate::data::aggregate::Aggregates;
use crate::error::Result;

pub const CHART_WIDTH: u32 = 1200;
pub const CHART_HEIGHT: u32 = 600;
pub const HISTOGRAM_BINS: usize = 50;
/// Abstracts at or above this length are left out of the histogram.
pub const ABSTRACT_LENGTH_CUTOFF: usize = 1000;
/// Title words shown in the static chart.
pub const CHART_TITLE_WORDS: usize = 10;

const MARGIN: u32 = 40;
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([40, 40, 40]);

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

/// Equal-width bins spanning the minimum to the maximum value; the last bin
/// is closed on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub lower: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn from_values(values: &[usize], bins: usize) -> Self {
        let bins = bins.max(1);
        let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
            return Self {
                lower: 0.0,
                bin_width: 1.0,
                counts: vec![0; bins],
            };
        };

        // A single distinct value gets a unit-wide range centred on it.
        let (lower, upper) = if min == max {
            (min as f64 - 0.5, max as f64 + 0.5)
        } else {
            (min as f64, max as f64)
        };
        let bin_width = (upper - lower) / bins as f64;

        let mut counts = vec![0; bins];
        for &v in values {
            let idx = ((v as f64 - lower) / bin_width) as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        Self {
            lower,
            bin_width,
            counts,
        }
    }

    /// Left edge of bin `i`.
    pub fn bin_start(&self, i: usize) -> f64 {
        self.lower + self.bin_width * i as f64
    }
}

/// Abstract lengths below the cutoff, binned for display.
pub fn abstract_histogram(lengths: &[usize]) -> Histogram {
    let kept: Vec<usize> = lengths
        .iter()
        .copied()
        .filter(|&l| l < ABSTRACT_LENGTH_CUTOFF)
        .collect();
    Histogram::from_values(&kept, HISTOGRAM_BINS)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Draw one bar per value. `colors` is cycled when shorter than `values`.
pub fn render_bars(values: &[usize], colors: &[Rgb8], width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, WHITE);
    if width <= 2 * MARGIN || height <= 2 * MARGIN {
        return img;
    }

    let plot_w = width - 2 * MARGIN;
    let plot_h = height - 2 * MARGIN;
    let baseline = height - MARGIN;

    let max = values.iter().copied().max().unwrap_or(0);
    if !values.is_empty() && max > 0 && !colors.is_empty() {
        let slot = plot_w as f64 / values.len() as f64;
        let gap = (slot * 0.1).floor();
        for (i, &v) in values.iter().enumerate() {
            let bar_h = ((v as f64 / max as f64) * plot_h as f64).round() as u32;
            let x0 = MARGIN + (slot * i as f64 + gap / 2.0) as u32;
            let x1 = MARGIN + (slot * (i + 1) as f64 - gap / 2.0) as u32;
            let [r, g, b] = colors[i % colors.len()];
            fill_rect(&mut img, x0, baseline - bar_h, x1, baseline, Rgb([r, g, b]));
        }
    }

    // Axes
    fill_rect(&mut img, MARGIN, baseline, width - MARGIN, baseline + 2, AXIS);
    fill_rect(&mut img, MARGIN - 2, MARGIN, MARGIN, baseline + 2, AXIS);
    img
}

/// Fill the half-open rectangle `[x0, x1) × [y0, y1)`, clipped to the image.
fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

fn counts_of<K>(counts: &[(K, usize)]) -> Vec<usize> {
    counts.iter().map(|(_, c)| *c).collect()
}

/// Render every aggregate view as a PNG in `out_dir`, creating it if needed.
///
/// Returns the paths written.
pub fn export_charts(aggregates: &Aggregates, out_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;

    let title_words: Vec<(String, usize)> = aggregates
        .title_words
        .iter()
        .take(CHART_TITLE_WORDS)
        .cloned()
        .collect();

    let charts: Vec<(&str, Vec<usize>, Vec<Rgb8>)> = vec![
        (
            "publications_by_year.png",
            counts_of(&aggregates.year_counts),
            vec![color::SKY_BLUE],
        ),
        (
            "top_journals.png",
            counts_of(&aggregates.top_journals),
            vec![color::LIGHT_GREEN],
        ),
        (
            "title_words.png",
            counts_of(&title_words),
            vec![color::LIGHT_CORAL],
        ),
        (
            "abstract_lengths.png",
            abstract_histogram(&aggregates.abstract_lengths).counts,
            vec![color::ORANGE],
        ),
        (
            "source_distribution.png",
            counts_of(&aggregates.source_counts),
            color::generate_palette(aggregates.source_counts.len().max(1)),
        ),
    ];

    let mut written = Vec::with_capacity(charts.len());
    for (name, values, colors) in charts {
        let path = out_dir.join(name);
        render_bars(&values, &colors, CHART_WIDTH, CHART_HEIGHT).save(&path)?;
        log::info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_every_value() {
        let values = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let hist = Histogram::from_values(&values, 5);
        assert_eq!(hist.counts.iter().sum::<usize>(), values.len());
        assert_eq!(hist.counts, vec![2, 2, 2, 2, 3]);
        assert_eq!(hist.bin_start(1), 2.0);
    }

    #[test]
    fn test_histogram_single_value_and_empty() {
        let hist = Histogram::from_values(&[42, 42], 10);
        assert_eq!(hist.counts.iter().sum::<usize>(), 2);

        let empty = Histogram::from_values(&[], 10);
        assert_eq!(empty.counts, vec![0; 10]);
    }

    #[test]
    fn test_abstract_histogram_drops_long_abstracts() {
        let hist = abstract_histogram(&[10, 20, 999, 1000, 5000]);
        assert_eq!(hist.counts.iter().sum::<usize>(), 3);
    }

    #[test]
    fn test_render_bars_draws_tallest_bar_to_top() {
        let img = render_bars(&[1, 2], &[color::ORANGE], 200, 200);
        let [r, g, b] = color::ORANGE;
        // Second bar reaches the top margin; the first stops halfway.
        assert_eq!(*img.get_pixel(150, MARGIN + 1), Rgb([r, g, b]));
        assert_eq!(*img.get_pixel(80, MARGIN + 1), WHITE);
        assert_eq!(*img.get_pixel(80, 150), Rgb([r, g, b]));
    }

    #[test]
    fn test_export_charts_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let aggregates = Aggregates {
            year_counts: vec![(2020, 3), (2021, 5)],
            top_journals: vec![("Nature".to_string(), 2)],
            title_words: vec![("covid".to_string(), 4)],
            abstract_lengths: vec![10, 20, 30],
            source_counts: vec![],
        };
        let paths = export_charts(&aggregates, &dir.path().join("images")).unwrap();
        assert_eq!(paths.len(), 5);
        for path in paths {
            assert!(path.exists(), "{} missing", path.display());
        }
    }
}
