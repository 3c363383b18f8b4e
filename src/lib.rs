//! Paper metadata explorer.
//!
//! The [`data`] module holds the load → clean → aggregate pipeline; [`chart`]
//! renders aggregates to static images; [`color`] generates categorical
//! palettes shared by the dashboard and the chart exporter.

pub mod chart;
pub mod color;
pub mod data;
pub mod error;

pub use data::{analyze_file, Analysis};
pub use error::{Error, Result};
