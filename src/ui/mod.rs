pub mod overview;
pub mod panels;
pub mod plot;

use eframe::egui::Color32;
use paper_explorer::color::Rgb8;

pub fn to_color32([r, g, b]: Rgb8) -> Color32 {
    Color32::from_rgb(r, g, b)
}
