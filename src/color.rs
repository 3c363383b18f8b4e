use palette::{Hsl, IntoColor, Srgb};

/// An sRGB colour as 8-bit channels.
pub type Rgb8 = [u8; 3];

// Fixed colours for each chart
pub const SKY_BLUE: Rgb8 = [135, 206, 235];
pub const LIGHT_GREEN: Rgb8 = [144, 238, 144];
pub const LIGHT_CORAL: Rgb8 = [240, 128, 128];
pub const ORANGE: Rgb8 = [255, 165, 0];
pub const PURPLE: Rgb8 = [128, 0, 128];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb8> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            [
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ]
        })
        .collect()
}
