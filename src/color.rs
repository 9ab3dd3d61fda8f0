use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::SafetyTier;

// ---------------------------------------------------------------------------
// HSL helpers
// ---------------------------------------------------------------------------

fn hsl_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// `n` colours with hues spread evenly over `[hue_start, hue_end)`.
pub fn generate_palette(n: usize, hue_start: f32, hue_end: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = hue_start + (i as f32 / n as f32) * (hue_end - hue_start);
            hsl_color(hue, 0.75, 0.55)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Report colours
// ---------------------------------------------------------------------------

/// Red → amber marker colours for ranked peaks, loudest first.
pub fn peak_colors(n: usize) -> Vec<Color32> {
    generate_palette(n, 0.0, 50.0)
}

/// Traffic-light colour for a safety tier.
pub fn tier_color(tier: SafetyTier) -> Color32 {
    match tier {
        SafetyTier::Safe => hsl_color(130.0, 0.6, 0.5),
        SafetyTier::Moderate => hsl_color(48.0, 0.9, 0.55),
        SafetyTier::HighRisk => hsl_color(0.0, 0.8, 0.55),
    }
}

/// Line colour for the SPL trace.
pub fn trace_color() -> Color32 {
    hsl_color(217.0, 0.91, 0.6)
}
