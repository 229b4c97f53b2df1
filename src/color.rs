use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Number of entries in the categorical group palette.
pub const PALETTE_SIZE: usize = 10;

/// Colour of bars that belong to no group.
pub const DEFAULT_BAR_COLOR: Color32 = Color32::LIGHT_BLUE;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Group colours: group number → Color32
// ---------------------------------------------------------------------------

/// Fixed categorical palette indexed by `group % PALETTE_SIZE`.
#[derive(Debug, Clone)]
pub struct GroupPalette {
    colors: Vec<Color32>,
}

impl Default for GroupPalette {
    fn default() -> Self {
        Self {
            colors: generate_palette(PALETTE_SIZE),
        }
    }
}

impl GroupPalette {
    /// Colour for a group number.
    pub fn color_for(&self, group: u32) -> Color32 {
        self.colors[group as usize % self.colors.len()]
    }
}
