use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Background, tone mapping and frame pacing.
pub struct DisplayOptions {
    /// Clear colour as `#RRGGBB` (sRGB).
    pub background: String,
    /// Exposure multiplier applied before ACES tone mapping.
    pub exposure: f32,
    /// Draw the environment map behind the model instead of the clear
    /// colour.
    pub environment_as_background: bool,
    /// Frame rate cap; 0 follows the display's vsync.
    pub target_fps: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".into(),
            exposure: 2.0,
            environment_as_background: false,
            target_fps: 0,
        }
    }
}

impl DisplayOptions {
    /// Background as linear RGB. Unparseable values fall back to white.
    #[must_use]
    pub fn background_linear(&self) -> [f32; 3] {
        parse_hex_color(&self.background).unwrap_or_else(|| {
            log::warn!("invalid background colour '{}'", self.background);
            [1.0; 3]
        })
    }
}

/// Parse `#RRGGBB` (or `RRGGBB`) into linear RGB.
#[must_use]
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|c| srgb_to_linear(f32::from(c) / 255.0))
    };
    Some([channel(0)?, channel(2)?, channel(4)?])
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
