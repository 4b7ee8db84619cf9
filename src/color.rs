// Simple color struct, parsed from a css hex string like "#3b82f6"
// Alpha is not stored: particles carry their own opacity and edges use a fixed alpha

use crate::error::FieldError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 16) as u8;
        let g = (num >> 8) as u8;
        let b = num as u8;

        Color { r, g, b }
    }

    /// Parses `#rrggbb` or the `#rgb` shorthand. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Color, FieldError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || FieldError::InvalidColor(hex.to_owned());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        match digits.len() {
            6 => u32::from_str_radix(digits, 16)
                .map(Color::from_u32)
                .map_err(|_| invalid()),
            3 => {
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16)
                    .map(Color::from_u32)
                    .map_err(|_| invalid())
            }
            _ => Err(invalid()),
        }
    }

    /// Css color with a two-digit alpha suffix, e.g. `#3b82f620`.
    pub fn to_css_with_alpha(&self, alpha: u8) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, alpha)
    }
}

/// Opacity in [0, 1] to the byte used as a hex alpha suffix.
/// Truncates rather than rounds.
pub fn alpha_byte(opacity: f64) -> u8 {
    (opacity * 255.0).max(0.0).min(255.0) as u8
}
