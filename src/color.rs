//! Velocity to color mapping.

use std::fmt::Display;

use crate::{
    colormap::{jet_index, JET},
    constants::MAX_VELOCITY,
};

/// 32-bit color in KML channel order (alpha, blue, green, red).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub alpha: u8,
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

impl Color {
    pub const fn new(alpha: u8, blue: u8, green: u8, red: u8) -> Self {
        Self { alpha, blue, green, red }
    }

    pub const BLACK: Color = Color::new(255, 0, 0, 0);
    pub const YELLOW: Color = Color::new(255, 0, 255, 255);

    /// KML hex notation `aabbggrr`.
    pub fn to_kml_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}{:02x}", self.alpha, self.blue, self.green, self.red)
    }

    /// Same color with different alpha.
    pub fn with_alpha(self, alpha: u8) -> Self {
        Self { alpha, ..self }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_kml_hex())
    }
}

/// Maps velocity magnitude in m/s onto the jet color table.
/// `0` is dark blue, `MAX_VELOCITY` and above dark red.
/// The sign of `velocity` is ignored.
pub fn map_velocity_to_color(velocity: f64, alpha: u8) -> Color {
    let [r, g, b] = JET[velocity_index(velocity)];
    Color::new(alpha, scale_channel(b), scale_channel(g), scale_channel(r))
}

/// Color table index for `velocity`.
pub fn velocity_index(velocity: f64) -> usize {
    jet_index(velocity.abs() / MAX_VELOCITY)
}

fn scale_channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
