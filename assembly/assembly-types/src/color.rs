//! RGB color for preview artifacts.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An 8-bit RGB color.
///
/// Used to tint centroid markers and connection lines; the host document
/// decides how the color is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Explosion-center markers.
    pub const RED: Self = Self::new(220, 30, 30);
    /// Aggregate-centroid markers.
    pub const BLUE: Self = Self::new(30, 60, 220);
    /// Per-component centroid markers.
    pub const GREEN: Self = Self::new(30, 180, 60);
    /// Connection lines.
    pub const YELLOW: Self = Self::new(230, 210, 30);
    /// Muted construction geometry.
    pub const DARK_GRAY: Self = Self::new(80, 80, 80);

    /// Create a color from channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors_distinct() {
        let palette = [
            Color::RED,
            Color::BLUE,
            Color::GREEN,
            Color::YELLOW,
            Color::DARK_GRAY,
        ];
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
