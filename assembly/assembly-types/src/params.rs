//! Explosion parameters.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How explosion directions are derived from the reference center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExplosionMode {
    /// Explode away from the root assembly's bounding-box center.
    #[default]
    Center,
    /// Explode away from the volume-weighted centroid of all components.
    Relative,
    /// Explode along the dominant principal axis of each component's offset.
    Axial,
}

impl fmt::Display for ExplosionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Center => "Center",
            Self::Relative => "Relative",
            Self::Axial => "Axial",
        };
        write!(f, "{name}")
    }
}

/// User-adjustable parameters for one explosion preview.
///
/// Every mutation triggers a full preview rebuild; the struct is cheap to
/// copy and carries no document state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExplosionParams {
    /// Explosion strength in percent of the assembly diagonal, `0..=100`.
    pub strength: f64,
    /// Direction selection mode.
    pub mode: ExplosionMode,
    /// Falloff shape, `0..=5`. Below 1 near components move proportionally
    /// more; above 1 far components do; 1 is linear.
    pub factor: f64,
    /// On commit, delete only the root instance and leave the nested source
    /// hierarchy in place. Does not affect the preview.
    pub preserve_hierarchy: bool,
    /// Show centroid markers in the preview.
    pub show_centroids: bool,
    /// Show connection lines from the reference center in the preview.
    pub show_connection_lines: bool,
    /// Materialize permanent connection lines on commit.
    pub keep_connection_lines: bool,
}

impl Default for ExplosionParams {
    fn default() -> Self {
        Self {
            strength: 0.0,
            mode: ExplosionMode::Center,
            factor: 1.0,
            preserve_hierarchy: false,
            show_centroids: false,
            show_connection_lines: false,
            keep_connection_lines: false,
        }
    }
}

impl ExplosionParams {
    /// Set the strength (builder pattern).
    #[must_use]
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Set the mode (builder pattern).
    #[must_use]
    pub fn with_mode(mut self, mode: ExplosionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the falloff factor (builder pattern).
    #[must_use]
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    /// Clamp strength and factor into their documented ranges.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.strength = self.strength.clamp(0.0, 100.0);
        self.factor = self.factor.clamp(0.0, 5.0);
        self
    }

    /// The maximum displacement magnitude for an assembly of the given
    /// bounding diagonal.
    #[must_use]
    pub fn explosion_distance(&self, max_diagonal: f64) -> f64 {
        self.strength / 100.0 * max_diagonal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ExplosionParams::default();
        assert!((params.strength - 0.0).abs() < 1e-12);
        assert_eq!(params.mode, ExplosionMode::Center);
        assert!((params.factor - 1.0).abs() < 1e-12);
        assert!(!params.preserve_hierarchy);
    }

    #[test]
    fn test_clamped() {
        let params = ExplosionParams::default()
            .with_strength(140.0)
            .with_factor(-2.0)
            .clamped();
        assert!((params.strength - 100.0).abs() < 1e-12);
        assert!((params.factor - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_explosion_distance() {
        let params = ExplosionParams::default().with_strength(50.0);
        assert!((params.explosion_distance(20.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(ExplosionMode::Center.to_string(), "Center");
        assert_eq!(ExplosionMode::Relative.to_string(), "Relative");
        assert_eq!(ExplosionMode::Axial.to_string(), "Axial");
    }
}
