//! Axis classification and symmetry grouping.
//!
//! Components that sit on a principal axis or plane relative to the
//! reference center must not drift off it as the explosion strength grows;
//! [`axis_alignment`] feeds that constraint to the vector engine. Mirror
//! grouping annotates components that are reflections of each other across a
//! principal axis, for display grouping only.

use assembly_types::{Point3, Vector3};
use hashbrown::HashMap;

use crate::component::LeafComponent;

/// Decimal places kept when rounding coordinates for symmetry keys.
///
/// Rounding keeps floating-point noise from fracturing groups that are
/// geometrically identical.
const KEY_PRECISION: i32 = 3;

/// A principal coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// The component of `v` along this axis.
    #[must_use]
    pub fn component(self, v: &Vector3<f64>) -> f64 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
            Self::Z => v.z,
        }
    }

    /// The unit vector along this axis, scaled by `sign`.
    #[must_use]
    pub fn direction(self, sign: f64) -> Vector3<f64> {
        match self {
            Self::X => Vector3::new(sign, 0.0, 0.0),
            Self::Y => Vector3::new(0.0, sign, 0.0),
            Self::Z => Vector3::new(0.0, 0.0, sign),
        }
    }
}

/// Per-axis alignment of a component's offset from the reference center.
///
/// An axis is "aligned" when the offset along it is below the tolerance:
/// the rest pose has no displacement there, so the explosion must not
/// introduce one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisAlignment {
    /// Offset along X is below tolerance.
    pub x: bool,
    /// Offset along Y is below tolerance.
    pub y: bool,
    /// Offset along Z is below tolerance.
    pub z: bool,
}

impl AxisAlignment {
    /// Number of aligned axes.
    #[must_use]
    pub fn count(&self) -> usize {
        usize::from(self.x) + usize::from(self.y) + usize::from(self.z)
    }
}

/// Test, independently per axis, whether a centroid is aligned with the
/// reference center within `tolerance`.
#[must_use]
pub fn axis_alignment(
    centroid: &Point3<f64>,
    reference: &Point3<f64>,
    tolerance: f64,
) -> AxisAlignment {
    AxisAlignment {
        x: (centroid.x - reference.x).abs() < tolerance,
        y: (centroid.y - reference.y).abs() < tolerance,
        z: (centroid.z - reference.z).abs() < tolerance,
    }
}

/// The axis with the largest absolute component of `v`, and that
/// component's sign. Ties resolve X before Y before Z.
#[must_use]
pub fn dominant_axis(v: &Vector3<f64>) -> (Axis, f64) {
    let (ax, ay, az) = (v.x.abs(), v.y.abs(), v.z.abs());
    if ax >= ay && ax >= az {
        (Axis::X, sign(v.x))
    } else if ay >= ax && ay >= az {
        (Axis::Y, sign(v.y))
    } else {
        (Axis::Z, sign(v.z))
    }
}

/// Structural key grouping components that mirror each other across one
/// principal axis.
///
/// Coordinates are rounded to millis (three decimal places); the mirrored
/// axis stores the magnitude only, so `(x, y, z)` and `(-x, y, z)` produce
/// the same X-mirror key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymmetryKey {
    /// The axis mirrored across.
    pub axis: Axis,
    /// Rounded |offset| along the mirrored axis, in millis.
    pub mirrored: i64,
    /// Rounded signed offsets along the other two axes, in millis,
    /// in axis order.
    pub rest: (i64, i64),
}

/// Build the mirror key of an offset across `axis`.
#[must_use]
pub fn symmetry_key(offset: &Vector3<f64>, axis: Axis) -> SymmetryKey {
    let (mirrored, rest) = match axis {
        Axis::X => (offset.x.abs(), (offset.y, offset.z)),
        Axis::Y => (offset.y.abs(), (offset.x, offset.z)),
        Axis::Z => (offset.z.abs(), (offset.x, offset.y)),
    };
    SymmetryKey {
        axis,
        mirrored: round_millis(mirrored),
        rest: (round_millis(rest.0), round_millis(rest.1)),
    }
}

/// Group leaf components by their mirror keys relative to `center`.
///
/// Each component lands in three groups, one per axis; groups with a single
/// member have no mirror twin. The values are indices into `leaves`, in
/// discovery order.
#[must_use]
pub fn group_by_symmetry(
    leaves: &[LeafComponent],
    center: &Point3<f64>,
) -> HashMap<SymmetryKey, Vec<usize>> {
    let mut groups: HashMap<SymmetryKey, Vec<usize>> = HashMap::new();
    for (index, leaf) in leaves.iter().enumerate() {
        let offset = leaf.centroid - center;
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            groups
                .entry(symmetry_key(&offset, axis))
                .or_default()
                .push(index);
        }
    }
    groups
}

#[allow(clippy::cast_possible_truncation)]
fn round_millis(v: f64) -> i64 {
    (v * 10f64.powi(KEY_PRECISION)).round() as i64
}

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assembly_types::{Aabb, DefinitionId, InstanceId, translation};

    fn leaf_at(id: u64, x: f64, y: f64, z: f64) -> LeafComponent {
        let center = Point3::new(x, y, z);
        let half = Vector3::new(1.0, 1.0, 1.0);
        LeafComponent::at_rest(
            InstanceId::new(id),
            DefinitionId::new(0),
            "part",
            translation(x, y, z),
            Aabb::new(center - half, center + half),
        )
    }

    #[test]
    fn test_axis_alignment() {
        let alignment = axis_alignment(
            &Point3::new(10.0, 0.05, 0.0),
            &Point3::new(0.0, 0.0, 0.0),
            0.2,
        );
        assert!(!alignment.x);
        assert!(alignment.y);
        assert!(alignment.z);
        assert_eq!(alignment.count(), 2);
    }

    #[test]
    fn test_dominant_axis() {
        assert_eq!(
            dominant_axis(&Vector3::new(-3.0, 1.0, 2.0)),
            (Axis::X, -1.0)
        );
        assert_eq!(dominant_axis(&Vector3::new(0.5, 2.0, 1.0)), (Axis::Y, 1.0));
        assert_eq!(
            dominant_axis(&Vector3::new(0.0, 0.0, -0.1)),
            (Axis::Z, -1.0)
        );
        // Ties prefer X.
        assert_eq!(dominant_axis(&Vector3::new(1.0, 1.0, 1.0)), (Axis::X, 1.0));
    }

    #[test]
    fn test_mirror_twins_share_key() {
        let a = symmetry_key(&Vector3::new(5.0, 2.0, 1.0), Axis::X);
        let b = symmetry_key(&Vector3::new(-5.0, 2.0, 1.0), Axis::X);
        assert_eq!(a, b);

        // Different Y offset breaks the twin relation.
        let c = symmetry_key(&Vector3::new(5.0, 3.0, 1.0), Axis::X);
        assert_ne!(a, c);
    }

    #[test]
    fn test_rounding_absorbs_noise() {
        let a = symmetry_key(&Vector3::new(5.0, 2.0, 1.0), Axis::X);
        let b = symmetry_key(&Vector3::new(5.0000004, 1.9999996, 1.0), Axis::X);
        assert_eq!(a, b);
    }

    #[test]
    fn test_group_by_symmetry_finds_twins() {
        let center = Point3::new(0.0, 0.0, 0.0);
        let leaves = vec![
            leaf_at(1, 5.0, 2.0, 0.0),
            leaf_at(2, -5.0, 2.0, 0.0),
            leaf_at(3, 0.0, 7.0, 0.0),
        ];
        let groups = group_by_symmetry(&leaves, &center);

        let twin_key = symmetry_key(&Vector3::new(5.0, 2.0, 0.0), Axis::X);
        assert_eq!(groups.get(&twin_key), Some(&vec![0, 1]));

        let lone_key = symmetry_key(&Vector3::new(0.0, 7.0, 0.0), Axis::Y);
        assert_eq!(groups.get(&lone_key), Some(&vec![2]));
    }
}
