//! Affine transform helpers.
//!
//! All placement math in the explosion pipeline runs through these helpers so
//! that composition order and translation handling stay consistent.

use nalgebra::{Affine3, Matrix4, Point3, Vector3};

/// Compose a child's local transform with its parent's world transform.
///
/// The child's local transform is applied first, then the parent's world
/// transform, yielding the child's world transform. This is the single
/// composition rule used by the hierarchy walk.
///
/// # Example
///
/// ```
/// use assembly_types::{compose, translation, translation_of, Point3};
///
/// let world = compose(&translation(10.0, 0.0, 0.0), &translation(5.0, 0.0, 0.0));
/// assert_eq!(translation_of(&world), Point3::new(15.0, 0.0, 0.0));
/// ```
#[must_use]
pub fn compose(parent_world: &Affine3<f64>, child_local: &Affine3<f64>) -> Affine3<f64> {
    parent_world * child_local
}

/// A pure translation transform.
#[must_use]
pub fn translation(x: f64, y: f64, z: f64) -> Affine3<f64> {
    Affine3::from_matrix_unchecked(Matrix4::new_translation(&Vector3::new(x, y, z)))
}

/// A pure (possibly non-uniform) scaling transform.
#[must_use]
pub fn scaling(x: f64, y: f64, z: f64) -> Affine3<f64> {
    Affine3::from_matrix_unchecked(Matrix4::new_nonuniform_scaling(&Vector3::new(x, y, z)))
}

/// Extract the translation component of a transform.
#[must_use]
pub fn translation_of(transform: &Affine3<f64>) -> Point3<f64> {
    let m = transform.matrix();
    Point3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
}

/// Displace a transform by a world-space offset.
///
/// Only the translation column changes; rotation and scale are untouched.
/// This is the invariant the explosion engine relies on: a displaced copy is
/// the original transform plus exactly one translation.
#[must_use]
pub fn translated(transform: &Affine3<f64>, offset: &Vector3<f64>) -> Affine3<f64> {
    let mut m = *transform.matrix();
    m[(0, 3)] += offset.x;
    m[(1, 3)] += offset.y;
    m[(2, 3)] += offset.z;
    Affine3::from_matrix_unchecked(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn rotation_z(angle: f64) -> Affine3<f64> {
        let axis = nalgebra::Unit::new_normalize(Vector3::z());
        Affine3::from_matrix_unchecked(Matrix4::from_axis_angle(&axis, angle))
    }

    #[test]
    fn test_compose_applies_child_first() {
        // Child moves to (5,0,0) in parent space; parent rotates 90 deg about Z.
        // World position must be the rotated point (0,5,0), not (5,0,0).
        let world = compose(&rotation_z(FRAC_PI_2), &translation(5.0, 0.0, 0.0));
        let pos = translation_of(&world);
        assert!((pos.x - 0.0).abs() < 1e-10);
        assert!((pos.y - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_compose_chain() {
        let world = compose(
            &compose(&translation(1.0, 0.0, 0.0), &translation(2.0, 0.0, 0.0)),
            &translation(4.0, 0.0, 0.0),
        );
        assert_eq!(translation_of(&world), Point3::new(7.0, 0.0, 0.0));
    }

    #[test]
    fn test_translated_preserves_rotation() {
        let base = compose(&rotation_z(FRAC_PI_2), &translation(5.0, 0.0, 0.0));
        let moved = translated(&base, &Vector3::new(0.0, 0.0, 3.0));

        // Translation shifted by exactly the offset
        let before = translation_of(&base);
        let after = translation_of(&moved);
        assert!((after.z - before.z - 3.0).abs() < 1e-10);

        // Rotation part unchanged
        let a = base.matrix().fixed_view::<3, 3>(0, 0).into_owned();
        let b = moved.matrix().fixed_view::<3, 3>(0, 0).into_owned();
        assert!((a - b).norm() < 1e-12);
    }

    #[test]
    fn test_translated_preserves_scale() {
        let base = scaling(2.0, 3.0, 4.0);
        let moved = translated(&base, &Vector3::new(1.0, 1.0, 1.0));
        let p = moved * Point3::new(1.0, 1.0, 1.0);
        assert_eq!(p, Point3::new(3.0, 4.0, 5.0));
    }
}
