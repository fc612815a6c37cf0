//! The explosion vector engine.
//!
//! For each leaf component this computes a world-space displacement vector:
//! a direction derived from the component's offset to the reference center
//! (with axis-alignment snapping), scaled by a nonlinear distance falloff.

use assembly_types::{ExplosionMode, InstanceId, Point3, Vector3};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::component::LeafComponent;
use crate::symmetry::{axis_alignment, dominant_axis};

/// Offsets below this length count as degenerate and take the deterministic
/// direction fallback.
pub const DEGENERATE_DIRECTION_EPS: f64 = 1e-10;

/// Axis-alignment tolerance as a fraction of the assembly diagonal.
pub const AXIS_ALIGNMENT_PERCENT: f64 = 0.01;

/// Floor for the normalized distance, so a component sitting on the
/// reference center does not collapse the falloff power function.
pub const MIN_NORMALIZED_DISTANCE: f64 = 0.001;

/// Everything the vector engine needs besides the component itself.
#[derive(Debug, Clone, Copy)]
pub struct ExplosionContext {
    /// The point displacement directions are measured from.
    pub reference_center: Point3<f64>,
    /// Direction selection mode.
    pub mode: ExplosionMode,
    /// Bounding diagonal of the whole assembly.
    pub max_diagonal: f64,
    /// Maximum displacement magnitude (strength percentage of the diagonal).
    pub explosion_distance: f64,
    /// Falloff shape, see [`displacement_magnitude`].
    pub factor: f64,
}

/// Compute the world-space displacement for one leaf component.
///
/// The result is a unit direction from [`explosion_direction`] scaled by the
/// falloff magnitude from [`displacement_magnitude`]. The magnitude always
/// uses the component's true distance from the reference center, so a
/// degenerate offset moves by the floored minimum rather than the length of
/// its substituted fallback direction. Callers detect the zero-strength fast
/// path (`explosion_distance` ~ 0) before calling; the engine itself always
/// produces a finite vector.
#[must_use]
pub fn explosion_vector(leaf: &LeafComponent, ctx: &ExplosionContext) -> Vector3<f64> {
    let offset = leaf.centroid - ctx.reference_center;
    let base = if offset.norm() < DEGENERATE_DIRECTION_EPS {
        fallback_direction(leaf.instance)
    } else {
        offset
    };
    let direction = explosion_direction(leaf, &base, ctx);
    direction * displacement_magnitude(offset.norm(), ctx)
}

/// The unit displacement direction for a component.
///
/// `base` is the (possibly fallback-substituted) offset from the reference
/// center. In `Axial` mode the direction snaps to the dominant axis of the
/// offset. In `Center`/`Relative` modes, axes on which the component is
/// aligned with the reference center (within 1% of the assembly diagonal)
/// are zeroed out so the component does not drift off its axis or plane:
/// aligned on two axes confines movement to the third, aligned on one
/// confines it to the other two.
#[must_use]
pub fn explosion_direction(
    leaf: &LeafComponent,
    base: &Vector3<f64>,
    ctx: &ExplosionContext,
) -> Vector3<f64> {
    let raw = match ctx.mode {
        ExplosionMode::Axial => {
            let (axis, sign) = dominant_axis(base);
            axis.direction(sign)
        }
        ExplosionMode::Center | ExplosionMode::Relative => {
            let tolerance = AXIS_ALIGNMENT_PERCENT * ctx.max_diagonal;
            let aligned = axis_alignment(&leaf.centroid, &ctx.reference_center, tolerance);
            match (aligned.x, aligned.y, aligned.z) {
                (true, true, false) => Vector3::new(0.0, 0.0, sign(base.z)),
                (true, false, true) => Vector3::new(0.0, sign(base.y), 0.0),
                (false, true, true) => Vector3::new(sign(base.x), 0.0, 0.0),
                (true, false, false) => Vector3::new(0.0, base.y, base.z),
                (false, true, false) => Vector3::new(base.x, 0.0, base.z),
                (false, false, true) => Vector3::new(base.x, base.y, 0.0),
                // No alignment, or aligned on all three (tiny or
                // fallback-substituted offset): keep the base direction.
                (false, false, false) | (true, true, true) => *base,
            }
        }
    };

    raw.try_normalize(DEGENERATE_DIRECTION_EPS)
        .unwrap_or_else(Vector3::z)
}

/// Nonlinear falloff magnitude.
///
/// Distance from the reference center is normalized against the assembly
/// diagonal and floored at [`MIN_NORMALIZED_DISTANCE`]. A factor below 1
/// moves near components proportionally more (`d^(1/(1+factor))`), above 1
/// moves far components proportionally more (`d^factor`), exactly 1 is
/// linear.
#[must_use]
pub fn displacement_magnitude(distance_from_center: f64, ctx: &ExplosionContext) -> f64 {
    let normalized = if ctx.max_diagonal > 0.0 {
        distance_from_center / ctx.max_diagonal
    } else {
        0.0
    };
    let normalized = normalized.max(MIN_NORMALIZED_DISTANCE);

    if ctx.factor < 1.0 {
        ctx.explosion_distance * normalized.powf(1.0 / (1.0 + ctx.factor))
    } else if ctx.factor > 1.0 {
        ctx.explosion_distance * normalized.powf(ctx.factor)
    } else {
        ctx.explosion_distance * normalized
    }
}

/// Deterministic pseudo-random direction for a component whose centroid
/// coincides with the reference center.
///
/// Seeded from the stable instance id so repeated rebuilds of the same
/// assembly displace the component the same way. Components are in
/// `[-1, 1]`; the vector is not normalized here.
#[must_use]
pub fn fallback_direction(id: InstanceId) -> Vector3<f64> {
    let mut rng = StdRng::seed_from_u64(id.raw());
    Vector3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    )
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
    use assembly_types::{Aabb, DefinitionId, translation};

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

    fn ctx(mode: ExplosionMode, strength: f64, factor: f64) -> ExplosionContext {
        let max_diagonal = 20.0;
        ExplosionContext {
            reference_center: Point3::origin(),
            mode,
            max_diagonal,
            explosion_distance: strength / 100.0 * max_diagonal,
            factor,
        }
    }

    #[test]
    fn test_reference_scenario() {
        // Three leaves at (10,0,0), (0,10,0), (0,0,0); strength 50,
        // factor 1, Center mode, diagonal 20. Leaves 1 and 2 move purely
        // along X and Y by 10 * (10/20) = 5 units.
        let ctx = ctx(ExplosionMode::Center, 50.0, 1.0);

        let v1 = explosion_vector(&leaf_at(1, 10.0, 0.0, 0.0), &ctx);
        assert!((v1 - Vector3::new(5.0, 0.0, 0.0)).norm() < 1e-10);

        let v2 = explosion_vector(&leaf_at(2, 0.0, 10.0, 0.0), &ctx);
        assert!((v2 - Vector3::new(0.0, 5.0, 0.0)).norm() < 1e-10);

        // Leaf at the reference center gets a deterministic nonzero vector.
        let v3 = explosion_vector(&leaf_at(3, 0.0, 0.0, 0.0), &ctx);
        assert!(v3.norm() > 0.0);
        let again = explosion_vector(&leaf_at(3, 0.0, 0.0, 0.0), &ctx);
        assert!((v3 - again).norm() < 1e-15);
    }

    #[test]
    fn test_degenerate_offset_moves_by_floored_distance() {
        // A component on the reference center has true distance 0; the
        // fallback only supplies a direction, never a distance, so the
        // magnitude is the floored minimum.
        let ctx = ctx(ExplosionMode::Center, 50.0, 1.0);
        let v = explosion_vector(&leaf_at(9, 0.0, 0.0, 0.0), &ctx);
        let floor = ctx.explosion_distance * MIN_NORMALIZED_DISTANCE;
        assert!((v.norm() - floor).abs() < 1e-12);
    }

    #[test]
    fn test_fallback_varies_with_id() {
        let a = fallback_direction(InstanceId::new(3));
        let b = fallback_direction(InstanceId::new(4));
        assert!((a - b).norm() > 1e-6);
    }

    #[test]
    fn test_axial_snaps_to_dominant_axis() {
        let ctx = ctx(ExplosionMode::Axial, 50.0, 1.0);
        let v = explosion_vector(&leaf_at(1, 3.0, -7.0, 1.0), &ctx);
        assert!((v.x - 0.0).abs() < 1e-10);
        assert!(v.y < 0.0);
        assert!((v.z - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_single_axis_alignment_confines_to_plane() {
        // Aligned on Z only: displacement stays in the XY plane.
        let ctx = ctx(ExplosionMode::Center, 80.0, 1.0);
        let v = explosion_vector(&leaf_at(1, 6.0, 8.0, 0.05), &ctx);
        assert!((v.z - 0.0).abs() < 1e-10);
        assert!(v.x > 0.0);
        assert!(v.y > 0.0);
        // Direction ratio preserved from the offset.
        assert!((v.y / v.x - 8.0 / 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_two_axis_alignment_confines_to_axis() {
        let ctx = ctx(ExplosionMode::Center, 80.0, 1.0);
        let v = explosion_vector(&leaf_at(1, 0.1, 0.05, -9.0), &ctx);
        assert!((v.x - 0.0).abs() < 1e-10);
        assert!((v.y - 0.0).abs() < 1e-10);
        assert!(v.z < 0.0);
    }

    #[test]
    fn test_unaligned_uses_normalized_offset() {
        let ctx = ctx(ExplosionMode::Center, 100.0, 1.0);
        let leaf = leaf_at(1, 4.0, 4.0, 4.0);
        let v = explosion_vector(&leaf, &ctx);
        let unit = v.normalize();
        let expected = Vector3::new(4.0, 4.0, 4.0).normalize();
        assert!((unit - expected).norm() < 1e-10);
    }

    #[test]
    fn test_magnitude_linear_in_strength() {
        // factor = 1: magnitude strictly linear in strength.
        let distances: Vec<f64> = [10.0, 25.0, 50.0, 100.0]
            .iter()
            .map(|&s| displacement_magnitude(8.0, &ctx(ExplosionMode::Center, s, 1.0)))
            .collect();
        for pair in distances.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        assert!((distances[3] - 2.0 * distances[2]).abs() < 1e-10);
        assert!((distances[2] - 2.0 * distances[1]).abs() < 1e-10);
    }

    #[test]
    fn test_falloff_ordering_flips_across_factor_one() {
        let near = 4.0;
        let far = 16.0;

        // factor < 1: near components move proportionally more.
        let low = ctx(ExplosionMode::Center, 50.0, 0.3);
        let near_ratio = displacement_magnitude(near, &low) / near;
        let far_ratio = displacement_magnitude(far, &low) / far;
        assert!(near_ratio > far_ratio);

        // factor > 1: far components move proportionally more.
        let high = ctx(ExplosionMode::Center, 50.0, 2.5);
        let near_ratio = displacement_magnitude(near, &high) / near;
        let far_ratio = displacement_magnitude(far, &high) / far;
        assert!(near_ratio < far_ratio);
    }

    #[test]
    fn test_zero_distance_floor() {
        let ctx = ctx(ExplosionMode::Center, 50.0, 2.0);
        let magnitude = displacement_magnitude(0.0, &ctx);
        let floor = ctx.explosion_distance * MIN_NORMALIZED_DISTANCE.powf(2.0);
        assert!((magnitude - floor).abs() < 1e-15);
    }

    #[test]
    fn test_degenerate_diagonal() {
        let ctx = ExplosionContext {
            reference_center: Point3::origin(),
            mode: ExplosionMode::Center,
            max_diagonal: 0.0,
            explosion_distance: 0.0,
            factor: 1.0,
        };
        let magnitude = displacement_magnitude(5.0, &ctx);
        assert!(magnitude.is_finite());
        assert!((magnitude - 0.0).abs() < 1e-15);
    }
}
