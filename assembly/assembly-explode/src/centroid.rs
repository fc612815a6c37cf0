//! Volume-weighted centroid aggregation.

use assembly_types::{Point3, Vector3};

use crate::component::LeafComponent;

/// Floor applied to a component's bounding-box volume.
///
/// Flat parts (sheets, decals) have zero box volume; without the floor they
/// would contribute nothing to the aggregate centroid.
pub const MIN_COMPONENT_VOLUME: f64 = 0.001;

/// Volume-weighted centroid over a set of leaf components.
///
/// Component volume is approximated by the world bounding-box volume,
/// clamped to [`MIN_COMPONENT_VOLUME`]. Returns `None` for an empty set; the
/// caller substitutes a fallback center (typically the root assembly's own
/// centroid). That fallback is an expected path, not an error.
///
/// # Example
///
/// ```
/// use assembly_explode::weighted_centroid;
///
/// assert!(weighted_centroid(&[]).is_none());
/// ```
#[must_use]
pub fn weighted_centroid(leaves: &[LeafComponent]) -> Option<Point3<f64>> {
    if leaves.is_empty() {
        return None;
    }

    let mut weighted_sum = Vector3::zeros();
    let mut total_volume = 0.0;
    for leaf in leaves {
        let volume = leaf.bounds.volume().max(MIN_COMPONENT_VOLUME);
        weighted_sum += leaf.centroid.coords * volume;
        total_volume += volume;
    }

    Some(Point3::from(weighted_sum / total_volume))
}
