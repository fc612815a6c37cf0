//! Leaf components discovered during flattening.

use assembly_types::{Aabb, Affine3, DefinitionId, InstanceId, Point3, Vector3, translation_of};

/// A terminal block instance, the atomic unit of explosion.
///
/// `original_transform` is the rest-pose world transform, immutable for the
/// lifetime of one flattening pass. The explosion engine populates
/// `final_transform`; the invariant is that the final transform equals the
/// original translated by exactly one displacement vector, so rotation and
/// scale are never altered.
#[derive(Debug, Clone)]
pub struct LeafComponent {
    /// Document id of the source instance.
    pub instance: InstanceId,
    /// Definition id, used to instantiate displaced copies with identical
    /// geometry.
    pub definition: DefinitionId,
    /// Definition name, for component lists.
    pub name: String,
    /// Rest-pose world transform.
    pub original_transform: Affine3<f64>,
    /// Displaced world transform, starts equal to the original.
    pub final_transform: Affine3<f64>,
    /// World-space bounding box (rest pose).
    pub bounds: Aabb,
    /// World-space bounding-box center (rest pose).
    pub centroid: Point3<f64>,
}

impl LeafComponent {
    /// Create a component at its rest pose.
    #[must_use]
    pub fn at_rest(
        instance: InstanceId,
        definition: DefinitionId,
        name: impl Into<String>,
        world_transform: Affine3<f64>,
        bounds: Aabb,
    ) -> Self {
        Self {
            instance,
            definition,
            name: name.into(),
            original_transform: world_transform,
            final_transform: world_transform,
            bounds,
            centroid: bounds.center(),
        }
    }

    /// The displacement currently applied to this component.
    #[must_use]
    pub fn displacement(&self) -> Vector3<f64> {
        translation_of(&self.final_transform) - translation_of(&self.original_transform)
    }

    /// Reset the final transform back to the rest pose.
    pub fn reset(&mut self) {
        self.final_transform = self.original_transform;
    }
}
