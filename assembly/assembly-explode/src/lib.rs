//! Exploded-view algorithms for block-instance assemblies.
//!
//! Given a root instance, this crate flattens the assembly hierarchy into
//! leaf components, aggregates a volume-weighted centroid, and computes a
//! per-component displacement vector for the exploded view.
//!
//! # Layer 0 Crate
//!
//! Pure computation; no document access beyond the read-only
//! [`DefinitionSource`](assembly_types::DefinitionSource) trait.
//!
//! # Pipeline
//!
//! 1. [`flatten`] - Walk the hierarchy, emit [`LeafComponent`]s with world
//!    transforms and centroids in depth-first discovery order.
//! 2. [`weighted_centroid`] - Aggregate the `Relative` reference center.
//! 3. [`explosion_vector`] - Per component, select a direction (with
//!    axis-alignment snapping) and a nonlinear falloff magnitude.
//!
//! # Example
//!
//! ```
//! use assembly_explode::flatten;
//! use assembly_types::{translation, Aabb, BlockDefinition, DefinitionId};
//! use assembly_types::{InstanceId, InstanceNode, Point3};
//! use nalgebra::Affine3;
//!
//! let bolt = BlockDefinition::new(
//!     "bolt",
//!     Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)),
//! );
//! let frame = BlockDefinition::new(
//!     "frame",
//!     Aabb::new(Point3::new(-10.0, -10.0, -10.0), Point3::new(10.0, 10.0, 10.0)),
//! )
//! .with_child(
//!     InstanceNode::new(InstanceId::new(2), DefinitionId::new(0))
//!         .with_transform(translation(8.0, 0.0, 0.0)),
//! );
//! let definitions = vec![bolt, frame];
//!
//! let root = InstanceNode::new(InstanceId::new(1), DefinitionId::new(1));
//! let leaves = flatten(&root, &Affine3::identity(), &definitions);
//! assert_eq!(leaves.len(), 1);
//! assert_eq!(leaves[0].centroid, Point3::new(8.0, 0.0, 0.0));
//! ```
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod centroid;
mod component;
mod flatten;
mod symmetry;
mod vector;

pub use centroid::{MIN_COMPONENT_VOLUME, weighted_centroid};
pub use component::LeafComponent;
pub use flatten::{MAX_FLATTEN_DEPTH, collect_for_deletion, flatten};
pub use symmetry::{
    Axis, AxisAlignment, SymmetryKey, axis_alignment, dominant_axis, group_by_symmetry,
    symmetry_key,
};
pub use vector::{
    AXIS_ALIGNMENT_PERCENT, DEGENERATE_DIRECTION_EPS, ExplosionContext, MIN_NORMALIZED_DISTANCE,
    displacement_magnitude, explosion_direction, explosion_vector, fallback_direction,
};
