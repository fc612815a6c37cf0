//! Core types for block-instance assemblies.
//!
//! This crate provides the foundational types shared by the explosion
//! pipeline:
//!
//! - [`Aabb`] - Axis-aligned bounding box with affine transform support
//! - [`InstanceNode`] / [`BlockDefinition`] - Placed block instances and
//!   their reusable definitions
//! - [`ExplosionParams`] - User-adjustable explosion parameters
//! - [`Color`] - RGB color for markers and connection lines
//! - Transform helpers ([`compose`], [`translated`], [`translation_of`])
//!
//! # Layer 0 Crate
//!
//! This crate has no host-application dependencies. It can be used in:
//! - CLI tools
//! - Plugin adapters for CAD hosts
//! - Servers and test harnesses
//!
//! # Transforms
//!
//! Local transforms are `nalgebra::Affine3<f64>` (rotation, translation and
//! scale). A node's world transform is the composition of all ancestor local
//! transforms with its own local transform; see [`compose`].
//!
//! # Example
//!
//! ```
//! use assembly_types::{compose, translation, Aabb, Point3};
//!
//! let world = compose(&translation(10.0, 0.0, 0.0), &translation(5.0, 0.0, 0.0));
//! let bounds = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
//! let moved = bounds.transformed(&world);
//! assert_eq!(moved.center(), Point3::new(15.0, 0.0, 0.0));
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

mod bounds;
mod color;
mod node;
mod params;
mod transform;

pub use bounds::Aabb;
pub use color::Color;
pub use node::{BlockDefinition, DefinitionId, DefinitionSource, InstanceId, InstanceNode};
pub use params::{ExplosionMode, ExplosionParams};
pub use transform::{compose, scaling, translated, translation, translation_of};

// Re-export nalgebra types for convenience
pub use nalgebra::{Affine3, Point3, Vector3};
