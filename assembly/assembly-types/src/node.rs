//! Block instances and their reusable definitions.

use nalgebra::Affine3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::Aabb;

/// Stable identifier of a placed instance in the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InstanceId(u64);

impl InstanceId {
    /// Wrap a raw document identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier value.
    ///
    /// Also used to seed the deterministic direction fallback for components
    /// sitting exactly on the reference center.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Index of a block definition in the host document's definition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DefinitionId(u32);

impl DefinitionId {
    /// Wrap a raw definition index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The raw table index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A block instance placed in the scene or inside another definition.
///
/// The transform is local to the parent's coordinate space; world placement
/// is obtained by composing ancestor transforms during flattening.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceNode {
    /// Document identifier of this instance.
    pub id: InstanceId,
    /// The definition this instance references.
    pub definition: DefinitionId,
    /// Local transform relative to the parent's coordinate space.
    pub transform: Affine3<f64>,
}

impl InstanceNode {
    /// Create an instance with identity placement.
    #[must_use]
    pub fn new(id: InstanceId, definition: DefinitionId) -> Self {
        Self {
            id,
            definition,
            transform: Affine3::identity(),
        }
    }

    /// Set the local transform (builder pattern).
    #[must_use]
    pub fn with_transform(mut self, transform: Affine3<f64>) -> Self {
        self.transform = transform;
        self
    }
}

/// A named, reusable geometry/children set referenced by instances.
///
/// Geometry is abstracted to its local-space bounding box; nested instances
/// are the `children`. A definition with no children makes its instances
/// leaf components during flattening.
#[derive(Debug, Clone)]
pub struct BlockDefinition {
    /// Definition name, shown in component lists.
    pub name: String,
    /// Local-space bounds of the definition's own geometry.
    pub bounds: Aabb,
    /// Nested block instances, in definition order.
    pub children: Vec<InstanceNode>,
}

impl BlockDefinition {
    /// Create a definition with no nested instances.
    #[must_use]
    pub fn new(name: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            name: name.into(),
            bounds,
            children: Vec::new(),
        }
    }

    /// Add a nested instance (builder pattern).
    #[must_use]
    pub fn with_child(mut self, child: InstanceNode) -> Self {
        self.children.push(child);
        self
    }

    /// Whether instances of this definition are leaf components.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Read access to a document's definition table.
///
/// An unresolved definition terminates that branch of any traversal without
/// error; callers needing strict diagnostics must layer them on top.
pub trait DefinitionSource {
    /// Resolve a definition by id.
    fn definition(&self, id: DefinitionId) -> Option<&BlockDefinition>;
}

impl DefinitionSource for [BlockDefinition] {
    fn definition(&self, id: DefinitionId) -> Option<&BlockDefinition> {
        self.get(id.index())
    }
}

impl DefinitionSource for Vec<BlockDefinition> {
    fn definition(&self, id: DefinitionId) -> Option<&BlockDefinition> {
        self.as_slice().definition(id)
    }
}
