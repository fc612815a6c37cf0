//! Hierarchy flattening.
//!
//! Walks an assembly tree from a root instance and emits its leaf components
//! with composed world transforms, in depth-first discovery order.

use assembly_types::{Affine3, DefinitionSource, InstanceId, InstanceNode, compose};
use hashbrown::HashSet;
use tracing::warn;

use crate::component::LeafComponent;

/// Maximum hierarchy depth the flattener will descend.
///
/// Assemblies are expected to be acyclic, but a self-referential definition
/// would otherwise recurse unboundedly; the walk truncates at this depth and
/// logs a warning.
pub const MAX_FLATTEN_DEPTH: usize = 64;

/// Flatten an assembly into its leaf components.
///
/// `parent_world` is the world transform of the space the root is placed in
/// (identity for scene-level roots). At each node the world transform is the
/// parent's world transform composed with the node's local transform. Nodes
/// whose definition has no nested instances are leaves: their world bounding
/// box is the definition's local box under the world transform, and their
/// centroid is that box's center.
///
/// A node whose definition cannot be resolved terminates that branch
/// silently and contributes no leaves.
///
/// The returned order is depth-first discovery order and is deterministic
/// for a given assembly; component lists rely on it.
#[must_use]
pub fn flatten<S: DefinitionSource + ?Sized>(
    root: &InstanceNode,
    parent_world: &Affine3<f64>,
    source: &S,
) -> Vec<LeafComponent> {
    let mut leaves = Vec::new();
    // Explicit worklist; children are pushed in reverse so that popping
    // preserves definition order.
    let mut stack: Vec<(&InstanceNode, Affine3<f64>, usize)> = vec![(root, *parent_world, 0)];
    let mut truncated = false;

    while let Some((node, inherited, depth)) = stack.pop() {
        let world = compose(&inherited, &node.transform);

        let Some(definition) = source.definition(node.definition) else {
            continue;
        };

        if definition.is_leaf() {
            let bounds = definition.bounds.transformed(&world);
            leaves.push(LeafComponent::at_rest(
                node.id,
                node.definition,
                definition.name.as_str(),
                world,
                bounds,
            ));
            continue;
        }

        if depth + 1 > MAX_FLATTEN_DEPTH {
            truncated = true;
            continue;
        }
        for child in definition.children.iter().rev() {
            stack.push((child, world, depth + 1));
        }
    }

    if truncated {
        warn!(
            max_depth = MAX_FLATTEN_DEPTH,
            root = root.id.raw(),
            "assembly exceeds maximum depth, deeper instances ignored"
        );
    }

    leaves
}

/// Collect the root and every descendant instance id for deletion.
///
/// Unlike the preview walk this traversal is destructive, so it is
/// cycle-safe: a visited set of instance ids guards against
/// self-referential definitions.
#[must_use]
pub fn collect_for_deletion<S: DefinitionSource + ?Sized>(
    root: &InstanceNode,
    source: &S,
) -> Vec<InstanceId> {
    let mut ids = Vec::new();
    let mut visited: HashSet<InstanceId> = HashSet::new();
    let mut stack: Vec<&InstanceNode> = vec![root];

    while let Some(node) = stack.pop() {
        if !visited.insert(node.id) {
            continue;
        }
        ids.push(node.id);

        let Some(definition) = source.definition(node.definition) else {
            continue;
        };
        for child in definition.children.iter().rev() {
            stack.push(child);
        }
    }

    ids
}
