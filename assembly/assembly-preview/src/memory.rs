//! In-memory reference implementation of [`SceneDocument`].
//!
//! Used by the integration tests and by non-interactive tooling; host
//! adapters (CAD plugins) implement [`SceneDocument`] against the real
//! document instead.

use assembly_types::{
    Aabb, Affine3, BlockDefinition, Color, DefinitionId, DefinitionSource, InstanceId,
    InstanceNode, Point3, translation,
};
use hashbrown::HashMap;

use crate::document::{MARKER_DEFINITION_NAME, MARKER_RADIUS, SceneDocument};

/// A top-level object in the in-memory document.
#[derive(Debug, Clone)]
pub enum SceneObject {
    /// A placed block instance (exploded copies and markers included).
    Instance {
        /// The placement node.
        node: InstanceNode,
        /// Display color, if any.
        color: Option<Color>,
    },
    /// A line between two world-space points.
    Line {
        /// Line start.
        start: Point3<f64>,
        /// Line end.
        end: Point3<f64>,
        /// Display color.
        color: Color,
        /// Plot weight.
        weight: f64,
    },
}

/// An in-memory scene document.
///
/// Holds a definition table and a map of placed top-level objects, and
/// counts redraw requests. Instance ids are assigned from a monotonically
/// increasing counter, so iteration-sensitive assertions should sort or look
/// objects up by id.
#[derive(Debug, Default)]
pub struct InMemoryDocument {
    definitions: Vec<BlockDefinition>,
    objects: HashMap<InstanceId, SceneObject>,
    next_id: u64,
    redraws: usize,
    fail_next_creates: usize,
}

impl InMemoryDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition and return its id.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_definition(&mut self, definition: BlockDefinition) -> DefinitionId {
        self.definitions.push(definition);
        DefinitionId::new((self.definitions.len() - 1) as u32)
    }

    /// Place a top-level instance of a definition.
    pub fn add_instance(&mut self, definition: DefinitionId, transform: Affine3<f64>) -> InstanceId {
        let id = self.fresh_id();
        let node = InstanceNode::new(id, definition).with_transform(transform);
        self.objects.insert(id, SceneObject::Instance { node, color: None });
        id
    }

    /// Build a nested instance node to embed in a definition.
    ///
    /// Nested instances are owned by their enclosing definition, not by the
    /// document object map, but still get document-unique ids so destructive
    /// traversals can address them.
    pub fn nested_instance(
        &mut self,
        definition: DefinitionId,
        transform: Affine3<f64>,
    ) -> InstanceNode {
        InstanceNode::new(self.fresh_id(), definition).with_transform(transform)
    }

    /// Look up any object by id.
    #[must_use]
    pub fn object(&self, id: InstanceId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Whether the document contains a top-level object with this id.
    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Number of top-level objects.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of line objects.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.objects
            .values()
            .filter(|o| matches!(o, SceneObject::Line { .. }))
            .count()
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    /// Number of redraw requests received.
    #[must_use]
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    /// Make the next `count` create calls fail, for partial-failure tests.
    pub fn fail_next_creates(&mut self, count: usize) {
        self.fail_next_creates = count;
    }

    fn fresh_id(&mut self) -> InstanceId {
        self.next_id += 1;
        InstanceId::new(self.next_id)
    }

    fn take_failure(&mut self) -> bool {
        if self.fail_next_creates > 0 {
            self.fail_next_creates -= 1;
            true
        } else {
            false
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn marker_definition(&mut self) -> DefinitionId {
        // Lazy, idempotent: one marker definition per document, found by name.
        if let Some(index) = self
            .definitions
            .iter()
            .position(|d| d.name == MARKER_DEFINITION_NAME)
        {
            DefinitionId::new(index as u32)
        } else {
            let r = MARKER_RADIUS;
            self.add_definition(BlockDefinition::new(
                MARKER_DEFINITION_NAME,
                Aabb::new(Point3::new(-r, -r, -r), Point3::new(r, r, r)),
            ))
        }
    }
}

impl DefinitionSource for InMemoryDocument {
    fn definition(&self, id: DefinitionId) -> Option<&BlockDefinition> {
        self.definitions.get(id.index())
    }
}

impl SceneDocument for InMemoryDocument {
    fn instance(&self, id: InstanceId) -> Option<&InstanceNode> {
        match self.objects.get(&id) {
            Some(SceneObject::Instance { node, .. }) => Some(node),
            _ => None,
        }
    }

    fn create_instance(
        &mut self,
        definition: DefinitionId,
        transform: &Affine3<f64>,
    ) -> Option<InstanceId> {
        if self.take_failure() || self.definitions.get(definition.index()).is_none() {
            return None;
        }
        Some(self.add_instance(definition, *transform))
    }

    fn create_marker(&mut self, position: Point3<f64>, color: Color) -> Option<InstanceId> {
        if self.take_failure() {
            return None;
        }
        let definition = self.marker_definition();
        let id = self.fresh_id();
        let node = InstanceNode::new(id, definition)
            .with_transform(translation(position.x, position.y, position.z));
        self.objects.insert(
            id,
            SceneObject::Instance {
                node,
                color: Some(color),
            },
        );
        Some(id)
    }

    fn create_line(
        &mut self,
        start: Point3<f64>,
        end: Point3<f64>,
        color: Color,
        weight: f64,
    ) -> Option<InstanceId> {
        if self.take_failure() {
            return None;
        }
        let id = self.fresh_id();
        self.objects.insert(
            id,
            SceneObject::Line {
                start,
                end,
                color,
                weight,
            },
        );
        Some(id)
    }

    fn delete(&mut self, id: InstanceId) -> bool {
        if self.objects.remove(&id).is_some() {
            return true;
        }
        // Nested instances live inside definitions; a destructive traversal
        // may address them by id.
        for definition in &mut self.definitions {
            if let Some(index) = definition.children.iter().position(|c| c.id == id) {
                definition.children.remove(index);
                return true;
            }
        }
        false
    }

    fn world_bounds(&self, id: InstanceId) -> Option<Aabb> {
        match self.objects.get(&id)? {
            SceneObject::Instance { node, .. } => {
                let definition = self.definitions.get(node.definition.index())?;
                Some(definition.bounds.transformed(&node.transform))
            }
            SceneObject::Line { start, end, .. } => {
                let mut bounds = Aabb::empty();
                bounds.expand_to_include(start);
                bounds.expand_to_include(end);
                Some(bounds)
            }
        }
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}
