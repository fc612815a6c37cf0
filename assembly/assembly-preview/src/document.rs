//! The document collaborator trait.

use assembly_types::{
    Aabb, Affine3, Color, DefinitionId, DefinitionSource, InstanceId, InstanceNode, Point3,
};

/// Name of the reusable marker definition.
///
/// Implementations create the definition lazily on the first
/// [`SceneDocument::create_marker`] call and reuse it afterwards, keyed by
/// this name.
pub const MARKER_DEFINITION_NAME: &str = "centroid_marker";

/// Half-extent of the marker definition's geometry.
pub const MARKER_RADIUS: f64 = 3.0;

/// Plot weight for connection lines.
pub const CONNECTION_LINE_WEIGHT: f64 = 5.0;

/// Host document operations the explosion command needs.
///
/// The session issues one create/delete call at a time and never assumes
/// batched-transaction semantics. A create returning `None` means the
/// document rejected the object; the session skips that artifact and
/// continues (partial-failure tolerant).
pub trait SceneDocument: DefinitionSource {
    /// Look up a placed top-level instance by id.
    fn instance(&self, id: InstanceId) -> Option<&InstanceNode>;

    /// Place a new instance of a definition at a world transform.
    fn create_instance(
        &mut self,
        definition: DefinitionId,
        transform: &Affine3<f64>,
    ) -> Option<InstanceId>;

    /// Place a centroid marker at a position.
    ///
    /// Backed by the lazily created [`MARKER_DEFINITION_NAME`] definition;
    /// repeated calls reuse it.
    fn create_marker(&mut self, position: Point3<f64>, color: Color) -> Option<InstanceId>;

    /// Create a line between two world-space points.
    fn create_line(
        &mut self,
        start: Point3<f64>,
        end: Point3<f64>,
        color: Color,
        weight: f64,
    ) -> Option<InstanceId>;

    /// Delete an object by id. `true` if it was found and removed.
    fn delete(&mut self, id: InstanceId) -> bool;

    /// World-space bounding box of a placed object.
    fn world_bounds(&self, id: InstanceId) -> Option<Aabb>;

    /// Ask the host to redraw its views.
    fn request_redraw(&mut self);
}
