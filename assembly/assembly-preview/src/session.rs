//! The preview/commit session state machine.

use std::fmt;

use assembly_explode::{
    ExplosionContext, LeafComponent, collect_for_deletion, explosion_vector, flatten,
    weighted_centroid,
};
use assembly_types::{
    Aabb, Affine3, Color, ExplosionMode, ExplosionParams, InstanceId, InstanceNode, Point3,
    translated,
};
use tracing::{debug, info, warn};

use crate::document::{CONNECTION_LINE_WEIGHT, SceneDocument};
use crate::error::{SessionError, SessionResult};

/// Displacements below this are treated as "no explosion", taking the
/// single-root-copy fast path.
const ZERO_DISPLACEMENT_EPS: f64 = 1e-10;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Live preview; parameter changes rebuild the artifacts.
    Previewing,
    /// Sources replaced by the exploded copies. Terminal.
    Committed,
    /// All artifacts discarded, sources untouched. Terminal.
    Cancelled,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Previewing => "previewing",
            Self::Committed => "committed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{name}")
    }
}

/// Document ids created by the current preview pass.
///
/// Three disjoint ordered sets; the session is the only owner, no other
/// component creates or deletes ids in them. The whole set is cleared and
/// regenerated on every parameter change.
#[derive(Debug, Default)]
pub struct PreviewArtifacts {
    /// Exploded instance copies, in leaf discovery order.
    pub instances: Vec<InstanceId>,
    /// Centroid markers. Always discarded, even on commit.
    pub markers: Vec<InstanceId>,
    /// Preview connection lines.
    pub lines: Vec<InstanceId>,
}

impl PreviewArtifacts {
    /// Total artifact count.
    #[must_use]
    pub fn total(&self) -> usize {
        self.instances.len() + self.markers.len() + self.lines.len()
    }

    /// Delete every artifact from the document and clear the sets.
    fn clear_via<D: SceneDocument>(&mut self, doc: &mut D) {
        for id in self
            .instances
            .drain(..)
            .chain(self.markers.drain(..))
            .chain(self.lines.drain(..))
        {
            doc.delete(id);
        }
    }
}

/// Outcome of a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitSummary {
    /// Exploded instances promoted to permanent objects.
    pub instances_kept: usize,
    /// Source instances deleted from the document.
    pub sources_deleted: usize,
    /// Permanent connection lines created.
    pub lines_kept: usize,
}

/// One explosion command: flatten once, preview repeatedly, then commit or
/// cancel.
///
/// The session holds read-only copies of the hierarchy data plus the ids of
/// artifacts it created; it never outlives a single command invocation.
#[derive(Debug)]
pub struct ExplodeSession {
    root: InstanceNode,
    root_name: String,
    leaves: Vec<LeafComponent>,
    explosion_center: Point3<f64>,
    components_centroid: Point3<f64>,
    max_diagonal: f64,
    params: ExplosionParams,
    artifacts: PreviewArtifacts,
    state: SessionState,
}

impl ExplodeSession {
    /// Open a session on the selected root assembly and run the first
    /// preview pass.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidSelection`] if `root` is not a placed block
    /// instance; [`SessionError::EmptyHierarchy`] if flattening yields no
    /// leaf components. Neither leaves any state in the document.
    pub fn open<D: SceneDocument>(
        doc: &mut D,
        root: InstanceId,
        params: ExplosionParams,
    ) -> SessionResult<Self> {
        let root_node = doc
            .instance(root)
            .cloned()
            .ok_or(SessionError::InvalidSelection { id: root.raw() })?;

        let root_name = doc
            .definition(root_node.definition)
            .map_or_else(|| "unnamed".to_string(), |d| d.name.clone());

        let leaves = flatten(&root_node, &Affine3::identity(), doc);
        if leaves.is_empty() {
            return Err(SessionError::EmptyHierarchy { name: root_name });
        }

        let root_bounds = doc
            .definition(root_node.definition)
            .map_or_else(Aabb::empty, |d| d.bounds.transformed(&root_node.transform));
        let explosion_center = root_bounds.center();
        let max_diagonal = root_bounds.diagonal();
        let components_centroid = weighted_centroid(&leaves).unwrap_or(explosion_center);

        info!(
            root = root.raw(),
            name = %root_name,
            leaf_count = leaves.len(),
            max_diagonal,
            "explosion session opened"
        );

        let mut session = Self {
            root: root_node,
            root_name,
            leaves,
            explosion_center,
            components_centroid,
            max_diagonal,
            params: params.clamped(),
            artifacts: PreviewArtifacts::default(),
            state: SessionState::Previewing,
        };
        session.rebuild(doc);
        Ok(session)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current parameters.
    #[must_use]
    pub fn params(&self) -> &ExplosionParams {
        &self.params
    }

    /// Number of leaf components in the assembly.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Component names in discovery order, for list displays.
    #[must_use]
    pub fn leaf_names(&self) -> Vec<&str> {
        self.leaves.iter().map(|l| l.name.as_str()).collect()
    }

    /// The flattened leaf components with their current final transforms.
    #[must_use]
    pub fn leaves(&self) -> &[LeafComponent] {
        &self.leaves
    }

    /// Ids of the artifacts created by the latest preview pass.
    #[must_use]
    pub fn artifacts(&self) -> &PreviewArtifacts {
        &self.artifacts
    }

    /// The point displacements are currently measured from.
    #[must_use]
    pub fn reference_center(&self) -> Point3<f64> {
        match self.params.mode {
            ExplosionMode::Relative => self.components_centroid,
            ExplosionMode::Center | ExplosionMode::Axial => self.explosion_center,
        }
    }

    /// Apply new parameters and rebuild the preview.
    ///
    /// Every preview artifact is deleted and regenerated; there is no
    /// incremental diffing, since a mode switch can change the direction of
    /// every component at once.
    ///
    /// # Errors
    ///
    /// [`SessionError::Closed`] after commit or cancel.
    pub fn set_params<D: SceneDocument>(
        &mut self,
        doc: &mut D,
        params: ExplosionParams,
    ) -> SessionResult<()> {
        self.ensure_previewing()?;
        self.params = params.clamped();
        self.rebuild(doc);
        Ok(())
    }

    /// Commit the exploded view.
    ///
    /// Deletes the source hierarchy (only the root when
    /// `preserve_hierarchy`, otherwise the full recursively collected
    /// instance set, cycle-safe), discards markers and preview lines, keeps
    /// the exploded instances, and optionally materializes permanent
    /// connection lines to each instance's re-queried centroid.
    ///
    /// # Errors
    ///
    /// [`SessionError::Closed`] after commit or cancel.
    pub fn commit<D: SceneDocument>(&mut self, doc: &mut D) -> SessionResult<CommitSummary> {
        self.ensure_previewing()?;

        // Permanent lines target the instances' actual post-creation
        // centroids, re-queried from the document so rounding in instance
        // creation cannot skew them.
        let mut lines_to_keep = Vec::new();
        if self.params.keep_connection_lines {
            let reference = self.reference_center();
            for &id in &self.artifacts.instances {
                if let Some(bounds) = doc.world_bounds(id) {
                    lines_to_keep.push((reference, bounds.center()));
                }
            }
        }

        let sources: Vec<InstanceId> = if self.params.preserve_hierarchy {
            vec![self.root.id]
        } else {
            collect_for_deletion(&self.root, doc)
        };
        let mut sources_deleted = 0;
        for id in sources {
            if doc.delete(id) {
                sources_deleted += 1;
            }
        }

        for id in self.artifacts.markers.drain(..) {
            doc.delete(id);
        }
        for id in self.artifacts.lines.drain(..) {
            doc.delete(id);
        }

        let mut lines_kept = 0;
        for (start, end) in lines_to_keep {
            if doc
                .create_line(start, end, Color::YELLOW, CONNECTION_LINE_WEIGHT)
                .is_some()
            {
                lines_kept += 1;
            }
        }

        // Keep the exploded instances: forget their ids without deleting.
        let instances_kept = self.artifacts.instances.len();
        self.artifacts.instances.clear();

        self.state = SessionState::Committed;
        doc.request_redraw();

        info!(
            name = %self.root_name,
            instances_kept,
            sources_deleted,
            lines_kept,
            "explosion committed"
        );
        Ok(CommitSummary {
            instances_kept,
            sources_deleted,
            lines_kept,
        })
    }

    /// Cancel the session, deleting every generated artifact and leaving
    /// the source hierarchy untouched.
    ///
    /// Idempotent; calling on a terminal session does nothing. A forced
    /// close goes through here.
    pub fn cancel<D: SceneDocument>(&mut self, doc: &mut D) {
        if self.state != SessionState::Previewing {
            return;
        }
        self.artifacts.clear_via(doc);
        for leaf in &mut self.leaves {
            leaf.reset();
        }
        self.state = SessionState::Cancelled;
        doc.request_redraw();
        info!(name = %self.root_name, "explosion cancelled");
    }

    /// Close the session without committing.
    ///
    /// A dialog dismissed with no explicit choice ends up here; identical to
    /// [`cancel`](Self::cancel).
    pub fn close<D: SceneDocument>(&mut self, doc: &mut D) {
        self.cancel(doc);
    }

    fn ensure_previewing(&self) -> SessionResult<()> {
        if self.state == SessionState::Previewing {
            Ok(())
        } else {
            Err(SessionError::Closed { state: self.state })
        }
    }

    /// One full preview pass: drop everything, recompute, recreate.
    fn rebuild<D: SceneDocument>(&mut self, doc: &mut D) {
        self.artifacts.clear_via(doc);

        let explosion_distance = self.params.explosion_distance(self.max_diagonal);

        // Zero strength: one exact, untransformed copy of the root instead
        // of per-leaf copies. Markers and lines still follow the toggles,
        // drawn at the rest-pose centroids.
        if explosion_distance.abs() < ZERO_DISPLACEMENT_EPS {
            for leaf in &mut self.leaves {
                leaf.reset();
            }
            if let Some(id) = doc.create_instance(self.root.definition, &self.root.transform) {
                self.artifacts.instances.push(id);
            }
            if self.params.show_centroids {
                if let Some(id) = doc.create_marker(self.explosion_center, Color::RED) {
                    self.artifacts.markers.push(id);
                }
                if let Some(id) = doc.create_marker(self.components_centroid, Color::BLUE) {
                    self.artifacts.markers.push(id);
                }
            }
            let reference = self.reference_center();
            for leaf in &self.leaves {
                if self.params.show_centroids {
                    if let Some(id) = doc.create_marker(leaf.centroid, Color::GREEN) {
                        self.artifacts.markers.push(id);
                    }
                }
                if self.params.show_connection_lines {
                    if let Some(id) = doc.create_line(
                        reference,
                        leaf.centroid,
                        Color::YELLOW,
                        CONNECTION_LINE_WEIGHT,
                    ) {
                        self.artifacts.lines.push(id);
                    }
                }
            }
            doc.request_redraw();
            return;
        }

        let ctx = ExplosionContext {
            reference_center: self.reference_center(),
            mode: self.params.mode,
            max_diagonal: self.max_diagonal,
            explosion_distance,
            factor: self.params.factor,
        };

        if self.params.show_centroids {
            if let Some(id) = doc.create_marker(self.explosion_center, Color::RED) {
                self.artifacts.markers.push(id);
            }
            if let Some(id) = doc.create_marker(self.components_centroid, Color::BLUE) {
                self.artifacts.markers.push(id);
            }
        }

        for index in 0..self.leaves.len() {
            let displacement = explosion_vector(&self.leaves[index], &ctx);
            let final_transform =
                translated(&self.leaves[index].original_transform, &displacement);
            self.leaves[index].final_transform = final_transform;

            let Some(id) = doc.create_instance(self.leaves[index].definition, &final_transform)
            else {
                warn!(
                    instance = self.leaves[index].instance.raw(),
                    "document rejected exploded copy, skipping"
                );
                continue;
            };
            self.artifacts.instances.push(id);

            // Markers and lines use the created copy's actual centroid.
            let Some(actual_centroid) = doc.world_bounds(id).map(|b| b.center()) else {
                continue;
            };
            if self.params.show_centroids {
                if let Some(marker) = doc.create_marker(actual_centroid, Color::GREEN) {
                    self.artifacts.markers.push(marker);
                }
            }
            if self.params.show_connection_lines {
                if let Some(line) = doc.create_line(
                    ctx.reference_center,
                    actual_centroid,
                    Color::YELLOW,
                    CONNECTION_LINE_WEIGHT,
                ) {
                    self.artifacts.lines.push(line);
                }
            }
        }

        doc.request_redraw();
        debug!(
            instances = self.artifacts.instances.len(),
            markers = self.artifacts.markers.len(),
            lines = self.artifacts.lines.len(),
            mode = %self.params.mode,
            strength = self.params.strength,
            "preview rebuilt"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use assembly_types::{Aabb, BlockDefinition, DefinitionId, translation};

    use super::*;
    use crate::memory::InMemoryDocument;

    fn two_bolt_doc() -> (InMemoryDocument, InstanceId) {
        let mut doc = InMemoryDocument::new();
        let bolt = doc.add_definition(BlockDefinition::new(
            "bolt",
            Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)),
        ));
        let frame = BlockDefinition::new(
            "frame",
            Aabb::new(Point3::new(-6.0, -8.0, 0.0), Point3::new(6.0, 8.0, 0.0)),
        )
        .with_child(doc.nested_instance(bolt, translation(5.0, 0.0, 0.0)))
        .with_child(doc.nested_instance(bolt, translation(-5.0, 0.0, 0.0)));
        let frame = doc.add_definition(frame);
        let root = doc.add_instance(frame, translation(0.0, 0.0, 0.0));
        (doc, root)
    }

    #[test]
    fn test_open_rejects_unknown_instance() {
        let mut doc = InMemoryDocument::new();
        let result = ExplodeSession::open(&mut doc, InstanceId::new(99), ExplosionParams::default());
        assert!(matches!(
            result,
            Err(SessionError::InvalidSelection { id: 99 })
        ));
        assert_eq!(doc.object_count(), 0);
    }

    #[test]
    fn test_open_rejects_unresolvable_hierarchy() {
        let mut doc = InMemoryDocument::new();
        let root = doc.add_instance(DefinitionId::new(7), Affine3::identity());
        let before = doc.object_count();
        let result = ExplodeSession::open(&mut doc, root, ExplosionParams::default());
        assert!(matches!(result, Err(SessionError::EmptyHierarchy { .. })));
        assert_eq!(doc.object_count(), before);
    }

    #[test]
    fn test_zero_strength_previews_single_root_copy() {
        let (mut doc, root) = two_bolt_doc();
        let session = ExplodeSession::open(&mut doc, root, ExplosionParams::default())
            .expect("session opens");
        assert_eq!(session.state(), SessionState::Previewing);
        assert_eq!(session.leaf_count(), 2);
        assert_eq!(session.artifacts().instances.len(), 1);
        assert!(session.artifacts().markers.is_empty());
        for leaf in session.leaves() {
            assert!(leaf.displacement().norm() < 1e-12);
        }
    }

    #[test]
    fn test_set_params_replaces_artifacts() {
        let (mut doc, root) = two_bolt_doc();
        let mut session = ExplodeSession::open(&mut doc, root, ExplosionParams::default())
            .expect("session opens");
        let single_copy = session.artifacts().instances[0];

        session
            .set_params(&mut doc, ExplosionParams::default().with_strength(50.0))
            .expect("still previewing");
        assert!(!doc.contains(single_copy));
        assert_eq!(session.artifacts().instances.len(), 2);
    }

    #[test]
    fn test_commit_is_terminal() {
        let (mut doc, root) = two_bolt_doc();
        let mut session =
            ExplodeSession::open(&mut doc, root, ExplosionParams::default().with_strength(40.0))
                .expect("session opens");
        session.commit(&mut doc).expect("first commit");
        assert_eq!(session.state(), SessionState::Committed);

        assert!(matches!(
            session.commit(&mut doc),
            Err(SessionError::Closed {
                state: SessionState::Committed
            })
        ));
        assert!(matches!(
            session.set_params(&mut doc, ExplosionParams::default()),
            Err(SessionError::Closed { .. })
        ));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let (mut doc, root) = two_bolt_doc();
        let before = doc.object_count();
        let mut session =
            ExplodeSession::open(&mut doc, root, ExplosionParams::default().with_strength(40.0))
                .expect("session opens");
        session.cancel(&mut doc);
        assert_eq!(session.state(), SessionState::Cancelled);
        assert_eq!(doc.object_count(), before);

        session.cancel(&mut doc);
        assert_eq!(session.state(), SessionState::Cancelled);
        assert_eq!(doc.object_count(), before);
    }

    #[test]
    fn test_cancel_after_commit_keeps_committed_state() {
        let (mut doc, root) = two_bolt_doc();
        let mut session =
            ExplodeSession::open(&mut doc, root, ExplosionParams::default().with_strength(40.0))
                .expect("session opens");
        session.commit(&mut doc).expect("commit");
        let after_commit = doc.object_count();

        session.cancel(&mut doc);
        assert_eq!(session.state(), SessionState::Committed);
        assert_eq!(doc.object_count(), after_commit);
    }

    #[test]
    fn test_relative_mode_uses_components_centroid() {
        let (mut doc, root) = two_bolt_doc();
        let mut session = ExplodeSession::open(&mut doc, root, ExplosionParams::default())
            .expect("session opens");
        let bbox_center = session.reference_center();
        session
            .set_params(
                &mut doc,
                ExplosionParams::default().with_mode(ExplosionMode::Relative),
            )
            .expect("still previewing");
        // Symmetric bolts: the weighted centroid coincides with the center.
        assert!((session.reference_center() - bbox_center).norm() < 1e-10);
        assert_eq!(session.reference_center(), session.components_centroid);
    }
}
