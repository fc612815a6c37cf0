//! Preview/commit session for exploded assembly views.
//!
//! An [`ExplodeSession`] owns the state machine around one explosion
//! command: it flattens the chosen root assembly, rebuilds a live preview on
//! every parameter change, and finally either commits (replace the source
//! hierarchy with the displaced copies) or cancels (discard every generated
//! artifact).
//!
//! The host document is abstracted behind the [`SceneDocument`] trait; the
//! crate ships [`InMemoryDocument`] as the reference implementation used by
//! tests and non-interactive tooling.
//!
//! # State machine
//!
//! ```text
//! open ──► Previewing ──set_params──► Previewing
//!               │
//!               ├─ commit ──► Committed   (sources deleted, copies kept)
//!               └─ cancel ──► Cancelled   (all artifacts deleted)
//! ```
//!
//! A forced close (window dismissed without a choice) behaves as cancel.
//!
//! # Example
//!
//! ```
//! use assembly_preview::{ExplodeSession, InMemoryDocument};
//! use assembly_types::{Aabb, BlockDefinition, ExplosionParams, Point3, translation};
//!
//! let mut doc = InMemoryDocument::new();
//! let bolt = doc.add_definition(BlockDefinition::new(
//!     "bolt",
//!     Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)),
//! ));
//! let frame_def = BlockDefinition::new(
//!     "frame",
//!     Aabb::new(Point3::new(-6.0, -8.0, -1.0), Point3::new(6.0, 8.0, 1.0)),
//! )
//! .with_child(doc.nested_instance(bolt, translation(5.0, 0.0, 0.0)))
//! .with_child(doc.nested_instance(bolt, translation(-5.0, 0.0, 0.0)));
//! let frame = doc.add_definition(frame_def);
//! let root = doc.add_instance(frame, translation(0.0, 0.0, 0.0));
//!
//! let mut session =
//!     ExplodeSession::open(&mut doc, root, ExplosionParams::default()).unwrap();
//! assert_eq!(session.leaf_count(), 2);
//!
//! let params = ExplosionParams::default().with_strength(60.0);
//! session.set_params(&mut doc, params).unwrap();
//! let summary = session.commit(&mut doc).unwrap();
//! assert_eq!(summary.instances_kept, 2);
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

mod document;
mod error;
mod memory;
mod session;

pub use document::{CONNECTION_LINE_WEIGHT, MARKER_DEFINITION_NAME, MARKER_RADIUS, SceneDocument};
pub use error::{SessionError, SessionResult};
pub use memory::{InMemoryDocument, SceneObject};
pub use session::{CommitSummary, ExplodeSession, PreviewArtifacts, SessionState};
