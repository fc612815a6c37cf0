//! Error types for explosion sessions.

use thiserror::Error;

use crate::session::SessionState;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while driving an explosion session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The chosen root id does not resolve to a block instance.
    #[error("selected object {id} is not a block instance")]
    InvalidSelection {
        /// The rejected document id.
        id: u64,
    },

    /// Flattening the root yielded no leaf components.
    #[error("assembly '{name}' contains no components to explode")]
    EmptyHierarchy {
        /// Name of the root assembly's definition.
        name: String,
    },

    /// The session reached a terminal state and accepts no further changes.
    #[error("session is already {state}")]
    Closed {
        /// The terminal state the session is in.
        state: SessionState,
    },
}
