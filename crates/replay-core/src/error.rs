//! Error types for replay-core

use std::path::PathBuf;

use crate::changeset::ChangesetId;

/// Result type for replay-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in replay-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source has no changeset with this id
    #[error("Changeset {id} not found")]
    ChangesetNotFound { id: ChangesetId },

    /// The source has no content for an item that must be downloaded
    #[error("No content for {path} in changeset {changeset}")]
    ContentNotFound { changeset: ChangesetId, path: String },

    /// A change type name that is not one of the known flags
    #[error("Unknown change type: {name}")]
    UnknownChangeFlag { name: String },

    /// Malformed line in a path map file
    #[error("Path map line {line}: {message}")]
    PathMapParse { line: usize, message: String },

    /// No working copy ledger at the given root
    #[error("Not a replay working copy: {path} (run `replay init` first)")]
    NotAWorkspace { path: PathBuf },

    /// Check-in requested but the replay changed nothing
    #[error("Nothing was changed, there is nothing to check in")]
    NoChangedItems,

    /// Check-in requested but the working copy has no matching pending changes
    #[error("No pending changes")]
    NoPendingChanges,

    /// Check-in called with an empty change list
    #[error("Check-in requires at least one pending change")]
    NothingToCheckIn,

    // Transparent wrappers for underlying errors
    /// Filesystem error from replay-fs
    #[error(transparent)]
    Fs(#[from] replay_fs::Error),
}
