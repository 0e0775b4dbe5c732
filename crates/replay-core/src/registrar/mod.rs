//! Destination working-copy tracking
//!
//! A [`Registrar`] records pending changes as the replay touches files. A
//! [`WorkingCopy`] can also list and commit them. Replays that only write to
//! the filesystem use [`Detached`].

mod workspace;

pub use workspace::{CheckedIn, LocalWorkspace, WORKSPACE_DIR};

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::changeset::ChangesetId;

/// Kind of a staged change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingKind {
    Add,
    Edit,
    Delete,
}

impl PendingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for PendingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A staged, not yet committed change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChange {
    pub kind: PendingKind,
    #[serde(rename = "path")]
    pub local_path: PathBuf,
}

impl PendingChange {
    pub fn new(kind: PendingKind, local_path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            local_path: local_path.into(),
        }
    }
}

/// Records pending changes against a destination working copy.
pub trait Registrar {
    fn pend_add(&mut self, path: &Path) -> Result<()>;

    fn pend_edit(&mut self, path: &Path) -> Result<()>;

    /// Stage a delete. Removing the item from disk is the working copy's
    /// job, not the caller's.
    fn pend_delete(&mut self, path: &Path) -> Result<()>;
}

/// A registrar whose pending changes can be listed and committed.
pub trait WorkingCopy: Registrar {
    /// Pending changes for any of `paths`, in the order they were staged.
    fn pending_changes(&self, paths: &[PathBuf]) -> Result<Vec<PendingChange>>;

    /// Commit `changes` with `comment`, returning the new changeset id.
    fn check_in(&mut self, changes: &[PendingChange], comment: &str) -> Result<ChangesetId>;
}

/// No working copy: replay writes files and tracks nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Detached;

impl Registrar for Detached {
    fn pend_add(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn pend_edit(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn pend_delete(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }
}
