//! Local working copy backed by a TOML ledger
//!
//! The ledger lives at `<root>/.replay/ledger.toml` and holds the staged
//! changes plus the history of check-ins made through it. It is saved
//! atomically after every mutation.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use replay_fs::{ConfigStore, io};

use super::{PendingChange, PendingKind, Registrar, WorkingCopy};
use crate::changeset::ChangesetId;
use crate::{Error, Result};

/// Directory holding working copy state inside the destination root.
pub const WORKSPACE_DIR: &str = ".replay";
const LEDGER_FILE: &str = "ledger.toml";
const LEDGER_VERSION: &str = "1.0";

/// A committed set of changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckedIn {
    pub id: ChangesetId,
    pub comment: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
    #[serde(default)]
    pub changes: Vec<PendingChange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Ledger {
    version: String,
    #[serde(default)]
    pending: Vec<PendingChange>,
    #[serde(default)]
    history: Vec<CheckedIn>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            version: LEDGER_VERSION.to_string(),
            pending: Vec::new(),
            history: Vec::new(),
        }
    }
}

/// Working copy state for one destination folder.
#[derive(Debug)]
pub struct LocalWorkspace {
    root: PathBuf,
    ledger: Ledger,
    store: ConfigStore,
}

impl LocalWorkspace {
    fn ledger_path_for(root: &Path) -> PathBuf {
        root.join(WORKSPACE_DIR).join(LEDGER_FILE)
    }

    /// True when `root` has a working copy ledger.
    pub fn exists_at(root: &Path) -> bool {
        Self::ledger_path_for(root).is_file()
    }

    /// Create a working copy at `root`, or open the existing one.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if Self::exists_at(&root) {
            return Self::open(root);
        }

        let workspace = Self {
            root,
            ledger: Ledger::default(),
            store: ConfigStore::new(),
        };
        workspace.save()?;
        tracing::info!(root = %workspace.root.display(), "initialized working copy");
        Ok(workspace)
    }

    /// Open the working copy at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let path = Self::ledger_path_for(&root);
        if !path.is_file() {
            return Err(Error::NotAWorkspace { path: root });
        }

        let store = ConfigStore::new();
        let ledger: Ledger = store.load(&path)?;
        tracing::debug!(
            root = %root.display(),
            pending = ledger.pending.len(),
            "opened working copy"
        );
        Ok(Self { root, ledger, store })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All staged changes, in staging order.
    pub fn pending(&self) -> &[PendingChange] {
        &self.ledger.pending
    }

    pub fn history(&self) -> &[CheckedIn] {
        &self.ledger.history
    }

    fn save(&self) -> Result<()> {
        self.store
            .save(&Self::ledger_path_for(&self.root), &self.ledger)?;
        Ok(())
    }

    fn stage(&mut self, kind: PendingKind, path: &Path) -> Result<()> {
        let existing = self
            .ledger
            .pending
            .iter()
            .position(|c| c.local_path == path);

        match existing {
            None => self.ledger.pending.push(PendingChange::new(kind, path)),
            Some(idx) => match (self.ledger.pending[idx].kind, kind) {
                // Still a new item as far as the history is concerned
                (PendingKind::Add, PendingKind::Edit | PendingKind::Add) => {}
                (PendingKind::Add, PendingKind::Delete) => {
                    self.ledger.pending.remove(idx);
                }
                (_, kind) => self.ledger.pending[idx].kind = kind,
            },
        }

        tracing::debug!(kind = %kind, path = %path.display(), "staged change");
        self.save()
    }
}

impl Registrar for LocalWorkspace {
    fn pend_add(&mut self, path: &Path) -> Result<()> {
        self.stage(PendingKind::Add, path)
    }

    fn pend_edit(&mut self, path: &Path) -> Result<()> {
        self.stage(PendingKind::Edit, path)
    }

    fn pend_delete(&mut self, path: &Path) -> Result<()> {
        self.stage(PendingKind::Delete, path)
    }
}

impl WorkingCopy for LocalWorkspace {
    fn pending_changes(&self, paths: &[PathBuf]) -> Result<Vec<PendingChange>> {
        Ok(self
            .ledger
            .pending
            .iter()
            .filter(|c| paths.contains(&c.local_path))
            .cloned()
            .collect())
    }

    fn check_in(&mut self, changes: &[PendingChange], comment: &str) -> Result<ChangesetId> {
        if changes.is_empty() {
            return Err(Error::NothingToCheckIn);
        }

        for change in changes {
            if change.kind == PendingKind::Delete && !io::remove_path(&change.local_path)? {
                tracing::warn!(
                    path = %change.local_path.display(),
                    "deleted item was already gone"
                );
            }
        }

        self.ledger.pending.retain(|p| !changes.contains(p));

        let id = self.ledger.history.last().map_or(1, |c| c.id + 1);
        self.ledger.history.push(CheckedIn {
            id,
            comment: comment.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            changes: changes.to_vec(),
        });
        self.save()?;

        tracing::info!(changeset = id, changes = changes.len(), "checked in");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_without_ledger_fails() {
        let temp = TempDir::new().unwrap();
        let result = LocalWorkspace::open(temp.path());
        assert!(matches!(result, Err(Error::NotAWorkspace { .. })));
    }

    #[test]
    fn init_is_reopenable() {
        let temp = TempDir::new().unwrap();
        let mut ws = LocalWorkspace::init(temp.path()).unwrap();
        ws.pend_add(&temp.path().join("a.txt")).unwrap();

        let again = LocalWorkspace::init(temp.path()).unwrap();
        assert_eq!(again.pending().len(), 1);
    }

    #[test]
    fn edit_after_add_stays_add() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.txt");
        let mut ws = LocalWorkspace::init(temp.path()).unwrap();

        ws.pend_add(&path).unwrap();
        ws.pend_edit(&path).unwrap();

        assert_eq!(ws.pending(), &[PendingChange::new(PendingKind::Add, &path)]);
    }

    #[test]
    fn delete_after_add_cancels() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.txt");
        let mut ws = LocalWorkspace::init(temp.path()).unwrap();

        ws.pend_add(&path).unwrap();
        ws.pend_delete(&path).unwrap();

        assert!(ws.pending().is_empty());
    }

    #[test]
    fn later_kind_replaces_edit() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.txt");
        let mut ws = LocalWorkspace::init(temp.path()).unwrap();

        ws.pend_edit(&path).unwrap();
        ws.pend_delete(&path).unwrap();

        assert_eq!(ws.pending(), &[PendingChange::new(PendingKind::Delete, &path)]);
    }

    #[test]
    fn empty_check_in_rejected() {
        let temp = TempDir::new().unwrap();
        let mut ws = LocalWorkspace::init(temp.path()).unwrap();
        assert!(matches!(ws.check_in(&[], "c"), Err(Error::NothingToCheckIn)));
    }
}
