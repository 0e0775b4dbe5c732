//! Applies resolved actions to the destination

use std::path::PathBuf;

use replay_fs::io;

use crate::Result;
use crate::changeset::{Changeset, ChangesetRecord, ItemKind};
use crate::classify::ResolvedAction;
use crate::registrar::Registrar;
use crate::source::ChangesetSource;

/// Executes [`ResolvedAction`]s for one changeset.
pub struct DestinationActuator<'a> {
    source: &'a dyn ChangesetSource,
    changeset: &'a Changeset,
    registrar: &'a mut dyn Registrar,
}

impl<'a> DestinationActuator<'a> {
    pub fn new(
        source: &'a dyn ChangesetSource,
        changeset: &'a Changeset,
        registrar: &'a mut dyn Registrar,
    ) -> Self {
        Self {
            source,
            changeset,
            registrar,
        }
    }

    /// Apply `action` for `record`.
    ///
    /// Returns the destination path when the action changed something.
    /// Deletes are only staged with the registrar; nothing is removed here.
    pub fn apply(
        &mut self,
        action: &ResolvedAction,
        record: &ChangesetRecord,
    ) -> Result<Option<PathBuf>> {
        match action {
            ResolvedAction::Add(path, ItemKind::Directory) => {
                io::ensure_dir(path)?;
                self.registrar.pend_add(path)?;
                Ok(Some(path.clone()))
            }
            ResolvedAction::Add(path, ItemKind::File) => {
                let content = self.source.download(self.changeset, record)?;
                io::write_atomic(path, &content)?;
                self.registrar.pend_add(path)?;
                Ok(Some(path.clone()))
            }
            ResolvedAction::Edit(path) => {
                self.registrar.pend_edit(path)?;
                let content = self.source.download(self.changeset, record)?;
                io::write_atomic(path, &content)?;
                Ok(Some(path.clone()))
            }
            ResolvedAction::Delete(path) => {
                self.registrar.pend_delete(path)?;
                Ok(Some(path.clone()))
            }
            ResolvedAction::NoOp(_) | ResolvedAction::Skip | ResolvedAction::Unhandled(..) => {
                Ok(None)
            }
        }
    }
}
