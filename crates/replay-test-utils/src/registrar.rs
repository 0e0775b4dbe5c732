//! Registrar that records calls instead of tracking a working copy.

use std::path::{Path, PathBuf};

use replay_core::{PendingChange, PendingKind, Registrar, Result};

/// Records every `pend_*` call in order.
#[derive(Debug, Default)]
pub struct RecordingRegistrar {
    pub calls: Vec<PendingChange>,
}

impl RecordingRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths passed to calls of `kind`, in call order.
    pub fn paths(&self, kind: PendingKind) -> Vec<PathBuf> {
        self.calls
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.local_path.clone())
            .collect()
    }
}

impl Registrar for RecordingRegistrar {
    fn pend_add(&mut self, path: &Path) -> Result<()> {
        self.calls.push(PendingChange::new(PendingKind::Add, path));
        Ok(())
    }

    fn pend_edit(&mut self, path: &Path) -> Result<()> {
        self.calls.push(PendingChange::new(PendingKind::Edit, path));
        Ok(())
    }

    fn pend_delete(&mut self, path: &Path) -> Result<()> {
        self.calls.push(PendingChange::new(PendingKind::Delete, path));
        Ok(())
    }
}
