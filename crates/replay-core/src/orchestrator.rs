//! Replays a changeset record by record
//!
//! Records are processed strictly in server order: later records can depend
//! on folders created by earlier ones, and the log must read in the same
//! order the changes were applied.

use std::path::{Path, PathBuf};

use replay_fs::relative_display;

use crate::Result;
use crate::actuator::DestinationActuator;
use crate::changeset::Changeset;
use crate::classify::{ResolvedAction, classify};
use crate::flags::ChangeFlags;
use crate::log::{ChangeMark, ReplayLog};
use crate::path_map::PathMap;
use crate::registrar::Registrar;
use crate::resolver::PathResolver;
use crate::source::ChangesetSource;

/// Outcome of one replay run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplicationResult {
    /// Destination paths that were added, edited or deleted, in order
    pub changed_paths: Vec<PathBuf>,
    /// Whether any record had change types that could not be replayed
    pub had_unhandled: bool,
}

/// Error line for a record whose change types cannot be replayed.
pub fn unhandled_warning(shown_path: &str, flags: ChangeFlags) -> String {
    format!(
        "*** WARNING *** Unhandled change types on file {}: {}",
        shown_path,
        flags.unhandled_labels()
    )
}

/// Drives resolution, classification and application over a changeset.
pub struct ReplicationOrchestrator<'a> {
    source: &'a dyn ChangesetSource,
    log: &'a mut dyn ReplayLog,
    display_base: Option<PathBuf>,
}

impl<'a> ReplicationOrchestrator<'a> {
    pub fn new(source: &'a dyn ChangesetSource, log: &'a mut dyn ReplayLog) -> Self {
        Self {
            source,
            log,
            display_base: None,
        }
    }

    /// Show logged paths relative to `base` instead of in full.
    pub fn with_display_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.display_base = Some(base.into());
        self
    }

    fn display(&self, path: &Path) -> String {
        match &self.display_base {
            Some(base) => relative_display(base, path),
            None => path.display().to_string(),
        }
    }

    /// Replay `changeset` onto `destination_root`.
    ///
    /// Records without an Add, Edit or Delete flag are passed over. Records
    /// that classify as unhandled are logged as errors and the run goes on;
    /// only download and filesystem failures end it early.
    pub fn run(
        &mut self,
        changeset: &Changeset,
        base_prefix: &str,
        path_map: &PathMap,
        destination_root: &Path,
        registrar: &mut dyn Registrar,
    ) -> Result<ReplicationResult> {
        self.log.info(&format!(
            "Changeset {}, committed by {}:",
            changeset.id, changeset.committer
        ));
        self.log.info(&changeset.comment);
        self.log.info("");

        let resolver = PathResolver::new(base_prefix, path_map, destination_root);
        let mut actuator = DestinationActuator::new(self.source, changeset, registrar);
        let mut result = ReplicationResult::default();

        for record in changeset
            .records
            .iter()
            .filter(|r| r.flags.has_content_change())
        {
            tracing::debug!(
                file = %resolver.stripped(&record.source_path),
                flags = %record.flags,
                "replaying change"
            );

            let dest = resolver.resolve(&record.source_path);
            let action = classify(record, &dest, dest.exists());
            let applied = actuator.apply(&action, record)?;

            match &action {
                ResolvedAction::Add(path, _) => {
                    let shown = self.display(path);
                    self.log.change(ChangeMark::Add, &shown);
                }
                ResolvedAction::Edit(path) => {
                    let shown = self.display(path);
                    self.log.change(ChangeMark::Edit, &shown);
                }
                ResolvedAction::Delete(path) => {
                    let shown = self.display(path);
                    self.log.change(ChangeMark::Delete, &shown);
                }
                ResolvedAction::NoOp(path) => {
                    tracing::debug!(path = %path.display(), "folder edit, nothing to do");
                }
                ResolvedAction::Skip => {
                    tracing::debug!(path = %dest.display(), "delete of missing item skipped");
                }
                ResolvedAction::Unhandled(path, flags) => {
                    result.had_unhandled = true;
                    let line = unhandled_warning(&self.display(path), *flags);
                    self.log.error(&line);
                }
            }

            if let Some(path) = applied {
                result.changed_paths.push(path);
            }
        }

        tracing::info!(
            changeset = changeset.id,
            changed = result.changed_paths.len(),
            unhandled = result.had_unhandled,
            "replay finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::ChangeFlag;

    #[test]
    fn unhandled_warning_lists_labels_in_report_order() {
        let flags = ChangeFlag::Undelete | ChangeFlag::Branch | ChangeFlag::Rename;
        assert_eq!(
            unhandled_warning("src/a.txt", flags),
            "*** WARNING *** Unhandled change types on file src/a.txt: BRANCH RENAME UNDELETE"
        );
    }

    #[test]
    fn unhandled_warning_ignores_content_flags() {
        let flags = ChangeFlag::Edit | ChangeFlag::Lock;
        assert_eq!(
            unhandled_warning("b.txt", flags),
            "*** WARNING *** Unhandled change types on file b.txt: LOCK"
        );
    }
}
