//! Check-in preparation for a replayed changeset

use crate::changeset::Changeset;
use crate::orchestrator::ReplicationResult;
use crate::registrar::{PendingChange, WorkingCopy};
use crate::{Error, Result};

/// Comment for the changeset that records a replay.
pub fn checkin_comment(changeset: &Changeset) -> String {
    format!(
        "Original changeset {}, committed by {}, was moved to this location.\n\nOriginal comment:\n{}",
        changeset.id, changeset.committer, changeset.comment
    )
}

/// The pending changes and comment a check-in would commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInPlan {
    pub changes: Vec<PendingChange>,
    pub comment: String,
}

/// Collect the working copy's pending changes for the paths a replay
/// touched.
///
/// Fails with [`Error::NoChangedItems`] when the replay changed nothing and
/// with [`Error::NoPendingChanges`] when none of the changed paths is
/// pending.
pub fn plan_check_in(
    working_copy: &dyn WorkingCopy,
    changeset: &Changeset,
    result: &ReplicationResult,
) -> Result<CheckInPlan> {
    if result.changed_paths.is_empty() {
        return Err(Error::NoChangedItems);
    }

    let changes = working_copy.pending_changes(&result.changed_paths)?;
    if changes.is_empty() {
        return Err(Error::NoPendingChanges);
    }

    Ok(CheckInPlan {
        changes,
        comment: checkin_comment(changeset),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_quotes_original() {
        let changeset = Changeset {
            id: 1234,
            committer: "DOMAIN\\jdoe".into(),
            comment: "Fix the build".into(),
            records: Vec::new(),
        };
        assert_eq!(
            checkin_comment(&changeset),
            "Original changeset 1234, committed by DOMAIN\\jdoe, was moved to this location.\n\nOriginal comment:\nFix the build"
        );
    }
}
