//! Change classification
//!
//! Flags on a source change are not mutually exclusive, so the order of the
//! rules in [`classify`] decides the outcome:
//!
//! 1. Add, or Edit of something missing at the destination -> add
//! 2. Edit of an existing item -> edit (folders: nothing to do)
//! 3. Delete -> delete when present, otherwise skip
//! 4. anything else -> unhandled

use std::path::{Path, PathBuf};

use crate::changeset::{ChangesetRecord, ItemKind};
use crate::flags::{ChangeFlag, ChangeFlags};

/// What the destination needs for one change record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAction {
    /// Create the item at the destination
    Add(PathBuf, ItemKind),
    /// Replace the content of an existing file
    Edit(PathBuf),
    /// Remove an existing item
    Delete(PathBuf),
    /// Edit of an existing folder; folders carry no content
    NoOp(PathBuf),
    /// Delete of an item that is not at the destination
    Skip,
    /// None of the rules applied
    Unhandled(PathBuf, ChangeFlags),
}

impl ResolvedAction {
    /// Destination path the action mutates, if it mutates anything.
    pub fn target(&self) -> Option<&Path> {
        match self {
            Self::Add(path, _) | Self::Edit(path) | Self::Delete(path) => Some(path),
            Self::NoOp(_) | Self::Skip | Self::Unhandled(..) => None,
        }
    }
}

/// Decide the destination action for `record`, whose destination path is
/// `dest` and currently exists or not.
pub fn classify(record: &ChangesetRecord, dest: &Path, destination_exists: bool) -> ResolvedAction {
    let flags = record.flags;
    let is_add = flags.contains(ChangeFlag::Add);
    let is_edit = flags.contains(ChangeFlag::Edit);
    let is_delete = flags.contains(ChangeFlag::Delete);

    if is_add || (is_edit && !destination_exists) {
        ResolvedAction::Add(dest.to_path_buf(), record.item_kind)
    } else if is_edit {
        match record.item_kind {
            ItemKind::File => ResolvedAction::Edit(dest.to_path_buf()),
            ItemKind::Directory => ResolvedAction::NoOp(dest.to_path_buf()),
        }
    } else if is_delete {
        if destination_exists {
            ResolvedAction::Delete(dest.to_path_buf())
        } else {
            ResolvedAction::Skip
        }
    } else {
        ResolvedAction::Unhandled(dest.to_path_buf(), flags)
    }
}
