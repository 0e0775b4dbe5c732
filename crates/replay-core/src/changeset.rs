//! Changeset and change record types

use serde::{Deserialize, Serialize};

use crate::flags::ChangeFlags;

/// Numeric changeset identifier, as assigned by the version-control server.
pub type ChangesetId = u32;

/// Whether a versioned item is a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    File,
    #[serde(alias = "folder")]
    Directory,
}

/// One file-level entry of a changeset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangesetRecord {
    /// Server path of the item, e.g. `$/Project/src/main.c`
    pub source_path: String,
    pub item_kind: ItemKind,
    pub flags: ChangeFlags,
}

impl ChangesetRecord {
    pub fn new(
        source_path: impl Into<String>,
        item_kind: ItemKind,
        flags: impl Into<ChangeFlags>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            item_kind,
            flags: flags.into(),
        }
    }

    pub fn file(source_path: impl Into<String>, flags: impl Into<ChangeFlags>) -> Self {
        Self::new(source_path, ItemKind::File, flags)
    }

    pub fn directory(source_path: impl Into<String>, flags: impl Into<ChangeFlags>) -> Self {
        Self::new(source_path, ItemKind::Directory, flags)
    }
}

/// A committed changeset with its records in server order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changeset {
    pub id: ChangesetId,
    pub committer: String,
    pub comment: String,
    pub records: Vec<ChangesetRecord>,
}
