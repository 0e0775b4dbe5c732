//! Source version-control access
//!
//! The engine only needs two things from the source system: the changeset
//! itself and the bytes of an item as of that changeset.

mod store;

pub use store::LocalStore;

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};

use crate::changeset::{Changeset, ChangesetId, ChangesetRecord};
use crate::{Error, Result};

/// Read access to a source version-control system.
pub trait ChangesetSource {
    /// Fetch a changeset with its records in server order.
    fn changeset(&self, id: ChangesetId) -> Result<Changeset>;

    /// Download the content of `record`'s item as of `changeset`.
    fn download(&self, changeset: &Changeset, record: &ChangesetRecord) -> Result<Vec<u8>>;
}

/// In-memory source, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySource {
    changesets: BTreeMap<ChangesetId, Changeset>,
    contents: HashMap<(ChangesetId, String), Vec<u8>>,
    downloads: Cell<usize>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_changeset(mut self, changeset: Changeset) -> Self {
        self.changesets.insert(changeset.id, changeset);
        self
    }

    pub fn with_content(
        mut self,
        id: ChangesetId,
        source_path: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.contents.insert((id, source_path.into()), content.into());
        self
    }

    /// Number of successful downloads served so far.
    pub fn download_count(&self) -> usize {
        self.downloads.get()
    }
}

impl ChangesetSource for MemorySource {
    fn changeset(&self, id: ChangesetId) -> Result<Changeset> {
        self.changesets
            .get(&id)
            .cloned()
            .ok_or(Error::ChangesetNotFound { id })
    }

    fn download(&self, changeset: &Changeset, record: &ChangesetRecord) -> Result<Vec<u8>> {
        let content = self
            .contents
            .get(&(changeset.id, record.source_path.clone()))
            .cloned()
            .ok_or_else(|| Error::ContentNotFound {
                changeset: changeset.id,
                path: record.source_path.clone(),
            })?;
        self.downloads.set(self.downloads.get() + 1);
        Ok(content)
    }
}
