//! Canned changesets and store fixtures.

use std::path::Path;

use replay_core::{
    ChangeFlag, Changeset, ChangesetId, ChangesetRecord, LocalStore, MemorySource,
};
use tempfile::TempDir;

/// Changeset 100 under `$/Proj`: adds `src/a.txt`, deletes `src/b.txt`.
pub fn add_and_delete_changeset() -> Changeset {
    Changeset {
        id: 100,
        committer: "jdoe".into(),
        comment: "Add a, drop b".into(),
        records: vec![
            ChangesetRecord::file("$/Proj/src/a.txt", ChangeFlag::Add),
            ChangesetRecord::file("$/Proj/src/b.txt", ChangeFlag::Delete),
        ],
    }
}

/// In-memory source serving [`add_and_delete_changeset`].
pub fn add_and_delete_source() -> MemorySource {
    MemorySource::new()
        .with_changeset(add_and_delete_changeset())
        .with_content(100, "$/Proj/src/a.txt", "alpha\n")
}

/// A directory-backed [`LocalStore`] in a temporary directory.
pub struct StoreFixture {
    temp_dir: TempDir,
    store: LocalStore,
}

impl Default for StoreFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("StoreFixture: failed to create temp dir");
        let store = LocalStore::new(temp_dir.path());
        Self { temp_dir, store }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// Save `changeset` and the given `(server path, content)` pairs.
    ///
    /// # Panics
    /// Panics if writing to the store fails.
    pub fn add(&self, changeset: &Changeset, contents: &[(&str, &str)]) -> &Self {
        self.store
            .save_changeset(changeset)
            .unwrap_or_else(|e| panic!("StoreFixture: failed to save changeset: {e}"));
        for (path, content) in contents {
            self.put(changeset.id, path, content);
        }
        self
    }

    /// # Panics
    /// Panics if writing to the store fails.
    pub fn put(&self, id: ChangesetId, source_path: &str, content: &str) {
        self.store
            .put_content(id, source_path, content.as_bytes())
            .unwrap_or_else(|e| panic!("StoreFixture: failed to write {source_path}: {e}"));
    }
}
