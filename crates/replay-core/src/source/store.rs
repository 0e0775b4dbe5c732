//! Directory-backed changeset store
//!
//! Layout:
//!
//! ```text
//! <root>/changesets/<id>.toml        changeset manifest (or <id>.json)
//! <root>/content/<id>/<server path>  item bytes as of that changeset
//! ```
//!
//! The server path is used without its `$/` root, so the content of
//! `$/Proj/src/a.txt` in changeset 7 lives at `content/7/Proj/src/a.txt`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use replay_fs::{ConfigStore, io};

use super::ChangesetSource;
use crate::changeset::{Changeset, ChangesetId, ChangesetRecord, ItemKind};
use crate::flags::{ChangeFlag, ChangeFlags};
use crate::{Error, Result};

const CHANGESETS_DIR: &str = "changesets";
const CONTENT_DIR: &str = "content";
const MANIFEST_EXTENSIONS: [&str; 2] = ["toml", "json"];

#[derive(Debug, Serialize, Deserialize)]
struct StoredChangeset {
    id: ChangesetId,
    committer: String,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    changes: Vec<StoredChange>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredChange {
    path: String,
    #[serde(default)]
    kind: ItemKind,
    flags: Vec<String>,
}

impl StoredChangeset {
    fn into_changeset(self) -> Result<Changeset> {
        let records = self
            .changes
            .into_iter()
            .map(|change| {
                let flags = change
                    .flags
                    .iter()
                    .map(|name| name.parse::<ChangeFlag>())
                    .collect::<Result<ChangeFlags>>()?;
                Ok(ChangesetRecord::new(change.path, change.kind, flags))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Changeset {
            id: self.id,
            committer: self.committer,
            comment: self.comment,
            records,
        })
    }

    fn from_changeset(changeset: &Changeset) -> Self {
        Self {
            id: changeset.id,
            committer: changeset.committer.clone(),
            comment: changeset.comment.clone(),
            changes: changeset
                .records
                .iter()
                .map(|r| StoredChange {
                    path: r.source_path.clone(),
                    kind: r.item_kind,
                    flags: r.flags.iter().map(|f| f.name().to_string()).collect(),
                })
                .collect(),
        }
    }
}

/// Changeset store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
    config: ConfigStore,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: ConfigStore::new(),
        }
    }

    /// Open a store from a `--server` style location: a plain path or a
    /// `file://` URL.
    pub fn from_location(location: &str) -> Self {
        let path = location.strip_prefix("file://").unwrap_or(location);
        Self::new(path)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn manifest_path(&self, id: ChangesetId) -> Option<PathBuf> {
        MANIFEST_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(CHANGESETS_DIR).join(format!("{id}.{ext}")))
            .find(|p| p.is_file())
    }

    /// Where the content of `source_path` in changeset `id` is kept.
    pub fn content_path(&self, id: ChangesetId, source_path: &str) -> PathBuf {
        let mut path = self.root.join(CONTENT_DIR).join(id.to_string());
        let server_relative = source_path.strip_prefix('$').unwrap_or(source_path);
        for segment in server_relative.split(['/', '\\']) {
            if segment.is_empty() || segment == "." || segment == ".." {
                continue;
            }
            path.push(segment);
        }
        path
    }

    /// Write a changeset manifest as TOML.
    pub fn save_changeset(&self, changeset: &Changeset) -> Result<()> {
        let path = self
            .root
            .join(CHANGESETS_DIR)
            .join(format!("{}.toml", changeset.id));
        self.config
            .save(&path, &StoredChangeset::from_changeset(changeset))?;
        Ok(())
    }

    /// Store the content of an item for a changeset.
    pub fn put_content(&self, id: ChangesetId, source_path: &str, content: &[u8]) -> Result<()> {
        io::write_atomic(&self.content_path(id, source_path), content)?;
        Ok(())
    }
}

impl ChangesetSource for LocalStore {
    fn changeset(&self, id: ChangesetId) -> Result<Changeset> {
        let path = self
            .manifest_path(id)
            .ok_or(Error::ChangesetNotFound { id })?;
        tracing::debug!(path = %path.display(), "loading changeset manifest");

        let stored: StoredChangeset = self.config.load(&path)?;
        stored.into_changeset()
    }

    fn download(&self, changeset: &Changeset, record: &ChangesetRecord) -> Result<Vec<u8>> {
        let path = self.content_path(changeset.id, &record.source_path);
        if !path.is_file() {
            return Err(Error::ContentNotFound {
                changeset: changeset.id,
                path: record.source_path.clone(),
            });
        }
        Ok(io::read_bytes(&path)?)
    }
}
