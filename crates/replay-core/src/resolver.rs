//! Source path to destination path resolution

use std::path::{Component, Path, PathBuf};

use replay_fs::{to_platform_separators, trim_leading_separators};

use crate::path_map::PathMap;

/// Resolves server item paths to destination filesystem paths.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    base_prefix: &'a str,
    path_map: &'a PathMap,
    destination_root: &'a Path,
}

impl<'a> PathResolver<'a> {
    pub fn new(base_prefix: &'a str, path_map: &'a PathMap, destination_root: &'a Path) -> Self {
        Self {
            base_prefix,
            path_map,
            destination_root,
        }
    }

    /// Server path with the base prefix removed, platform separators and no
    /// leading separator. Remap rules are not applied.
    ///
    /// The base prefix is removed wherever it occurs in the path, not only at
    /// the start.
    pub fn stripped(&self, source_path: &str) -> String {
        let without_base = if self.base_prefix.is_empty() {
            source_path.to_string()
        } else {
            source_path.replace(self.base_prefix, "")
        };
        let native = to_platform_separators(&without_base);
        trim_leading_separators(&native).to_string()
    }

    /// Path relative to the destination root, after remapping.
    ///
    /// A replacement that is empty or starts with a separator still yields a
    /// relative path.
    pub fn relative(&self, source_path: &str) -> String {
        let mapped = self.path_map.apply(&self.stripped(source_path));
        trim_leading_separators(&mapped).to_string()
    }

    /// Destination path for a server item, always under the destination
    /// root.
    ///
    /// Only plain name segments are joined; `.`, `..`, roots and drive
    /// prefixes are dropped.
    pub fn resolve(&self, source_path: &str) -> PathBuf {
        let relative = self.relative(source_path);
        let mut dest = self.destination_root.to_path_buf();
        for component in Path::new(&relative).components() {
            match component {
                Component::Normal(part) => dest.push(part),
                Component::CurDir => {}
                other => tracing::warn!(
                    path = %relative,
                    segment = ?other,
                    "dropped path segment that would leave the destination"
                ),
            }
        }
        dest
    }
}

/// One-shot form of [`PathResolver::resolve`].
pub fn resolve(
    source_path: &str,
    base_prefix: &str,
    path_map: &PathMap,
    destination_root: &Path,
) -> PathBuf {
    PathResolver::new(base_prefix, path_map, destination_root).resolve(source_path)
}
