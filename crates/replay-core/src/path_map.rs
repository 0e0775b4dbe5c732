//! Folder remapping rules
//!
//! A path map file holds one `sourcePrefix,destinationPrefix` pair per line.
//! Blank lines and lines starting with `#` are ignored. Rules are tried in
//! file order and the first matching prefix wins.

use std::path::Path;

use replay_fs::{io, to_platform_separators};

use crate::{Error, Result};

/// One remapping rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMapping {
    pub prefix: String,
    pub replacement: String,
}

/// Ordered set of remapping rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMap {
    entries: Vec<PathMapping>,
}

impl PathMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    ///
    /// A prefix that is already mapped (ignoring case) could never match
    /// again, so the later rule is dropped.
    pub fn push(&mut self, prefix: impl Into<String>, replacement: impl Into<String>) {
        let prefix = prefix.into();
        if self
            .entries
            .iter()
            .any(|e| strip_prefix_ignore_case(&prefix, &e.prefix) == Some(""))
        {
            tracing::warn!(prefix = %prefix, "duplicate path map prefix ignored");
            return;
        }
        self.entries.push(PathMapping {
            prefix,
            replacement: replacement.into(),
        });
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, prefix: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.push(prefix, replacement);
        self
    }

    pub fn entries(&self) -> &[PathMapping] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse path map text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut map = Self::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (prefix, replacement) =
                line.split_once(',').ok_or_else(|| Error::PathMapParse {
                    line: idx + 1,
                    message: format!("expected `source,destination`, got `{}`", line),
                })?;

            let prefix = prefix.trim();
            if prefix.is_empty() {
                return Err(Error::PathMapParse {
                    line: idx + 1,
                    message: "source prefix is empty".into(),
                });
            }

            map.push(prefix, replacement.trim());
        }

        tracing::debug!(rules = map.len(), "parsed path map");
        Ok(map)
    }

    /// Read and parse a path map file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = io::read_text(path)?;
        Self::parse(&text)
    }

    /// Rewrite `path` with the first rule whose prefix matches its start.
    ///
    /// `path` is expected to use platform separators already; rule prefixes
    /// and replacements are normalized the same way before comparison.
    pub fn apply(&self, path: &str) -> String {
        for entry in &self.entries {
            let prefix = to_platform_separators(&entry.prefix);
            if let Some(rest) = strip_prefix_ignore_case(path, &prefix) {
                tracing::trace!(prefix = %entry.prefix, "path map rule matched");
                return format!("{}{}", to_platform_separators(&entry.replacement), rest);
            }
        }
        path.to_string()
    }
}

/// Case-insensitive `str::strip_prefix`.
fn strip_prefix_ignore_case<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = path.char_indices();
    for p in prefix.chars() {
        let (_, c) = rest.next()?;
        if !c.to_lowercase().eq(p.to_lowercase()) {
            return None;
        }
    }
    let offset = rest.next().map_or(path.len(), |(i, _)| i);
    Some(&path[offset..])
}
