//! Replay settings resolution
//!
//! Settings come from, in order of precedence: command-line flags (and their
//! `REPLAY_*` environment variables), the config file, built-in defaults.
//!
//! ```toml
//! [source]
//! store = "/srv/changesets"
//!
//! [replay]
//! base_path = "$/Project"
//! map_file = "paths.map"      # relative to this file
//!
//! [checkin]
//! enabled = false
//! no_prompt = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use replay_core::{ChangesetId, WORKSPACE_DIR};
use replay_fs::ConfigStore;

use crate::cli::ReplayArgs;
use crate::error::{CliError, Result};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    source: SourceSection,
    replay: ReplaySection,
    checkin: CheckinSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SourceSection {
    store: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReplaySection {
    base_path: Option<String>,
    map_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CheckinSection {
    enabled: Option<bool>,
    no_prompt: Option<bool>,
}

/// Fully resolved settings for one replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub changeset: ChangesetId,
    pub store: String,
    pub destination: PathBuf,
    pub base_path: String,
    pub map_file: Option<PathBuf>,
    pub checkin: bool,
    pub no_prompt: bool,
}

/// Default config file location for a destination folder.
pub fn default_config_path(destination: &Path) -> PathBuf {
    destination.join(WORKSPACE_DIR).join(CONFIG_FILE)
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let mut config: FileConfig = ConfigStore::new().load(path)?;

    // Map files named in the config are relative to the config file
    if let (Some(map), Some(dir)) = (config.replay.map_file.as_mut(), path.parent()) {
        if map.is_relative() {
            *map = dir.join(&*map);
        }
    }
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

impl Settings {
    /// Merge `args` over the config file for an already resolved
    /// `destination`.
    pub fn resolve(args: ReplayArgs, destination: PathBuf) -> Result<Self> {
        let config = match &args.config {
            Some(path) => load_file_config(path)?,
            None => {
                let path = default_config_path(&destination);
                if path.is_file() {
                    load_file_config(&path)?
                } else {
                    FileConfig::default()
                }
            }
        };

        let changeset = args
            .changeset
            .ok_or_else(|| CliError::user("A changeset id is required (--changeset)"))?;

        let store = args.server.or(config.source.store).ok_or_else(|| {
            CliError::user("No changeset store given: pass --server or set [source] store")
        })?;

        Ok(Self {
            changeset,
            store,
            destination,
            base_path: args
                .base_path
                .or(config.replay.base_path)
                .unwrap_or_default(),
            map_file: args.map.or(config.replay.map_file),
            checkin: args.checkin || config.checkin.enabled.unwrap_or(false),
            no_prompt: args.no_prompt || config.checkin.no_prompt.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args() -> ReplayArgs {
        ReplayArgs {
            changeset: Some(5),
            ..Default::default()
        }
    }

    #[test]
    fn flags_alone() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::resolve(
            ReplayArgs {
                server: Some("/store".into()),
                ..args()
            },
            temp.path().to_path_buf(),
        )
        .unwrap();

        assert_eq!(settings.store, "/store");
        assert_eq!(settings.base_path, "");
        assert_eq!(settings.map_file, None);
        assert!(!settings.checkin);
    }

    #[test]
    fn config_file_in_destination_fills_gaps() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(WORKSPACE_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(CONFIG_FILE),
            "[source]\nstore = \"/cfg-store\"\n\n[replay]\nbase_path = \"$/Cfg\"\nmap_file = \"paths.map\"\n\n[checkin]\nenabled = true\n",
        )
        .unwrap();

        let settings = Settings::resolve(args(), temp.path().to_path_buf()).unwrap();

        assert_eq!(settings.store, "/cfg-store");
        assert_eq!(settings.base_path, "$/Cfg");
        assert_eq!(settings.map_file, Some(dir.join("paths.map")));
        assert!(settings.checkin);
        assert!(!settings.no_prompt);
    }

    #[test]
    fn flags_override_config() {
        let temp = TempDir::new().unwrap();
        let cfg = temp.path().join("replay.toml");
        fs::write(&cfg, "[source]\nstore = \"/cfg\"\n[replay]\nbase_path = \"$/Cfg\"\n").unwrap();

        let settings = Settings::resolve(
            ReplayArgs {
                server: Some("/flag".into()),
                base_path: Some("$/Flag".into()),
                config: Some(cfg),
                ..args()
            },
            temp.path().to_path_buf(),
        )
        .unwrap();

        assert_eq!(settings.store, "/flag");
        assert_eq!(settings.base_path, "$/Flag");
    }

    #[test]
    fn missing_store_is_user_error() {
        let temp = TempDir::new().unwrap();
        let result = Settings::resolve(args(), temp.path().to_path_buf());
        assert!(matches!(result, Err(CliError::User { .. })));
    }

    #[test]
    fn malformed_config_is_reported() {
        let temp = TempDir::new().unwrap();
        let cfg = temp.path().join("bad.toml");
        fs::write(&cfg, "[source\n").unwrap();

        let result = Settings::resolve(
            ReplayArgs {
                config: Some(cfg),
                ..args()
            },
            temp.path().to_path_buf(),
        );
        assert!(matches!(result, Err(CliError::Fs(_))));
    }
}
