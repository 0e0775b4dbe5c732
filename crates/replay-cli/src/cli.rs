//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Replay a changeset onto a destination folder and optionally check it in
#[derive(Parser, Debug)]
#[command(name = "replay")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub replay: ReplayArgs,

    /// Working copy maintenance
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options for replaying a changeset
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayArgs {
    /// Changeset ID to replay
    #[arg(short = 'c', long = "changeset", required = true)]
    pub changeset: Option<u32>,

    /// Changeset store (directory or file:// URL)
    #[arg(short = 's', long = "server", env = "REPLAY_SERVER")]
    pub server: Option<String>,

    /// Destination folder
    #[arg(short = 'd', long = "destination", required = true)]
    pub destination: Option<PathBuf>,

    /// Server path removed from every item path, e.g. `$/Project`
    #[arg(short = 'b', long = "base-path", env = "REPLAY_BASE_PATH")]
    pub base_path: Option<String>,

    /// Path map file with `source,destination` folder rules
    #[arg(short = 'm', long = "map", env = "REPLAY_MAP")]
    pub map: Option<PathBuf>,

    /// Check in the replayed items
    #[arg(long)]
    pub checkin: bool,

    /// Do not prompt before checking in
    #[arg(long = "noprompt")]
    pub no_prompt: bool,

    /// Configuration file (defaults to <destination>/.replay/config.toml)
    #[arg(long, env = "REPLAY_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Turn a folder into a replay working copy that tracks pending changes
    Init {
        /// Folder to initialize
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// List pending changes of a working copy
    Pending {
        /// Working copy folder
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_full_replay() {
        let cli = Cli::try_parse_from([
            "replay", "-c", "42", "-s", "/store", "-d", "out", "-b", "$/Proj", "-m", "map.txt",
            "--checkin", "--noprompt",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.replay.changeset, Some(42));
        assert_eq!(cli.replay.destination, Some(PathBuf::from("out")));
        assert_eq!(cli.replay.base_path.as_deref(), Some("$/Proj"));
        assert!(cli.replay.checkin);
        assert!(cli.replay.no_prompt);
    }

    #[test]
    fn changeset_is_required_without_subcommand() {
        assert!(Cli::try_parse_from(["replay", "-d", "out"]).is_err());
    }

    #[test]
    fn subcommand_needs_no_replay_flags() {
        let cli = Cli::try_parse_from(["replay", "init", "dest"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Init {
                path: PathBuf::from("dest")
            })
        );
    }
}
