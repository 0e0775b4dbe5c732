//! Changeset replay CLI
//!
//! Replays one changeset from a changeset store onto a destination folder.

mod cli;
mod commands;
mod config;
mod console;
mod error;
mod interactive;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let builder = FmtSubscriber::builder()
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if verbose {
        tracing::subscriber::set_global_default(builder.with_max_level(Level::DEBUG).finish())
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing::subscriber::set_global_default(builder.with_env_filter(filter).finish())
    };
    result.expect("Failed to set tracing subscriber");
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    let cwd = std::env::current_dir()?;
    match cli.command {
        Some(cmd) => execute_command(&cwd, cmd),
        None => commands::run_replay(&cwd, cli.replay),
    }
}

fn execute_command(cwd: &std::path::Path, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Init { path } => commands::run_init(&path),
        Commands::Pending { path } => commands::run_pending(cwd, &path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replay_core::LocalWorkspace;
    use tempfile::TempDir;

    #[test]
    fn test_init_then_pending() {
        let temp = TempDir::new().unwrap();

        commands::run_init(temp.path()).unwrap();
        assert!(LocalWorkspace::exists_at(temp.path()));

        let result = commands::run_pending(temp.path(), temp.path());
        assert!(result.is_ok());
    }

    #[test]
    fn test_pending_outside_working_copy_fails() {
        let temp = TempDir::new().unwrap();
        let result = commands::run_pending(temp.path(), temp.path());
        assert!(matches!(
            result,
            Err(error::CliError::Core(replay_core::Error::NotAWorkspace { .. }))
        ));
    }

    #[test]
    fn test_missing_destination_is_user_error() {
        let temp = TempDir::new().unwrap();
        let result = commands::replay::resolve_destination(&temp.path().join("nope"));
        assert!(matches!(result, Err(error::CliError::User { .. })));
    }

    #[test]
    fn test_cli_error_user() {
        let error = error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }
}
