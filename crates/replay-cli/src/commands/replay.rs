//! The replay command: copy one changeset into a destination folder and
//! optionally check it in.

use std::path::{Path, PathBuf};

use colored::Colorize;

use replay_core::{
    ChangesetSource, Detached, LocalStore, LocalWorkspace, PathMap, Registrar,
    ReplicationOrchestrator, ReplicationResult, ReplayLog, WorkingCopy, plan_check_in,
};
use replay_fs::{io, relative_display};

use crate::cli::ReplayArgs;
use crate::config::Settings;
use crate::console::ConsoleLog;
use crate::error::{CliError, Result};
use crate::interactive;

/// Find the destination folder: as given, else next to the executable.
pub fn resolve_destination(given: &Path) -> Result<PathBuf> {
    if given.is_dir() {
        return Ok(io::canonical_dir(given)?);
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(given)));
    if let Some(candidate) = beside_exe.filter(|p| p.is_dir()) {
        tracing::debug!(path = %candidate.display(), "destination found next to executable");
        return Ok(io::canonical_dir(&candidate)?);
    }

    Err(CliError::user(format!(
        "Folder {} does not exist",
        given.display()
    )))
}

/// Run a replay.
///
/// Logged paths are shown relative to `cwd`.
pub fn run_replay(cwd: &Path, args: ReplayArgs) -> Result<()> {
    let given = args
        .destination
        .clone()
        .ok_or_else(|| CliError::user("A destination folder is required (--destination)"))?;
    let destination = resolve_destination(&given)?;
    let settings = Settings::resolve(args, destination)?;

    let path_map = match &settings.map_file {
        Some(path) => PathMap::load(path)?,
        None => PathMap::new(),
    };

    let store = LocalStore::from_location(&settings.store);
    let changeset = store.changeset(settings.changeset)?;

    let mut workspace = if LocalWorkspace::exists_at(&settings.destination) {
        Some(LocalWorkspace::open(&settings.destination)?)
    } else {
        tracing::debug!("destination is not a working copy, replaying detached");
        None
    };

    let mut console = ConsoleLog::new();
    let result = {
        let mut detached = Detached;
        let registrar: &mut dyn Registrar = match workspace.as_mut() {
            Some(ws) => ws,
            None => &mut detached,
        };
        ReplicationOrchestrator::new(&store, &mut console)
            .with_display_base(cwd)
            .run(
                &changeset,
                &settings.base_path,
                &path_map,
                &settings.destination,
                registrar,
            )?
    };

    println!();
    println!();

    if !settings.checkin {
        print_summary(&result);
        return Ok(());
    }

    let Some(workspace) = workspace.as_mut() else {
        return Err(CliError::user(format!(
            "Cannot check in: {} is not a replay working copy (run {})",
            settings.destination.display(),
            "replay init".cyan()
        )));
    };

    check_in(cwd, workspace, &changeset, &result, &settings, &console)
}

fn print_summary(result: &ReplicationResult) {
    if result.changed_paths.is_empty() {
        println!("{} Nothing to replay.", "OK".green().bold());
    } else {
        println!(
            "{} Replayed {} item(s).",
            "OK".green().bold(),
            result.changed_paths.len()
        );
    }
    if result.had_unhandled {
        println!(
            "{} Some changes could not be replayed, see above.",
            "WARN".yellow().bold()
        );
    }
}

fn check_in(
    cwd: &Path,
    workspace: &mut LocalWorkspace,
    changeset: &replay_core::Changeset,
    result: &ReplicationResult,
    settings: &Settings,
    console: &ConsoleLog,
) -> Result<()> {
    let plan = plan_check_in(&*workspace, changeset, result)?;

    if !settings.no_prompt {
        println!("About to commit:");
        for change in &plan.changes {
            println!(
                "{}: {}",
                change.kind,
                relative_display(cwd, &change.local_path)
            );
        }
        println!();
        println!("As:");
        println!("{}", plan.comment);
        println!();

        if console.had_errors() {
            println!(
                "{} Errors were reported during replay.",
                "WARN".yellow().bold()
            );
        }

        if !interactive::confirm_check_in()? {
            println!("Check-in cancelled. Pending changes are kept.");
            return Ok(());
        }
    }

    let id = workspace.check_in(&plan.changes, &plan.comment)?;
    println!();
    println!("Checked in, changeset {}", id);
    Ok(())
}
