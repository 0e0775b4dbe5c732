//! Working copy commands: init and pending

use std::path::Path;

use colored::Colorize;

use replay_core::LocalWorkspace;
use replay_fs::{io, relative_display};

use crate::error::Result;

/// Create a replay working copy at `path`.
pub fn run_init(path: &Path) -> Result<()> {
    io::ensure_dir(path)?;
    let root = io::canonical_dir(path)?;
    let workspace = LocalWorkspace::init(&root)?;

    println!(
        "{} Working copy ready at {}",
        "OK".green().bold(),
        workspace.root().display()
    );
    Ok(())
}

/// List the pending changes of the working copy at `path`.
pub fn run_pending(cwd: &Path, path: &Path) -> Result<()> {
    let root = io::canonical_dir(path)?;
    let workspace = LocalWorkspace::open(&root)?;

    if workspace.pending().is_empty() {
        println!("{} No pending changes.", "OK".green().bold());
    } else {
        for change in workspace.pending() {
            println!(
                "{}: {}",
                change.kind,
                relative_display(cwd, &change.local_path)
            );
        }
    }

    if let Some(last) = workspace.history().last() {
        println!();
        println!("Last check-in: changeset {} ({})", last.id, last.timestamp.dimmed());
    }
    Ok(())
}
