//! Changeset replication engine
//!
//! Replays the file-level operations of one source changeset onto a
//! destination folder, optionally remapping folders, and stages the result
//! with the destination working copy so it can be checked in.
//!
//! # Architecture
//!
//! ```text
//!            ReplicationOrchestrator
//!                      |
//!     +----------------+-----------------+
//!     |                |                 |
//! PathResolver    classify()    DestinationActuator
//!                                   |         |
//!                          ChangesetSource  Registrar
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use replay_core::{
//!     ChangesetSource, Detached, LocalStore, PathMap, ReplicationOrchestrator, TracingLog,
//! };
//!
//! fn replay() -> replay_core::Result<()> {
//!     let store = LocalStore::new("/srv/changesets");
//!     let changeset = store.changeset(42)?;
//!     let mut log = TracingLog::new();
//!
//!     let result = ReplicationOrchestrator::new(&store, &mut log).run(
//!         &changeset,
//!         "$/Project",
//!         &PathMap::new(),
//!         Path::new("/work/dest"),
//!         &mut Detached,
//!     )?;
//!     println!("{} items changed", result.changed_paths.len());
//!     Ok(())
//! }
//! ```

pub mod actuator;
pub mod changeset;
pub mod checkin;
pub mod classify;
pub mod error;
pub mod flags;
pub mod log;
pub mod orchestrator;
pub mod path_map;
pub mod registrar;
pub mod resolver;
pub mod source;

pub use actuator::DestinationActuator;
pub use changeset::{Changeset, ChangesetId, ChangesetRecord, ItemKind};
pub use checkin::{CheckInPlan, checkin_comment, plan_check_in};
pub use classify::{ResolvedAction, classify};
pub use error::{Error, Result};
pub use flags::{ChangeFlag, ChangeFlags, UNHANDLED_REPORT_ORDER};
pub use log::{ChangeMark, LogLine, MemoryLog, ReplayLog, TracingLog};
pub use orchestrator::{ReplicationOrchestrator, ReplicationResult, unhandled_warning};
pub use path_map::{PathMap, PathMapping};
pub use registrar::{
    CheckedIn, Detached, LocalWorkspace, PendingChange, PendingKind, Registrar, WORKSPACE_DIR,
    WorkingCopy,
};
pub use resolver::{PathResolver, resolve};
pub use source::{ChangesetSource, LocalStore, MemorySource};
