//! Command implementations for replay-cli

pub mod replay;
pub mod workspace;

pub use replay::run_replay;
pub use workspace::{run_init, run_pending};
