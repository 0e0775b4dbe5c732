//! Filesystem helpers for changeset replay
//!
//! Platform path normalization, atomic I/O and format-agnostic config loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{relative_display, to_platform_separators, trim_leading_separators};
