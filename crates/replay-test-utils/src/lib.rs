//! Shared test utilities for the changeset-replay workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`registrar`]: [`RecordingRegistrar`](registrar::RecordingRegistrar), a
//!   registrar that remembers every call
//! - [`scenario`]: canned changesets and a [`StoreFixture`](scenario::StoreFixture)
//!   for directory-backed stores

pub mod registrar;
pub mod scenario;
