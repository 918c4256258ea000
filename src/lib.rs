//! Shared library for `gradebook`
//! Contains the record store, persistence, reporting, configuration and logging
//! used by the CLI.

pub mod config;
pub mod core;
pub mod logger;

/// Returns the current version of the `gradebook` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
