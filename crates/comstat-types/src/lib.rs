//! Foundation types for ComStat.
//!
//! Shared by every crate in the workspace: the error enum with its `Result`
//! alias, and the runtime configuration loaded from `comstat.toml`.

pub mod config;
pub mod error;
