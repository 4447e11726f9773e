//! Core building blocks shared by every command
//!
//! - **config**: release-gate.toml parsing and validation
//! - **context**: Repository root and config, built once per invocation
//! - **error**: Error taxonomy with exit codes and contextual help messages
//! - **vcs**: Git operations (SystemGit)

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
