//! Collaborator seams for the release workflow
//!
//! The workflow never spawns a process itself. Everything with a side effect goes
//! through one of these traits: `Cargo` and `SystemGit` are the real implementations,
//! tests substitute spies.

use crate::core::error::ReleaseResult;
use crate::release::matrix::MatrixPlan;
use std::path::Path;

/// Cargo subcommand that runs the feature powerset check
pub const MATRIX_TOOL: &str = "cargo-hack";

/// Package-manager operations. Commands report their exit code; `Err` is reserved for
/// failing to run the command at all.
pub trait Toolchain {
  /// Version declared in the package's build metadata
  fn declared_version(&self, package_dir: &Path) -> ReleaseResult<String>;

  /// Whether the build-matrix tool is installed
  fn has_matrix_tool(&self) -> ReleaseResult<bool>;

  /// Install the build-matrix tool
  fn install_matrix_tool(&self) -> ReleaseResult<i32>;

  /// Check every feature combination selected by `plan`
  fn check_feature_matrix(&self, package_dir: &Path, plan: &MatrixPlan, verbose: bool) -> ReleaseResult<i32>;

  /// Build the distributable archive
  fn package(&self, package_dir: &Path, verbose: bool) -> ReleaseResult<i32>;

  /// Upload to the registry, or run every registry-side check without uploading
  fn publish(&self, package_dir: &Path, verbose: bool, dry_run: bool) -> ReleaseResult<i32>;
}

/// Version-control tag operations
pub trait TagStore {
  /// Exact, full-name lookup
  fn tag_exists(&self, name: &str) -> ReleaseResult<bool>;

  fn create_tag(&self, name: &str) -> ReleaseResult<()>;

  fn push_tags(&self) -> ReleaseResult<()>;

  /// Shell command equivalent to `create_tag` followed by `push_tags`
  fn tag_command(&self, name: &str) -> String;
}

/// Operator's answer to "install the missing tool?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallAnswer {
  Yes,
  No,
  Invalid(String),
}

impl InstallAnswer {
  /// Parse a `[Y/n]` answer. Empty input takes the default (yes).
  pub fn parse(input: &str) -> Self {
    match input.trim().to_lowercase().as_str() {
      "" | "y" | "yes" => InstallAnswer::Yes,
      "n" | "no" => InstallAnswer::No,
      _ => InstallAnswer::Invalid(input.trim().to_string()),
    }
  }
}

/// Asks the operator before installing anything
pub trait InstallPrompt {
  fn confirm_install(&self, tool: &str) -> ReleaseResult<InstallAnswer>;
}
