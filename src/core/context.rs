//! Release context - build once in main, pass everywhere
//!
//! Resolves the repository root from the working directory and loads the optional
//! configuration. Package directories and tags are resolved against this root, so
//! `release` behaves the same from any subdirectory of the checkout.

use crate::core::config::GateConfig;
use crate::core::error::ReleaseResult;
use crate::core::vcs::SystemGit;
use std::path::{Path, PathBuf};

/// Shared data for one invocation.
#[derive(Debug, Clone)]
pub struct ReleaseContext {
  /// Repository root (absolute path)
  pub root: PathBuf,

  /// Configuration (defaults when no config file exists)
  pub config: GateConfig,
}

impl ReleaseContext {
  /// Build the context from any directory inside the repository.
  pub fn build(cwd: &Path) -> ReleaseResult<Self> {
    let git = SystemGit::open(cwd)?;
    let root = git.work_tree().to_path_buf();
    let config = GateConfig::load(&root)?;

    Ok(Self { root, config })
  }

  /// Open git at the repository root with the configured remote
  pub fn git(&self) -> ReleaseResult<SystemGit> {
    Ok(SystemGit::open(&self.root)?.with_remote(&self.config.git.remote))
  }

  /// Get repository root as Path reference (convenience)
  pub fn repo_root(&self) -> &Path {
    &self.root
  }
}
