//! System git backend - zero dependencies
//!
//! Every operation is a blocking `git` subprocess whose exit status is checked before
//! the caller continues.

use crate::core::error::{GitError, ReleaseError, ReleaseResult, ResultExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Environment variables git may need to reach a remote. Everything else is dropped.
const PASSTHROUGH_ENV: &[&str] = &["PATH", "HOME", "SSH_AUTH_SOCK", "GIT_SSH_COMMAND", "GIT_ASKPASS"];

/// Git backend using system git (zero crate dependencies)
#[derive(Debug, Clone)]
pub struct SystemGit {
  /// Repository working directory
  pub(crate) repo_path: PathBuf,

  /// Working tree root
  pub(crate) work_tree: PathBuf,

  /// Remote that release tags are pushed to
  pub(crate) remote: String,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to get the repository metadata.
  pub fn open(path: &Path) -> ReleaseResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(ReleaseError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(ReleaseError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree: PathBuf::from(work_tree),
      remote: "origin".to_string(),
    })
  }

  /// Push tags to `remote` instead of origin
  pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
    self.remote = remote.into();
    self
  }

  /// Working tree root
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Create a git command with isolated environment, for read-only queries
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables except those needed for auth
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    for key in PASSTHROUGH_ENV {
      if let Ok(value) = std::env::var(key) {
        cmd.env(key, value);
      }
    }

    cmd.arg("-c").arg("core.quotePath=false");

    cmd
  }

  /// Git command with the operator's full environment
  ///
  /// Used for tag writes and the push, which must resolve remotes, credentials and
  /// env-supplied config (`GIT_CONFIG_*`, `XDG_CONFIG_HOME`) exactly like the
  /// operator's own `git push`.
  pub(crate) fn git_cmd_inherited(&self) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(&self.repo_path);
    cmd.arg("-c").arg("core.quotePath=false");
    cmd
  }

  /// Run a read-only git query in the isolated environment
  pub(crate) fn run(&self, args: &[&str]) -> ReleaseResult<String> {
    Self::exec(self.git_cmd(), args)
  }

  /// Run a git command in the inherited environment
  pub(crate) fn run_inherited(&self, args: &[&str]) -> ReleaseResult<String> {
    Self::exec(self.git_cmd_inherited(), args)
  }

  /// Return stdout, mapping non-zero exit to `GitError`
  fn exec(mut cmd: Command, args: &[&str]) -> ReleaseResult<String> {
    let rendered = format!("git {}", args.join(" "));
    tracing::debug!(command = %rendered, "running");

    let output = cmd
      .args(args)
      .output()
      .with_context(|| format!("Failed to execute {}", rendered))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::Git(GitError::CommandFailed {
        command: rendered,
        stderr: stderr.trim().to_string(),
      }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
  }
}
