//! Error types for release-gate with contextual messages and exit codes
//!
//! Every failure the workflow can stop on has its own variant so the operator sees
//! which check failed and why. All errors are terminal: nothing is retried and nothing
//! is rolled back.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for release-gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Everything passed (release or simulated release)
  Success = 0,
  /// System error (git, cargo, I/O)
  System = 1,
  /// Invalid arguments or configuration (matches clap's usage exit code)
  Usage = 2,
  /// A pre-release check failed
  Validation = 3,
  /// The package does not build under some feature combination
  BuildMatrix = 4,
  /// Packaging, publishing or tagging failed
  Release = 5,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for release-gate
#[derive(Debug)]
pub enum ReleaseError {
  /// Pre-release checks
  Validation(ValidationError),

  /// Feature powerset check
  BuildMatrix(BuildMatrixError),

  /// Package, publish or tag step
  Step(ReleaseStepError),

  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Bad command line input
  Usage(String),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io(e) => ReleaseError::Message {
        message: format!("{}: {}", ctx_str, e),
        context: None,
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Validation(_) => ExitCode::Validation,
      ReleaseError::BuildMatrix(_) => ExitCode::BuildMatrix,
      ReleaseError::Step(_) => ExitCode::Release,
      ReleaseError::Config(_) => ExitCode::Usage,
      ReleaseError::Usage(_) => ExitCode::Usage,
      ReleaseError::Git(_) => ExitCode::System,
      ReleaseError::Io(_) => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::System,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Validation(e) => e.help_message(),
      ReleaseError::BuildMatrix(e) => e.help_message(),
      ReleaseError::Step(e) => e.help_message(),
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Git(e) => e.help_message(),
      ReleaseError::Usage(_) => Some("Run `release --help` for usage.".to_string()),
      ReleaseError::Message { help, .. } => help.clone(),
      ReleaseError::Io(_) => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Validation(e) => write!(f, "{}", e),
      ReleaseError::BuildMatrix(e) => write!(f, "{}", e),
      ReleaseError::Step(e) => write!(f, "{}", e),
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Git(e) => write!(f, "{}", e),
      ReleaseError::Usage(msg) => write!(f, "Usage error: {}", msg),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<ValidationError> for ReleaseError {
  fn from(err: ValidationError) -> Self {
    ReleaseError::Validation(err)
  }
}

impl From<BuildMatrixError> for ReleaseError {
  fn from(err: BuildMatrixError) -> Self {
    ReleaseError::BuildMatrix(err)
  }
}

impl From<ReleaseStepError> for ReleaseError {
  fn from(err: ReleaseStepError) -> Self {
    ReleaseError::Step(err)
  }
}

impl From<ConfigError> for ReleaseError {
  fn from(err: ConfigError) -> Self {
    ReleaseError::Config(err)
  }
}

impl From<GitError> for ReleaseError {
  fn from(err: GitError) -> Self {
    ReleaseError::Git(err)
  }
}

impl From<cargo_metadata::Error> for ReleaseError {
  fn from(err: cargo_metadata::Error) -> Self {
    ReleaseError::message(format!("Cargo metadata error: {}", err))
  }
}

/// Why the cargo-hack requirement could not be met
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingToolingReason {
  /// Operator answered no to the install prompt
  Declined,
  /// Operator answered something that is neither yes nor no
  InvalidResponse(String),
  /// `cargo install` ran and exited non-zero
  InstallFailed { exit_code: i32 },
}

/// Pre-release check failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
  /// No directory for the package under the repository root
  NoSuchPackage { name: String, path: PathBuf },

  /// Declared version differs from the requested one
  VersionMismatch {
    package: String,
    expected: String,
    actual: String,
  },

  /// The build-matrix tool is missing and was not installed
  MissingTooling { tool: String, reason: MissingToolingReason },

  /// The release tag is already taken
  TagAlreadyExists { tag: String },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::NoSuchPackage { .. } => {
        Some("Run from the repository root and pass the package directory name.".to_string())
      }
      ValidationError::VersionMismatch { expected, .. } => Some(format!(
        "Bump `version` in the package's Cargo.toml to {} and commit before releasing.",
        expected
      )),
      ValidationError::MissingTooling { tool, reason } => match reason {
        MissingToolingReason::InstallFailed { .. } => Some(format!("Try installing it manually: cargo install {}", tool)),
        _ => Some(format!("Install it with `cargo install {}` and run again.", tool)),
      },
      ValidationError::TagAlreadyExists { .. } => {
        Some("This version was already released. Bump the version to release again.".to_string())
      }
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::NoSuchPackage { name, path } => {
        write!(f, "No such package: '{}' (expected a directory at {})", name, path.display())
      }
      ValidationError::VersionMismatch {
        package,
        expected,
        actual,
      } => write!(
        f,
        "Version mismatch: expected to release {} v{}, but Cargo.toml contains {}",
        package, expected, actual
      ),
      ValidationError::MissingTooling { tool, reason } => match reason {
        MissingToolingReason::Declined => write!(f, "Missing tooling: {} is required and installation was declined", tool),
        MissingToolingReason::InvalidResponse(answer) => write!(
          f,
          "Missing tooling: {} is required (invalid response to install prompt: '{}')",
          tool, answer
        ),
        MissingToolingReason::InstallFailed { exit_code } => write!(
          f,
          "Missing tooling: installing {} failed (cargo install exited with {})",
          tool, exit_code
        ),
      },
      ValidationError::TagAlreadyExists { tag } => write!(f, "Git tag `{}` already exists", tag),
    }
  }
}

/// The feature powerset check exited non-zero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildMatrixError {
  pub package: String,
  pub exit_code: i32,
}

impl BuildMatrixError {
  fn help_message(&self) -> Option<String> {
    Some("Re-run with --verbose to see which feature combination failed.".to_string())
  }
}

impl fmt::Display for BuildMatrixError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} did not build with all feature combinations (cargo hack exited with {})",
      self.package, self.exit_code
    )
  }
}

/// Package, publish and tag failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseStepError {
  /// `cargo package` failed
  Packaging { package: String, exit_code: i32 },

  /// `cargo publish` (or its dry run) failed
  Publish {
    package: String,
    exit_code: i32,
    dry_run: bool,
  },

  /// Creating or pushing the tag failed. Only reachable after a real publish, so the
  /// registry already has this version.
  Tagging { tag: String, reason: String },
}

impl ReleaseStepError {
  fn help_message(&self) -> Option<String> {
    match self {
      ReleaseStepError::Packaging { .. } => {
        Some("Packaging is deterministic for a given source tree; fix the reported problem and run again.".to_string())
      }
      ReleaseStepError::Publish { dry_run: true, .. } => {
        Some("The registry would reject this upload. Nothing was published.".to_string())
      }
      ReleaseStepError::Publish { .. } => Some("Check the registry to verify what was published.".to_string()),
      ReleaseStepError::Tagging { tag, .. } => Some(format!(
        "The crate is published but untagged. Create and push the tag by hand: git tag {} && git push <remote> --tags",
        tag
      )),
    }
  }
}

impl fmt::Display for ReleaseStepError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseStepError::Packaging { package, exit_code } => {
        write!(f, "Packaging {} failed (cargo package exited with {})", package, exit_code)
      }
      ReleaseStepError::Publish {
        package,
        exit_code,
        dry_run,
      } => {
        let mode = if *dry_run { "cargo publish --dry-run" } else { "cargo publish" };
        write!(f, "Publishing {} failed ({} exited with {})", package, mode, exit_code)
      }
      ReleaseStepError::Tagging { tag, reason } => {
        write!(f, "Published but untagged: tagging `{}` failed: {}", tag, reason)
      }
    }
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Not valid TOML, or a field has the wrong type
  Parse { path: PathBuf, reason: String },

  /// `[git] remote` is empty
  EmptyRemote { path: PathBuf },

  /// A `[matrix.<package>]` table cannot be turned into a plan
  Matrix {
    path: PathBuf,
    package: String,
    reason: String,
  },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Parse { .. } => Some("Fix the TOML syntax, or delete the file to use the defaults.".to_string()),
      ConfigError::EmptyRemote { .. } => {
        Some("Name a configured git remote, or remove the key to push to `origin`.".to_string())
      }
      ConfigError::Matrix { .. } => Some(
        "Each [matrix.<package>] table takes either a non-empty `include` or a non-empty `exclude`, not both."
          .to_string(),
      ),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Parse { path, reason } => {
        write!(f, "Invalid configuration in {}: {}", path.display(), reason)
      }
      ConfigError::EmptyRemote { path } => {
        write!(f, "Invalid configuration in {}: [git] remote must not be empty", path.display())
      }
      ConfigError::Matrix { path, package, reason } => {
        write!(f, "Invalid configuration in {}: [matrix.{}]: {}", path.display(), package, reason)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "Run release from inside the repository checkout (looked in {})",
        path.display()
      )),
      GitError::CommandFailed { stderr, .. } => {
        if stderr.contains("permission denied") || stderr.contains("403") {
          Some("Check that you can push to the remote.".to_string())
        } else {
          None
        }
      }
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
    }
  }
}

/// Result type alias for release-gate
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
