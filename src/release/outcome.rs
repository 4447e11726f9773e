//! Terminal state of one workflow run

use crate::core::error::{ExitCode, ReleaseError};
use crate::release::request::ReleaseTag;

#[derive(Debug)]
pub enum ReleaseOutcome {
  /// Published and tagged
  Released { tag: ReleaseTag },
  /// Dry run passed every check; `command` is what a real run would have used to tag
  Simulated { tag: ReleaseTag, command: String },
  FailedAtValidation(ReleaseError),
  FailedAtBuildMatrix(ReleaseError),
  FailedAtRelease(ReleaseError),
}

impl ReleaseOutcome {
  pub fn is_success(&self) -> bool {
    matches!(self, ReleaseOutcome::Released { .. } | ReleaseOutcome::Simulated { .. })
  }

  pub fn error(&self) -> Option<&ReleaseError> {
    match self {
      ReleaseOutcome::FailedAtValidation(err)
      | ReleaseOutcome::FailedAtBuildMatrix(err)
      | ReleaseOutcome::FailedAtRelease(err) => Some(err),
      _ => None,
    }
  }

  /// Phase the run stopped in, for display
  pub fn stage(&self) -> &'static str {
    match self {
      ReleaseOutcome::Released { .. } => "released",
      ReleaseOutcome::Simulated { .. } => "simulated",
      ReleaseOutcome::FailedAtValidation(_) => "validation",
      ReleaseOutcome::FailedAtBuildMatrix(_) => "build matrix",
      ReleaseOutcome::FailedAtRelease(_) => "release",
    }
  }

  pub fn exit_code(&self) -> ExitCode {
    self.error().map(ReleaseError::exit_code).unwrap_or(ExitCode::Success)
  }
}
