//! validate → build matrix → package/publish → tag
//!
//! Each phase consumes the token produced by the one before it, so a phase cannot be
//! reached without its predecessors succeeding. The first failure ends the run.

use crate::release::backend::{InstallPrompt, TagStore, Toolchain};
use crate::release::executor::Executor;
use crate::release::matrix::{MatrixChecker, MatrixPolicy};
use crate::release::outcome::ReleaseOutcome;
use crate::release::request::ReleaseRequest;
use crate::release::validate::Validator;
use std::path::Path;

pub struct Workflow<'a> {
  root: &'a Path,
  toolchain: &'a dyn Toolchain,
  tags: &'a dyn TagStore,
  prompt: &'a dyn InstallPrompt,
  policy: MatrixPolicy,
}

impl<'a> Workflow<'a> {
  pub fn new(
    root: &'a Path,
    toolchain: &'a dyn Toolchain,
    tags: &'a dyn TagStore,
    prompt: &'a dyn InstallPrompt,
  ) -> Self {
    Self {
      root,
      toolchain,
      tags,
      prompt,
      policy: MatrixPolicy::builtin(),
    }
  }

  pub fn with_policy(mut self, policy: MatrixPolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn run(&self, request: ReleaseRequest) -> ReleaseOutcome {
    tracing::info!(
      package = %request.package_name,
      version = %request.target_version,
      dry_run = request.dry_run,
      "starting release"
    );

    let validated = match Validator::new(self.root, self.toolchain, self.tags, self.prompt).validate(request) {
      Ok(validated) => validated,
      Err(err) => return ReleaseOutcome::FailedAtValidation(err),
    };

    let checked = match MatrixChecker::new(self.toolchain, &self.policy).check(validated) {
      Ok(checked) => checked,
      Err(err) => return ReleaseOutcome::FailedAtBuildMatrix(err),
    };

    match Executor::new(self.toolchain, self.tags).release(checked) {
      Ok(outcome) => outcome,
      Err(err) => ReleaseOutcome::FailedAtRelease(err),
    }
  }
}
