//! Package, publish and tag
//!
//! Dry runs go through the same calls as real runs with the mode flag set, so a clean
//! dry run predicts a clean release. The tag is only created after a successful
//! publish: a tag must never point at a version the registry does not have. Nothing is
//! rolled back; a registry upload cannot be taken back.

use crate::core::error::{ReleaseError, ReleaseResult, ReleaseStepError};
use crate::release::backend::{TagStore, Toolchain};
use crate::release::matrix::MatrixChecked;
use crate::release::outcome::ReleaseOutcome;
use crate::ui::status;

/// Proof that the registry accepted (or would accept) the upload
#[derive(Debug)]
pub struct Published {
  checked: MatrixChecked,
}

pub struct Executor<'a> {
  toolchain: &'a dyn Toolchain,
  tags: &'a dyn TagStore,
}

impl<'a> Executor<'a> {
  pub fn new(toolchain: &'a dyn Toolchain, tags: &'a dyn TagStore) -> Self {
    Self { toolchain, tags }
  }

  pub fn release(&self, checked: MatrixChecked) -> ReleaseResult<ReleaseOutcome> {
    let published = self.publish(checked)?;
    self.tag(published)
  }

  /// `cargo package` then `cargo publish [--dry-run]`
  pub fn publish(&self, checked: MatrixChecked) -> ReleaseResult<Published> {
    let validated = checked.validated();
    let request = validated.request();
    let dir = validated.package_dir();

    status::status(
      "Releasing",
      &format!("{} v{}", request.package_name, request.target_version),
    );

    let exit_code = self.toolchain.package(dir, request.verbose)?;
    if exit_code != 0 {
      return Err(
        ReleaseStepError::Packaging {
          package: request.package_name.clone(),
          exit_code,
        }
        .into(),
      );
    }

    let exit_code = self.toolchain.publish(dir, request.verbose, request.dry_run)?;
    if exit_code != 0 {
      return Err(
        ReleaseStepError::Publish {
          package: request.package_name.clone(),
          exit_code,
          dry_run: request.dry_run,
        }
        .into(),
      );
    }

    tracing::info!(
      package = %request.package_name,
      dry_run = request.dry_run,
      plan = ?checked.plan(),
      "publish step succeeded"
    );
    Ok(Published { checked })
  }

  /// Create and push the tag, or print the command a real run would use
  pub fn tag(&self, published: Published) -> ReleaseResult<ReleaseOutcome> {
    let validated = published.checked.validated();
    let tag = validated.tag().clone();

    status::status("Tagging", tag.as_str());

    if validated.request().dry_run {
      let command = self.tags.tag_command(tag.as_str());
      status::dry_run_command(&command);
      return Ok(ReleaseOutcome::Simulated { tag, command });
    }

    let untagged = |err: ReleaseError| ReleaseStepError::Tagging {
      tag: tag.to_string(),
      reason: err.to_string(),
    };

    self.tags.create_tag(tag.as_str()).map_err(untagged)?;
    self.tags.push_tags().map_err(untagged)?;

    Ok(ReleaseOutcome::Released { tag })
  }
}
