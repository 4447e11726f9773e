//! Pre-release checks
//!
//! Runs, in order, stopping at the first failure:
//! 1. the package directory exists under the repository root
//! 2. its declared version equals the requested version
//! 3. cargo-hack is installed (offering to install it)
//! 4. the release tag is not taken
//!
//! The only side effect is the operator-approved `cargo install`.

use crate::core::error::{MissingToolingReason, ReleaseResult, ValidationError};
use crate::release::backend::{InstallAnswer, InstallPrompt, MATRIX_TOOL, TagStore, Toolchain};
use crate::release::request::{ReleaseRequest, ReleaseTag};
use crate::ui::status;
use std::path::{Component, Path, PathBuf};

/// Proof that every pre-release check passed. Only [`Validator::validate`] creates one.
#[derive(Debug)]
pub struct Validated {
  request: ReleaseRequest,
  package_dir: PathBuf,
  tag: ReleaseTag,
}

impl Validated {
  pub fn request(&self) -> &ReleaseRequest {
    &self.request
  }

  pub fn package_dir(&self) -> &Path {
    &self.package_dir
  }

  pub fn tag(&self) -> &ReleaseTag {
    &self.tag
  }
}

pub struct Validator<'a> {
  root: &'a Path,
  toolchain: &'a dyn Toolchain,
  tags: &'a dyn TagStore,
  prompt: &'a dyn InstallPrompt,
}

impl<'a> Validator<'a> {
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
    }
  }

  pub fn validate(&self, request: ReleaseRequest) -> ReleaseResult<Validated> {
    status::status(
      "Verifying",
      &format!("if {} v{} can be released", request.package_name, request.target_version),
    );

    let package_dir = self.locate_package(&request.package_name)?;
    self.check_version(&request, &package_dir)?;
    self.ensure_matrix_tool()?;

    let tag = request.tag();
    self.check_tag_unused(&tag)?;

    tracing::info!(package = %request.package_name, tag = %tag, "pre-release checks passed");

    Ok(Validated {
      request,
      package_dir,
      tag,
    })
  }

  fn locate_package(&self, name: &str) -> ReleaseResult<PathBuf> {
    let path = self.root.join(name);

    // A single plain path component: no separators, no `..`
    let mut components = Path::new(name).components();
    let is_plain = matches!(
      (components.next(), components.next()),
      (Some(Component::Normal(_)), None)
    );

    if !is_plain || !path.is_dir() {
      return Err(
        ValidationError::NoSuchPackage {
          name: name.to_string(),
          path,
        }
        .into(),
      );
    }

    Ok(path)
  }

  fn check_version(&self, request: &ReleaseRequest, package_dir: &Path) -> ReleaseResult<()> {
    let actual = self.toolchain.declared_version(package_dir)?;
    tracing::debug!(declared = %actual, requested = %request.target_version, "comparing versions");

    if actual != request.target_version {
      return Err(
        ValidationError::VersionMismatch {
          package: request.package_name.clone(),
          expected: request.target_version.clone(),
          actual,
        }
        .into(),
      );
    }

    Ok(())
  }

  fn ensure_matrix_tool(&self) -> ReleaseResult<()> {
    if self.toolchain.has_matrix_tool()? {
      return Ok(());
    }

    tracing::warn!("{} is not installed", MATRIX_TOOL);
    let missing = |reason| ValidationError::MissingTooling {
      tool: MATRIX_TOOL.to_string(),
      reason,
    };

    match self.prompt.confirm_install(MATRIX_TOOL)? {
      InstallAnswer::Yes => {
        status::status("Installing", MATRIX_TOOL);
        let exit_code = self.toolchain.install_matrix_tool()?;
        if exit_code != 0 {
          return Err(missing(MissingToolingReason::InstallFailed { exit_code }).into());
        }
        Ok(())
      }
      InstallAnswer::No => Err(missing(MissingToolingReason::Declined).into()),
      InstallAnswer::Invalid(answer) => Err(missing(MissingToolingReason::InvalidResponse(answer)).into()),
    }
  }

  fn check_tag_unused(&self, tag: &ReleaseTag) -> ReleaseResult<()> {
    if self.tags.tag_exists(tag.as_str())? {
      return Err(
        ValidationError::TagAlreadyExists {
          tag: tag.to_string(),
        }
        .into(),
      );
    }
    Ok(())
  }
}
