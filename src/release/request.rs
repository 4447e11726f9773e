//! What the operator asked for, and the tag it maps to

use crate::core::error::{ReleaseError, ReleaseResult};
use std::fmt;

/// One release invocation. Built once from the command line and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
  pub package_name: String,
  pub target_version: String,
  pub verbose: bool,
  pub dry_run: bool,
}

impl ReleaseRequest {
  /// Validate command line input.
  ///
  /// The version must be valid semver, but is kept as typed: it is compared to the
  /// declared version by exact string equality.
  pub fn parse(package_name: &str, target_version: &str) -> ReleaseResult<Self> {
    if package_name.trim().is_empty() {
      return Err(ReleaseError::Usage("package name must not be empty".to_string()));
    }

    semver::Version::parse(target_version).map_err(|e| {
      ReleaseError::Usage(format!("'{}' is not a valid semantic version: {}", target_version, e))
    })?;

    Ok(Self {
      package_name: package_name.to_string(),
      target_version: target_version.to_string(),
      verbose: false,
      dry_run: false,
    })
  }

  pub fn verbose(mut self, verbose: bool) -> Self {
    self.verbose = verbose;
    self
  }

  pub fn dry_run(mut self, dry_run: bool) -> Self {
    self.dry_run = dry_run;
    self
  }

  /// Tag this release will be recorded under
  pub fn tag(&self) -> ReleaseTag {
    ReleaseTag::new(&self.package_name, &self.target_version)
  }
}

/// `<package>-<version>`, both the uniqueness key and the git tag name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseTag(String);

impl ReleaseTag {
  pub fn new(package_name: &str, version: &str) -> Self {
    Self(format!("{}-{}", package_name, version))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ReleaseTag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
