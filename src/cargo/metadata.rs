use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use cargo_metadata::MetadataCommand;
use std::path::Path;

/// Version declared by the package whose manifest lives in `package_dir`
///
/// Asks cargo (`cargo metadata --no-deps`), so workspace-inherited versions
/// (`version.workspace = true`) resolve the same way `cargo publish` sees them.
pub fn declared_version(package_dir: &Path) -> ReleaseResult<String> {
  let manifest = package_dir.join("Cargo.toml");
  if !manifest.is_file() {
    return Err(ReleaseError::with_help(
      format!("No Cargo.toml in {}", package_dir.display()),
      "The package directory must contain the package manifest.",
    ));
  }

  let metadata = MetadataCommand::new()
    .manifest_path(&manifest)
    .no_deps()
    .exec()
    .with_context(|| format!("Failed to read build metadata for {}", package_dir.display()))?;

  let wanted = manifest
    .canonicalize()
    .with_context(|| format!("Failed to resolve {}", manifest.display()))?;

  metadata
    .packages
    .iter()
    .find(|pkg| {
      pkg
        .manifest_path
        .as_std_path()
        .canonicalize()
        .is_ok_and(|path| path == wanted)
    })
    .map(|pkg| pkg.version.to_string())
    .ok_or_else(|| {
      ReleaseError::with_help(
        format!("{} does not define a package", manifest.display()),
        "Virtual workspace manifests cannot be released; pass a member package.",
      )
    })
}
