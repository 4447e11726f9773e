//! Optional release-gate configuration
//!
//! Searched in order: release-gate.toml, .release-gate.toml, .cargo/release-gate.toml,
//! .config/release-gate.toml. A missing file is not an error; every field has a default.
//!
//! ```toml
//! [git]
//! remote = "origin"
//!
//! [registry]
//! name = "my-registry"
//!
//! [matrix.my-crate]
//! include = ["std", "serde"]
//! ```

use crate::core::error::{ConfigError, ReleaseResult, ResultExt};
use crate::release::matrix::MatrixPlan;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "release-gate.toml";

/// Configuration for release-gate
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GateConfig {
  #[serde(default)]
  pub git: GitConfig,
  #[serde(default)]
  pub registry: RegistryConfig,
  /// Per-package build-matrix policy, layered over the built-in table
  #[serde(default)]
  pub matrix: BTreeMap<String, MatrixConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitConfig {
  /// Remote the release tag is pushed to
  #[serde(default = "default_remote")]
  pub remote: String,
}

fn default_remote() -> String {
  "origin".to_string()
}

impl Default for GitConfig {
  fn default() -> Self {
    Self {
      remote: default_remote(),
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryConfig {
  /// Alternate registry passed as `--registry` (default: crates.io)
  #[serde(default)]
  pub name: Option<String>,
}

/// Feature selection for one package
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatrixConfig {
  /// Only take the powerset of these features
  #[serde(default)]
  pub include: Option<Vec<String>>,
  /// Drop these features from the powerset
  #[serde(default)]
  pub exclude: Option<Vec<String>>,
}

impl MatrixConfig {
  /// Convert to a plan, rejecting tables that set both lists or an empty one
  pub fn to_plan(&self) -> Result<MatrixPlan, String> {
    match (&self.include, &self.exclude) {
      (Some(_), Some(_)) => Err("`include` and `exclude` are mutually exclusive".to_string()),
      (Some(include), None) if include.is_empty() => Err("`include` must list at least one feature".to_string()),
      (None, Some(exclude)) if exclude.is_empty() => Err("`exclude` must list at least one feature".to_string()),
      (Some(include), None) => Ok(MatrixPlan::Include(include.clone())),
      (None, Some(exclude)) => Ok(MatrixPlan::Exclude(exclude.clone())),
      (None, None) => Ok(MatrixPlan::Full),
    }
  }
}

impl GateConfig {
  /// Find config file in search order
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join(CONFIG_FILE),
      path.join(format!(".{}", CONFIG_FILE)),
      path.join(".cargo").join(CONFIG_FILE),
      path.join(".config").join(CONFIG_FILE),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the repository root, falling back to defaults
  pub fn load(path: &Path) -> ReleaseResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      tracing::debug!(root = %path.display(), "no {} found, using defaults", CONFIG_FILE);
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: GateConfig = toml_edit::de::from_str(&content).map_err(|e| ConfigError::Parse {
      path: config_path.clone(),
      reason: e.to_string().trim().to_string(),
    })?;

    config.validate(&config_path)?;
    tracing::debug!(path = %config_path.display(), "loaded configuration");

    Ok(config)
  }

  /// Validate configuration
  pub fn validate(&self, path: &Path) -> ReleaseResult<()> {
    if self.git.remote.trim().is_empty() {
      return Err(
        ConfigError::EmptyRemote {
          path: path.to_path_buf(),
        }
        .into(),
      );
    }

    for (package, matrix) in &self.matrix {
      matrix.to_plan().map_err(|reason| ConfigError::Matrix {
        path: path.to_path_buf(),
        package: package.clone(),
        reason,
      })?;
    }

    Ok(())
  }

  /// Matrix plans declared in the config file
  pub fn matrix_overrides(&self) -> BTreeMap<String, MatrixPlan> {
    self
      .matrix
      .iter()
      .filter_map(|(package, matrix)| matrix.to_plan().ok().map(|plan| (package.clone(), plan)))
      .collect()
  }
}
