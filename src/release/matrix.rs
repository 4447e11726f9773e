//! Feature powerset build check
//!
//! Which combinations get checked is a per-package policy: the full powerset by
//! default, the powerset of an include-list for crates with many irrelevant flags, or
//! the powerset minus an exclude-list for crates with many level-style flags whose
//! combinations add run time but no signal.

use crate::core::error::{BuildMatrixError, ReleaseResult};
use crate::release::backend::Toolchain;
use crate::release::validate::Validated;
use crate::ui::status;
use std::collections::BTreeMap;

/// Feature combinations to check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixPlan {
  /// Every combination of every feature
  Full,
  /// Every combination of only these features
  Include(Vec<String>),
  /// Every combination of all features except these
  Exclude(Vec<String>),
}

impl MatrixPlan {
  /// Arguments for `cargo hack check`
  pub fn cargo_hack_args(&self) -> Vec<String> {
    let mut args = vec!["--feature-powerset".to_string(), "--no-dev-deps".to_string()];
    match self {
      MatrixPlan::Full => {}
      MatrixPlan::Include(features) => {
        args.push("--include-features".to_string());
        args.push(features.join(","));
      }
      MatrixPlan::Exclude(features) => {
        args.push("--exclude-features".to_string());
        args.push(features.join(","));
      }
    }
    args
  }
}

enum Rule {
  Include(&'static [&'static str]),
  Exclude(&'static [&'static str]),
}

struct PolicyEntry {
  package: &'static str,
  rule: Rule,
}

static BUILTIN_POLICIES: &[PolicyEntry] = &[
  PolicyEntry {
    package: "tracing-subscriber",
    rule: Rule::Include(&["fmt", "ansi", "json", "registry", "env-filter"]),
  },
  PolicyEntry {
    package: "tracing",
    rule: Rule::Exclude(&[
      "max_level_off",
      "max_level_error",
      "max_level_warn",
      "max_level_info",
      "max_level_debug",
      "max_level_trace",
      "release_max_level_off",
      "release_max_level_error",
      "release_max_level_warn",
      "release_max_level_info",
      "release_max_level_debug",
      "release_max_level_trace",
    ]),
  },
];

fn owned(features: &[&str]) -> Vec<String> {
  features.iter().map(|f| f.to_string()).collect()
}

/// Package name → plan. Config entries win over the built-in table.
#[derive(Debug, Clone, Default)]
pub struct MatrixPolicy {
  overrides: BTreeMap<String, MatrixPlan>,
}

impl MatrixPolicy {
  pub fn builtin() -> Self {
    Self::default()
  }

  pub fn with_overrides(overrides: BTreeMap<String, MatrixPlan>) -> Self {
    Self { overrides }
  }

  pub fn plan_for(&self, package: &str) -> MatrixPlan {
    if let Some(plan) = self.overrides.get(package) {
      return plan.clone();
    }

    BUILTIN_POLICIES
      .iter()
      .find(|entry| entry.package == package)
      .map(|entry| match entry.rule {
        Rule::Include(features) => MatrixPlan::Include(owned(features)),
        Rule::Exclude(features) => MatrixPlan::Exclude(owned(features)),
      })
      .unwrap_or(MatrixPlan::Full)
  }
}

/// Proof that the package builds under every selected feature combination
#[derive(Debug)]
pub struct MatrixChecked {
  validated: Validated,
  plan: MatrixPlan,
}

impl MatrixChecked {
  pub fn validated(&self) -> &Validated {
    &self.validated
  }

  pub fn plan(&self) -> &MatrixPlan {
    &self.plan
  }
}

pub struct MatrixChecker<'a> {
  toolchain: &'a dyn Toolchain,
  policy: &'a MatrixPolicy,
}

impl<'a> MatrixChecker<'a> {
  pub fn new(toolchain: &'a dyn Toolchain, policy: &'a MatrixPolicy) -> Self {
    Self { toolchain, policy }
  }

  /// Run the check once; cargo-hack walks the combinations and stops at the first
  /// one that fails, whose exit code is reported.
  pub fn check(&self, validated: Validated) -> ReleaseResult<MatrixChecked> {
    let request = validated.request();
    let plan = self.policy.plan_for(&request.package_name);

    status::status(
      "Checking",
      &format!("if {} builds across feature combinations", request.package_name),
    );
    tracing::debug!(package = %request.package_name, ?plan, "selected build matrix");

    let exit_code = self
      .toolchain
      .check_feature_matrix(validated.package_dir(), &plan, request.verbose)?;

    if exit_code != 0 {
      return Err(
        BuildMatrixError {
          package: request.package_name.clone(),
          exit_code,
        }
        .into(),
      );
    }

    Ok(MatrixChecked { validated, plan })
  }
}
