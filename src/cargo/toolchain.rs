//! Real `Toolchain`: cargo subcommands run as blocking child processes
//!
//! Output is inherited so the operator sees compiler and registry messages as they
//! happen. Only the exit status is inspected.

use crate::cargo::metadata;
use crate::core::error::{ReleaseResult, ResultExt};
use crate::release::backend::{MATRIX_TOOL, Toolchain};
use crate::release::matrix::MatrixPlan;
use std::path::Path;
use std::process::Command;

/// Cargo-backed toolchain
#[derive(Debug, Clone, Default)]
pub struct Cargo {
  /// Alternate registry for package/publish
  registry: Option<String>,
}

impl Cargo {
  pub fn new(registry: Option<String>) -> Self {
    Self { registry }
  }

  pub(crate) fn hack_check_args(plan: &MatrixPlan, verbose: bool) -> Vec<String> {
    let mut args = vec!["hack".to_string(), "check".to_string()];
    if verbose {
      args.push("--verbose".to_string());
    }
    args.extend(plan.cargo_hack_args());
    args
  }

  pub(crate) fn package_args(&self, verbose: bool) -> Vec<String> {
    let mut args = vec!["package".to_string()];
    self.push_common(&mut args, verbose);
    args
  }

  pub(crate) fn publish_args(&self, verbose: bool, dry_run: bool) -> Vec<String> {
    let mut args = vec!["publish".to_string()];
    self.push_common(&mut args, verbose);
    if dry_run {
      args.push("--dry-run".to_string());
    }
    args
  }

  fn push_common(&self, args: &mut Vec<String>, verbose: bool) {
    if verbose {
      args.push("--verbose".to_string());
    }
    if let Some(registry) = &self.registry {
      args.push("--registry".to_string());
      args.push(registry.clone());
    }
  }
}

/// `cargo --list` prints one installed subcommand per line, name first
pub(crate) fn lists_subcommand(cargo_list: &str, subcommand: &str) -> bool {
  cargo_list
    .lines()
    .filter_map(|line| line.split_whitespace().next())
    .any(|name| name == subcommand)
}

fn run_cargo(dir: Option<&Path>, args: &[String]) -> ReleaseResult<i32> {
  let rendered = format!("cargo {}", args.join(" "));
  tracing::debug!(command = %rendered, dir = ?dir, "running");

  let mut cmd = Command::new("cargo");
  cmd.args(args);
  if let Some(dir) = dir {
    cmd.current_dir(dir);
  }

  let status = cmd
    .status()
    .with_context(|| format!("Failed to execute {}", rendered))?;

  // Killed by a signal: no code, still a failure
  let code = status.code().unwrap_or(-1);
  tracing::debug!(command = %rendered, code, "finished");
  Ok(code)
}

impl Toolchain for Cargo {
  fn declared_version(&self, package_dir: &Path) -> ReleaseResult<String> {
    metadata::declared_version(package_dir)
  }

  fn has_matrix_tool(&self) -> ReleaseResult<bool> {
    let output = Command::new("cargo")
      .arg("--list")
      .output()
      .context("Failed to execute cargo --list")?;

    if !output.status.success() {
      return Err(
        format!(
          "cargo --list failed: {}",
          String::from_utf8_lossy(&output.stderr).trim()
        )
        .into(),
      );
    }

    Ok(lists_subcommand(&String::from_utf8_lossy(&output.stdout), "hack"))
  }

  fn install_matrix_tool(&self) -> ReleaseResult<i32> {
    run_cargo(None, &["install".to_string(), MATRIX_TOOL.to_string()])
  }

  fn check_feature_matrix(&self, package_dir: &Path, plan: &MatrixPlan, verbose: bool) -> ReleaseResult<i32> {
    run_cargo(Some(package_dir), &Self::hack_check_args(plan, verbose))
  }

  fn package(&self, package_dir: &Path, verbose: bool) -> ReleaseResult<i32> {
    run_cargo(Some(package_dir), &self.package_args(verbose))
  }

  fn publish(&self, package_dir: &Path, verbose: bool, dry_run: bool) -> ReleaseResult<i32> {
    run_cargo(Some(package_dir), &self.publish_args(verbose, dry_run))
  }
}
