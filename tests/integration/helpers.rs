//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A git repository holding a Cargo workspace whose packages sit at the root
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
  members: std::cell::RefCell<Vec<String>>,
}

impl TestRepo {
  /// Create an empty workspace with one commit
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    let repo = Self {
      _root: root,
      path,
      members: std::cell::RefCell::new(Vec::new()),
    };
    repo.write_workspace_manifest()?;
    repo.commit("Initial workspace setup")?;

    Ok(repo)
  }

  fn write_workspace_manifest(&self) -> Result<()> {
    let members = self
      .members
      .borrow()
      .iter()
      .map(|m| format!("\"{}\"", m))
      .collect::<Vec<_>>()
      .join(", ");

    std::fs::write(
      self.path.join("Cargo.toml"),
      format!(
        r#"[workspace]
members = [{}]
resolver = "2"

[workspace.package]
edition = "2021"
license = "MIT"
"#,
        members
      ),
    )?;
    Ok(())
  }

  /// Add a package directory `<root>/<name>` declaring `version`
  pub fn add_package(&self, name: &str, version: &str) -> Result<PathBuf> {
    let package_path = self.path.join(name);
    std::fs::create_dir_all(package_path.join("src"))?;

    std::fs::write(
      package_path.join("Cargo.toml"),
      format!(
        r#"[package]
name = "{}"
version = "{}"
edition.workspace = true
license.workspace = true
description = "A test package"

[dependencies]
"#,
        name, version
      ),
    )?;
    std::fs::write(
      package_path.join("src/lib.rs"),
      format!("//! {} crate\n\npub fn hello() -> &'static str {{\n    \"Hello from {}\"\n}}\n", name, name),
    )?;

    self.members.borrow_mut().push(name.to_string());
    self.write_workspace_manifest()?;

    Ok(package_path)
  }

  /// Write a file relative to the repository root
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let file_path = self.path.join(path);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
  }

  /// Commit current changes
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Create a lightweight tag at HEAD
  pub fn tag(&self, name: &str) -> Result<()> {
    git(&self.path, &["tag", name])?;
    Ok(())
  }

  /// All tags in the repository
  pub fn tags(&self) -> Result<Vec<String>> {
    let output = git(&self.path, &["tag", "--list"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the release binary. Failures are returned, not raised: most tests assert on them.
///
/// Stdin is closed, so an install prompt reads end-of-input.
pub fn run_release(cwd: &Path, args: &[&str]) -> Result<Output> {
  let release_bin = env!("CARGO_BIN_EXE_release");

  Command::new(release_bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run release")
}

/// Whether this machine already has cargo-hack
pub fn has_cargo_hack() -> bool {
  Command::new("cargo")
    .arg("--list")
    .output()
    .map(|out| {
      String::from_utf8_lossy(&out.stdout)
        .lines()
        .any(|line| line.split_whitespace().next() == Some("hack"))
    })
    .unwrap_or(false)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
