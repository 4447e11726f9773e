//! Spy collaborators for workflow tests
//!
//! Every call lands in one shared log so tests can assert on cross-collaborator
//! ordering (publish before tag, install before matrix check, ...).

use crate::core::error::{GitError, ReleaseResult};
use crate::release::backend::{InstallAnswer, InstallPrompt, TagStore, Toolchain};
use crate::release::matrix::MatrixPlan;
use crate::release::request::ReleaseRequest;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::rc::Rc;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
  DeclaredVersion(String),
  HasMatrixTool,
  InstallMatrixTool,
  CheckMatrix(MatrixPlan),
  Package,
  Publish { dry_run: bool },
  TagExists(String),
  CreateTag(String),
  PushTags,
}

type CallLog = Rc<RefCell<Vec<Call>>>;

pub struct FakeToolchain {
  log: CallLog,
  versions: RefCell<BTreeMap<String, String>>,
  has_tool: Cell<bool>,
  install_exit: i32,
  matrix_exit: i32,
  package_exit: i32,
  publish_exit: i32,
}

impl Toolchain for FakeToolchain {
  fn declared_version(&self, package_dir: &Path) -> ReleaseResult<String> {
    let name = package_dir
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_default();
    self.log.borrow_mut().push(Call::DeclaredVersion(name.clone()));
    self
      .versions
      .borrow()
      .get(&name)
      .cloned()
      .ok_or_else(|| format!("no manifest for {}", name).into())
  }

  fn has_matrix_tool(&self) -> ReleaseResult<bool> {
    self.log.borrow_mut().push(Call::HasMatrixTool);
    Ok(self.has_tool.get())
  }

  fn install_matrix_tool(&self) -> ReleaseResult<i32> {
    self.log.borrow_mut().push(Call::InstallMatrixTool);
    if self.install_exit == 0 {
      self.has_tool.set(true);
    }
    Ok(self.install_exit)
  }

  fn check_feature_matrix(&self, _package_dir: &Path, plan: &MatrixPlan, _verbose: bool) -> ReleaseResult<i32> {
    self.log.borrow_mut().push(Call::CheckMatrix(plan.clone()));
    Ok(self.matrix_exit)
  }

  fn package(&self, _package_dir: &Path, _verbose: bool) -> ReleaseResult<i32> {
    self.log.borrow_mut().push(Call::Package);
    Ok(self.package_exit)
  }

  fn publish(&self, _package_dir: &Path, _verbose: bool, dry_run: bool) -> ReleaseResult<i32> {
    self.log.borrow_mut().push(Call::Publish { dry_run });
    Ok(self.publish_exit)
  }
}

pub struct FakeTags {
  log: CallLog,
  tags: RefCell<BTreeSet<String>>,
  pushed: Cell<bool>,
  fail_push: bool,
}

impl FakeTags {
  pub fn has(&self, name: &str) -> bool {
    self.tags.borrow().contains(name)
  }

  pub fn pushed(&self) -> bool {
    self.pushed.get()
  }
}

impl TagStore for FakeTags {
  fn tag_exists(&self, name: &str) -> ReleaseResult<bool> {
    self.log.borrow_mut().push(Call::TagExists(name.to_string()));
    Ok(self.has(name))
  }

  fn create_tag(&self, name: &str) -> ReleaseResult<()> {
    self.log.borrow_mut().push(Call::CreateTag(name.to_string()));
    self.tags.borrow_mut().insert(name.to_string());
    Ok(())
  }

  fn push_tags(&self) -> ReleaseResult<()> {
    self.log.borrow_mut().push(Call::PushTags);
    if self.fail_push {
      return Err(
        GitError::CommandFailed {
          command: "git push origin --tags".to_string(),
          stderr: "remote rejected".to_string(),
        }
        .into(),
      );
    }
    self.pushed.set(true);
    Ok(())
  }

  fn tag_command(&self, name: &str) -> String {
    format!("git tag {} && git push origin --tags", name)
  }
}

pub struct FixedPrompt {
  answer: InstallAnswer,
  asked: Cell<usize>,
}

impl FixedPrompt {
  pub fn times_asked(&self) -> usize {
    self.asked.get()
  }
}

impl InstallPrompt for FixedPrompt {
  fn confirm_install(&self, _tool: &str) -> ReleaseResult<InstallAnswer> {
    self.asked.set(self.asked.get() + 1);
    Ok(self.answer.clone())
  }
}

/// A temporary repository root plus spies, configured builder-style
pub struct Harness {
  root: TempDir,
  log: CallLog,
  pub toolchain: FakeToolchain,
  pub tags: FakeTags,
  pub prompt: FixedPrompt,
}

impl Harness {
  pub fn new() -> Self {
    let log = CallLog::default();
    Self {
      root: tempfile::tempdir().unwrap(),
      toolchain: FakeToolchain {
        log: Rc::clone(&log),
        versions: RefCell::new(BTreeMap::new()),
        has_tool: Cell::new(true),
        install_exit: 0,
        matrix_exit: 0,
        package_exit: 0,
        publish_exit: 0,
      },
      tags: FakeTags {
        log: Rc::clone(&log),
        tags: RefCell::new(BTreeSet::new()),
        pushed: Cell::new(false),
        fail_push: false,
      },
      prompt: FixedPrompt {
        answer: InstallAnswer::No,
        asked: Cell::new(0),
      },
      log,
    }
  }

  /// Create `<root>/<name>` declaring `version`
  pub fn with_package(self, name: &str, version: &str) -> Self {
    std::fs::create_dir_all(self.root.path().join(name)).unwrap();
    self
      .toolchain
      .versions
      .borrow_mut()
      .insert(name.to_string(), version.to_string());
    self
  }

  pub fn with_tag(self, tag: &str) -> Self {
    self.tags.tags.borrow_mut().insert(tag.to_string());
    self
  }

  pub fn without_matrix_tool(self) -> Self {
    self.toolchain.has_tool.set(false);
    self
  }

  pub fn answering(mut self, answer: InstallAnswer) -> Self {
    self.prompt.answer = answer;
    self
  }

  pub fn install_exit(mut self, code: i32) -> Self {
    self.toolchain.install_exit = code;
    self
  }

  pub fn matrix_exit(mut self, code: i32) -> Self {
    self.toolchain.matrix_exit = code;
    self
  }

  pub fn package_exit(mut self, code: i32) -> Self {
    self.toolchain.package_exit = code;
    self
  }

  pub fn publish_exit(mut self, code: i32) -> Self {
    self.toolchain.publish_exit = code;
    self
  }

  pub fn failing_push(mut self) -> Self {
    self.tags.fail_push = true;
    self
  }

  pub fn root(&self) -> &Path {
    self.root.path()
  }

  pub fn request(&self, package: &str, version: &str) -> ReleaseRequest {
    ReleaseRequest::parse(package, version).unwrap()
  }

  pub fn calls(&self) -> Vec<Call> {
    self.log.borrow().clone()
  }

  pub fn clear_calls(&self) {
    self.log.borrow_mut().clear();
  }
}
