//! Tag operations for SystemGit

use super::system_git::SystemGit;
use crate::core::error::ReleaseResult;
use crate::release::backend::TagStore;

impl SystemGit {
  /// List every tag in the repository
  pub fn list_tags(&self) -> ReleaseResult<Vec<String>> {
    let stdout = self.run(&["tag", "--list"])?;
    Ok(
      stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect(),
    )
  }
}

impl TagStore for SystemGit {
  fn tag_exists(&self, name: &str) -> ReleaseResult<bool> {
    // `git tag --list <pattern>` globs, so compare full names ourselves
    Ok(self.list_tags()?.iter().any(|tag| tag == name))
  }

  fn create_tag(&self, name: &str) -> ReleaseResult<()> {
    self.run_inherited(&["tag", name])?;
    Ok(())
  }

  fn push_tags(&self) -> ReleaseResult<()> {
    self.run_inherited(&["push", &self.remote, "--tags"])?;
    Ok(())
  }

  fn tag_command(&self, name: &str) -> String {
    format!("git tag {} && git push {} --tags", name, self.remote)
  }
}
