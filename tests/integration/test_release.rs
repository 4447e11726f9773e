//! Validation failures end to end: nothing is built, published or tagged

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_no_such_package() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("foo", "1.2.0")?;
  repo.commit("Add foo")?;

  let output = run_release(&repo.path, &["bar", "1.2.0"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("No such package: 'bar'"));
  assert!(repo.tags()?.is_empty());

  Ok(())
}

#[test]
fn test_package_path_must_stay_inside_root() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("foo", "1.2.0")?;
  repo.commit("Add foo")?;

  let output = run_release(&repo.path, &["../foo", "1.2.0"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("No such package"));

  Ok(())
}

#[test]
fn test_version_mismatch_reports_both_versions() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("foo", "1.1.9")?;
  repo.commit("Add foo")?;

  let output = run_release(&repo.path, &["foo", "1.2.0"])?;
  assert_eq!(output.status.code(), Some(3));
  let err = stderr(&output);
  assert!(err.contains("1.1.9"), "stderr: {}", err);
  assert!(err.contains("1.2.0"), "stderr: {}", err);
  assert!(repo.tags()?.is_empty());

  Ok(())
}

#[test]
fn test_runs_from_subdirectory() -> Result<()> {
  let repo = TestRepo::new()?;
  let foo = repo.add_package("foo", "1.1.9")?;
  repo.commit("Add foo")?;

  // Resolved against the repository root, so this is a mismatch, not a missing package
  let output = run_release(&foo.join("src"), &["foo", "1.2.0"])?;
  assert_eq!(output.status.code(), Some(3));
  let err = stderr(&output);
  assert!(!err.contains("No such package"), "stderr: {}", err);
  assert!(err.contains("1.1.9"), "stderr: {}", err);

  Ok(())
}

#[test]
fn test_existing_tag_or_missing_tool_stops_before_publish() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("foo", "1.2.0")?;
  repo.commit("Add foo")?;
  repo.tag("foo-1.2.0")?;

  let output = run_release(&repo.path, &["foo", "1.2.0"])?;
  assert_eq!(output.status.code(), Some(3));

  let err = stderr(&output);
  if has_cargo_hack() {
    assert!(err.contains("Git tag `foo-1.2.0` already exists"), "stderr: {}", err);
  } else {
    // Closed stdin answers the install prompt with nothing usable
    assert!(stdout(&output).contains("Install cargo-hack? [Y/n]"));
    assert!(err.contains("Missing tooling"), "stderr: {}", err);
  }
  assert_eq!(repo.tags()?, vec!["foo-1.2.0".to_string()]);

  Ok(())
}
