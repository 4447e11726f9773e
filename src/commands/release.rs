//! `release <package> <version>`: wires the real collaborators into the workflow

use crate::cargo::Cargo;
use crate::core::context::ReleaseContext;
use crate::release::{MatrixPolicy, ReleaseOutcome, ReleaseRequest, Workflow};
use crate::ui::TerminalPrompt;

/// Run the release command
pub fn run_release(ctx: &ReleaseContext, request: ReleaseRequest) -> ReleaseOutcome {
  let git = match ctx.git() {
    Ok(git) => git,
    Err(err) => return ReleaseOutcome::FailedAtValidation(err),
  };
  let cargo = Cargo::new(ctx.config.registry.name.clone());
  let prompt = TerminalPrompt;
  let policy = MatrixPolicy::with_overrides(ctx.config.matrix_overrides());

  let package = request.package_name.clone();
  let version = request.target_version.clone();

  let outcome = Workflow::new(ctx.repo_root(), &cargo, &git, &prompt)
    .with_policy(policy)
    .run(request);

  if !outcome.is_success() {
    tracing::info!(package = %package, version = %version, stage = outcome.stage(), "release stopped");
    return outcome;
  }

  println!();
  match &outcome {
    ReleaseOutcome::Released { tag } => {
      println!("✅ Released {} v{} (tag {})", package, version, tag);
    }
    ReleaseOutcome::Simulated { tag, .. } => {
      println!("🔍 Dry run complete: {} v{} can be released as {}", package, version, tag);
      println!("   Run again without --dry-run to publish.");
    }
    _ => {}
  }

  outcome
}
