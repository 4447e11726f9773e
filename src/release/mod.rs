//! The verify-then-release state machine
//!
//! # Phases
//!
//! 1. **validate**: package exists, declared version matches, cargo-hack present,
//!    tag unused. Produces [`validate::Validated`].
//! 2. **matrix**: `cargo hack check --feature-powerset` under the package's policy.
//!    Consumes `Validated`, produces [`matrix::MatrixChecked`].
//! 3. **executor**: `cargo package`, `cargo publish [--dry-run]`, then tag and push
//!    (or print the tag command in a dry run). Consumes `MatrixChecked`.
//!
//! Tokens can only be built by the phase that checked their precondition, so the
//! irreversible steps are unreachable unless everything before them passed.
//!
//! # Dry runs
//!
//! A dry run takes the same path with the mode flag set. It never creates a tag, so
//! it does not reserve the version: a real release may follow it.

pub mod backend;
pub mod executor;
pub mod matrix;
pub mod outcome;
pub mod request;
pub mod validate;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub use matrix::MatrixPolicy;
pub use outcome::ReleaseOutcome;
pub use request::ReleaseRequest;
pub use workflow::Workflow;
