//! CLI commands for release-gate
//!
//! - **release**: verify, build-matrix check, publish and tag one package
//!
//! Commands accept `&ReleaseContext` to avoid re-resolving the repository.

pub mod release;

pub use release::run_release;
