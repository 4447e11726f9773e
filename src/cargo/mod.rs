//! Cargo integration
//!
//! - **metadata**: Read a package's declared version using cargo_metadata
//! - **toolchain**: `Cargo`, the real `Toolchain` (cargo hack, package, publish, install)

pub mod metadata;
pub mod toolchain;

pub use toolchain::Cargo;
