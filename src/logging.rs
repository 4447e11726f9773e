//! Diagnostic logging to stderr
//!
//! Status lines for the operator are printed by `ui::status`; tracing carries the
//! diagnostics behind them (commands spawned, exit codes, phase transitions).

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
fn default_directive(verbose: bool) -> &'static str {
  if verbose { "debug" } else { "warn" }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `--verbose`.
pub fn init_subscriber(verbose: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

  // A second init (tests) is harmless
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .try_init();
}
