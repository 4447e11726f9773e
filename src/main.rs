mod cargo;
mod commands;
mod core;
mod logging;
mod release;
mod ui;

use clap::{CommandFactory, Parser};
use core::error::{ReleaseError, print_error};
use release::ReleaseRequest;

/// Verify, build-matrix check, publish and tag one package of a Cargo workspace
#[derive(Parser)]
#[command(name = "release")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct ReleaseCli {
  /// Package directory (relative to the repository root) to release
  package: String,

  /// Version to release; must match the version in the package's Cargo.toml
  #[arg(value_name = "VERSION")]
  target_version: String,

  /// Use verbose cargo output and debug logging
  #[arg(short, long)]
  verbose: bool,

  /// Perform every check and `cargo publish --dry-run`, but do not publish or tag
  #[arg(short, long)]
  dry_run: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  // Unknown flags and missing positionals exit here with usage and code 2
  let cli = ReleaseCli::parse();

  logging::init_subscriber(cli.verbose);

  let request = match ReleaseRequest::parse(&cli.package, &cli.target_version) {
    Ok(request) => request.verbose(cli.verbose).dry_run(cli.dry_run),
    Err(e) => handle_error(e),
  };

  let cwd = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => handle_error(ReleaseError::message(format!("Failed to get current directory: {}", e))),
  };

  let ctx = match core::context::ReleaseContext::build(&cwd) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let outcome = commands::run_release(&ctx, request);
  if let Some(err) = outcome.error() {
    print_error(err);
  }
  std::process::exit(outcome.exit_code().as_i32());
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  if matches!(err, ReleaseError::Usage(_)) {
    eprintln!("{}", ReleaseCli::command().render_usage());
  }
  std::process::exit(err.exit_code().as_i32());
}
