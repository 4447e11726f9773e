//! Cargo-style status lines: a right-aligned bold label, then the message

use anstyle::{AnsiColor, Color, Style};
use std::io::IsTerminal;

const LABEL_WIDTH: usize = 12;

fn label_style() -> Style {
  Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Green)))
}

fn render(label: &str, message: &str, style: Style, color: bool) -> String {
  if color {
    format!(
      "{}{:>width$}{} {}",
      style.render(),
      label,
      style.render_reset(),
      message,
      width = LABEL_WIDTH
    )
  } else {
    format!("{:>width$} {}", label, message, width = LABEL_WIDTH)
  }
}

/// Print a status line, e.g. `   Verifying if foo v1.2.0 can be released`
pub fn status(label: &str, message: &str) {
  let color = std::io::stdout().is_terminal();
  println!("{}", render(label, message, label_style(), color));
}

/// Show a command a real run would have executed
pub fn dry_run_command(command: &str) {
  println!("# {}", command);
}
