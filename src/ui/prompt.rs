//! Interactive install confirmation on stdin

use crate::core::error::{ReleaseResult, ResultExt};
use crate::release::backend::{InstallAnswer, InstallPrompt};
use std::io::{BufRead, Write};

/// Asks on stdout, reads one line from stdin. Blocks until the operator answers.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
  fn ask(&self, tool: &str, input: &mut impl BufRead, output: &mut impl Write) -> ReleaseResult<InstallAnswer> {
    write!(output, "Install {}? [Y/n] ", tool).context("Failed to write prompt")?;
    output.flush().context("Failed to write prompt")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;

    // EOF: nobody is there to answer
    if read == 0 {
      writeln!(output).context("Failed to write prompt")?;
      return Ok(InstallAnswer::Invalid(String::new()));
    }

    Ok(InstallAnswer::parse(&line))
  }
}

impl InstallPrompt for TerminalPrompt {
  fn confirm_install(&self, tool: &str) -> ReleaseResult<InstallAnswer> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    self.ask(tool, &mut stdin.lock(), &mut stdout.lock())
  }
}
