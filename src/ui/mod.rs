//! Terminal interaction: status lines and the install prompt

pub mod prompt;
pub mod status;

pub use prompt::TerminalPrompt;
