//! Interactive prompts.
//!
//! Secret input never echoes. When stdin is not a terminal the first line
//! is read instead, so values can be piped in.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::{Confirm, Password};
use zeroize::Zeroizing;

use crate::error::{Result, ValidationError};

/// Read a secret value without echo, or one line from piped stdin.
pub fn secret(prompt: &str) -> Result<Zeroizing<String>> {
    if io::stdin().is_terminal() {
        let value = Password::new().with_prompt(prompt).interact()?;
        return Ok(Zeroizing::new(value));
    }

    let mut line = Zeroizing::new(String::new());
    io::stdin().lock().read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}

/// Ask a yes/no question, defaulting to no.
///
/// # Errors
///
/// Returns `ValidationError::NonInteractive` when stdin is not a terminal.
pub fn confirm(question: &str) -> Result<bool> {
    if !io::stdin().is_terminal() {
        return Err(ValidationError::NonInteractive("--yes").into());
    }

    Ok(Confirm::new()
        .with_prompt(question)
        .default(false)
        .interact()?)
}
