//! Shared helpers for command handlers.

use std::io::IsTerminal;

use crate::error::CliError;

/// Ask the operator to confirm a destructive operation.
///
/// `--yes` skips the prompt. In a non-interactive context without
/// `--yes` the operation is refused rather than silently confirmed.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, CliError> {
    if assume_yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::ConfirmationRequired);
    }

    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}
