//! Command handlers grouped by the resource they act on.

pub(crate) mod participants;
pub(crate) mod rooms;
pub(crate) mod tracks;

use crate::client::{CliError, CliResult};

/// Trim a required flag value, rejecting blank input before any remote call.
pub(crate) fn require_non_blank(value: String, flag: &str) -> CliResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CliError::validation(format!("--{flag} must not be empty")));
    }
    if trimmed.len() == value.len() {
        return Ok(value);
    }
    Ok(trimmed.to_string())
}
