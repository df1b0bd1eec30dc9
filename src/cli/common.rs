//! Shared CLI plumbing: error type, exit codes, and JSON output.

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::parser::{LayoutError, PersistedLayout};
use crate::services::LayoutService;

/// Process exit codes used by every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Bad arguments or invalid input data
    ValidationError = 1,
    /// File system or serialization failure
    IoError = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Category of a CLI failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// Input was rejected
    Validation,
    /// Reading or writing failed
    Io,
}

/// Error returned by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// What went wrong, broadly
    pub kind: CliErrorKind,
    /// Message shown to the user
    pub message: String,
}

impl CliError {
    /// Creates a validation error (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// Creates an I/O error (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// Exit code matching the error kind.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self.kind {
            CliErrorKind::Validation => ExitCode::ValidationError,
            CliErrorKind::Io => ExitCode::IoError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Loads a layout file, classifying failures for the exit code.
///
/// A document that was read but rejected (bad JSON, wrong version) is a
/// validation error; anything else is I/O.
pub fn load_layout(path: &Path) -> CliResult<PersistedLayout> {
    LayoutService::load(path).map_err(|e| {
        let message = format!("Failed to load layout: {e:#}");
        if e.downcast_ref::<LayoutError>().is_some() {
            CliError::validation(message)
        } else {
            CliError::io(message)
        }
    })
}

/// Writes a layout file back.
pub fn save_layout(layout: &PersistedLayout, path: &Path) -> CliResult<()> {
    LayoutService::save(layout, path)
        .map_err(|e| CliError::io(format!("Failed to write layout: {e:#}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::validation("bad").exit_code().code(), 1);
        assert_eq!(CliError::io("disk").exit_code().code(), 2);
        assert_eq!(ExitCode::Success.code(), 0);
    }

    #[test]
    fn test_display_is_message() {
        assert_eq!(CliError::io("Failed to read x").to_string(), "Failed to read x");
    }
}
