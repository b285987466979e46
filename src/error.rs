//! Error types for make-builder
//!
//! Every variant's `Display` output is the exact text placed in the `error`
//! field of the JSON document handed back to the host.

use thiserror::Error;

/// Main error type for builder operations
#[derive(Error, Debug)]
pub enum BuilderError {
    /// No make executable in any search path directory
    #[error("Couldn't find '{program}' in '{search_path}'")]
    ToolNotFound {
        program: String,
        search_path: String,
    },

    /// The database dump printed nothing on stdout but complained on stderr
    #[error("`{command}` returned with error '{stderr}'")]
    DumpFailed { command: String, stderr: String },

    /// The database dump printed nothing at all
    #[error("`{command}` returned with return code {return_code}")]
    DumpExited { command: String, return_code: i32 },

    /// Failed to spawn the command
    #[error("`{command}` could not be started: {error}")]
    SpawnFailed { command: String, error: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Suggest fixes for common `make` diagnostics
pub fn suggest_fix(stderr: &str) -> Option<String> {
    if stderr.contains("No such file or directory") {
        return Some("The makefile path does not exist. Check the --path argument.".to_string());
    }

    if stderr.contains("missing separator") {
        return Some(
            "Recipe lines must start with a tab character, not spaces.".to_string(),
        );
    }

    if stderr.contains("No rule to make target") {
        return Some(
            "A prerequisite is missing. The database dump may still be incomplete.".to_string(),
        );
    }

    if stderr.contains("Permission denied") {
        return Some(
            "Permission denied. Check file permissions on the makefile and its directory."
                .to_string(),
        );
    }

    None
}
