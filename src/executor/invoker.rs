//! Synchronous command execution with output capture
//!
//! The database dump is the only subprocess this tool runs. It blocks until
//! `make` exits; no timeout is imposed.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::error::BuilderError;

/// Captured result of running a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvokeOutput {
    /// Standard output, lossily decoded
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
    /// Exit code, or the negated signal number if the child was killed
    pub return_code: i32,
}

impl InvokeOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, return_code: i32) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            return_code,
        }
    }
}

/// Runs a program to completion and hands back everything it printed.
///
/// A nonzero exit status is not an error at this level: callers decide what
/// the captured streams mean.
#[cfg_attr(test, mockall::automock)]
pub trait Invoker {
    /// Run `program` with `args` inside `cwd`
    ///
    /// # Errors
    /// * `BuilderError::SpawnFailed` - If the program could not be started
    fn invoke(&self, program: &str, args: &[String], cwd: &Path)
        -> Result<InvokeOutput, BuilderError>;
}

/// [`Invoker`] backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInvoker;

impl Invoker for SystemInvoker {
    fn invoke(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> Result<InvokeOutput, BuilderError> {
        let command_str = command_line(program, args);

        tracing::debug!("Executing: {} (in {})", command_str, cwd.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| BuilderError::SpawnFailed {
                command: command_str.clone(),
                error: e.to_string(),
            })?;

        let return_code = return_code(output.status);
        tracing::debug!(
            "{} exited with {} ({} bytes stdout, {} bytes stderr)",
            program,
            return_code,
            output.stdout.len(),
            output.stderr.len()
        );

        Ok(InvokeOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            return_code,
        })
    }
}

/// Render a command line the way it is reported back to the host
pub fn command_line(program: &str, args: &[String]) -> String {
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(program);
    parts.extend(args.iter().map(String::as_str));
    parts.join(" ")
}

fn return_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}
