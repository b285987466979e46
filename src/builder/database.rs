//! Makefile database parser
//!
//! `make --dry-run --print-data-base` prints make's internal database in an
//! undocumented, version-dependent text format. Targets and variables are
//! recovered from it with two regex heuristics over the raw text rather than
//! a structural parse.
//!
//! # Known gaps
//!
//! - Rules declaring several targets before the colon are skipped.
//! - Targets whose first prerequisite starts with anything other than a
//!   letter or `#` are skipped.
//! - Targets containing `/` are dropped.
//! - Nothing is deduplicated; a target listed in two database sections is
//!   reported twice.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use super::make::{expand_home, TOOL_NAME};
use super::traits::{BuildFileReport, BuilderResult, Variable};
use crate::error::{suggest_fix, BuilderError};
use crate::executor::{command_line, Invoker, SystemInvoker};

/// Matches `target : rest` at the start of a line, where `rest` begins with a
/// letter, a `#`, or is empty
static TARGET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)\s*\n([^#%=:\r\n\t ]+)\s*:\s*(?:[a-zA-Z#]|$)").unwrap());

/// Matches `NAME = value` on the line right after a `# makefile (from ...)` origin comment
static VARIABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)\n# makefile \(from.+\n([A-Za-z0-9_-]+)\s+=\s+(.+)$").unwrap()
});

/// Text make prints on the line before files it knows about but does not build
const NOT_A_TARGET: &str = " Not a target:";

/// Bookkeeping targets that never name a build output
const RESERVED_TARGETS: [&str; 2] = [".PHONY", ".SUFFIXES"];

/// Extract single-target rule names from a database dump, in dump order
pub fn parse_targets(dump: &str) -> Vec<String> {
    let mut targets = Vec::new();
    let mut pos = 0;

    while let Some(caps) = TARGET_RE.captures_at(dump, pos) {
        let Some(whole) = caps.get(0) else { break };

        if dump[..whole.start()].ends_with(NOT_A_TARGET) {
            // Only this start position is disqualified; later ones may still match
            pos = whole.start()
                + dump[whole.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
            continue;
        }

        let target = &caps[1];
        if is_reportable_target(target) {
            targets.push(target.to_string());
        }
        pos = whole.end();
    }

    targets
}

fn is_reportable_target(target: &str) -> bool {
    !RESERVED_TARGETS.contains(&target) && target != TOOL_NAME && !target.contains('/')
}

/// Extract variables defined by the makefile itself from a database dump
///
/// Default, environment and automatic variables carry a different origin
/// comment and are left out.
pub fn parse_variables(dump: &str) -> Vec<Variable> {
    VARIABLE_RE
        .captures_iter(dump)
        .map(|caps| (caps[1].to_string(), caps[2].trim().to_string()))
        .collect()
}

/// Runs make's database dump for a makefile and extracts targets and variables
pub struct DatabaseParser<I = SystemInvoker> {
    invoker: I,
    program: String,
    /// Resolved location of `program`; spawned instead of the bare name when set
    executable: Option<PathBuf>,
}

impl Default for DatabaseParser<SystemInvoker> {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseParser<SystemInvoker> {
    /// Create a parser using system `make`
    pub fn new() -> Self {
        Self::with_invoker(SystemInvoker)
    }
}

impl<I: Invoker> DatabaseParser<I> {
    /// Create a parser that runs commands through `invoker`
    pub fn with_invoker(invoker: I) -> Self {
        Self {
            invoker,
            program: TOOL_NAME.to_string(),
            executable: None,
        }
    }

    /// Use a different make executable (e.g. `gmake`)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Spawn the make found at `executable` rather than looking `program` up
    /// on the process `PATH`. Reports still name `program`.
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = Some(executable.into());
        self
    }

    /// Arguments for a dry run that prints the database of `makefile`
    pub fn dump_args(makefile: &str) -> Vec<String> {
        vec![
            "--dry-run".to_string(),
            "--print-data-base".to_string(),
            "--file".to_string(),
            makefile.to_string(),
        ]
    }

    /// Parse the makefile at `path`
    ///
    /// Never fails: problems are reported in the returned document's `error`.
    pub fn parse(&self, path: &str) -> BuildFileReport {
        match self.read_database(path) {
            Ok(dump) => {
                let targets = parse_targets(&dump);
                let variables = parse_variables(&dump);
                tracing::debug!(
                    "Found {} targets and {} variables in {}",
                    targets.len(),
                    variables.len(),
                    path
                );
                BuildFileReport::success(targets, variables)
            }
            Err(e) => {
                tracing::warn!("{}", e);
                BuildFileReport::failure(&e)
            }
        }
    }

    /// Run the dump and return its stdout
    ///
    /// Make can print a usable database and still exit nonzero (e.g. for a
    /// missing prerequisite), so any stdout at all counts as success.
    fn read_database(&self, path: &str) -> BuilderResult<String> {
        let makefile = resolve_makefile(path);
        let makefile = makefile.to_string_lossy();
        let working_dir = working_dir(Path::new(makefile.as_ref()));
        let args = Self::dump_args(&makefile);

        let executable = match &self.executable {
            Some(path) => path.to_string_lossy().into_owned(),
            None => self.program.clone(),
        };
        let output = self.invoker.invoke(&executable, &args, &working_dir)?;

        if !output.stdout.is_empty() {
            if output.return_code != 0 {
                tracing::debug!(
                    "{} exited with {} but printed a database, parsing anyway",
                    self.program,
                    output.return_code
                );
            }
            return Ok(output.stdout);
        }

        let command = command_line(&self.program, &args);

        if !output.stderr.is_empty() {
            if let Some(hint) = suggest_fix(&output.stderr) {
                tracing::warn!("{}", hint);
            }
            return Err(BuilderError::DumpFailed {
                command,
                stderr: output.stderr,
            });
        }

        Err(BuilderError::DumpExited {
            command,
            return_code: output.return_code,
        })
    }
}

/// Expand `~` and anchor relative paths at the current directory, so the
/// `--file` argument still names the makefile once make runs in its directory
fn resolve_makefile(path: &str) -> PathBuf {
    let expanded = PathBuf::from(expand_home(path));
    std::path::absolute(&expanded).unwrap_or(expanded)
}

fn working_dir(makefile: &Path) -> PathBuf {
    match makefile.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
