//! Invocation planning
//!
//! Works out how the host should run `make` for one target. Nothing is
//! executed here.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use super::make::{expand_home, DEFAULT_MAKEFILE, TOOL_NAME};
use super::traits::{BuilderResult, InvocationPlan};
use crate::config::Config;
use crate::error::BuilderError;

/// Locates make on a search path and assembles command lines for it
#[derive(Debug, Clone)]
pub struct InvocationPlanner {
    /// Executable name to look for
    program: String,
    /// Directories to search, in `PATH` syntax
    search_path: OsString,
}

impl InvocationPlanner {
    /// Create a planner searching `search_path` for `make`
    pub fn new(search_path: impl Into<OsString>) -> Self {
        Self {
            program: TOOL_NAME.to_string(),
            search_path: search_path.into(),
        }
    }

    /// Create a planner from the configured program and search path
    ///
    /// # Errors
    /// * `BuilderError::Config` - If the configured search path cannot be expanded
    pub fn from_config(config: &Config) -> BuilderResult<Self> {
        Ok(Self::new(config.search_path()?).with_program(&config.make.program))
    }

    /// Look for a different executable name (e.g. `gmake`)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Find the first executable named after the program on the search path
    ///
    /// # Errors
    /// * `BuilderError::ToolNotFound` - If no search path directory has one
    pub fn locate_tool(&self) -> BuilderResult<PathBuf> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        which::which_in(&self.program, Some(&self.search_path), cwd).map_err(|e| {
            tracing::debug!("{} lookup failed: {}", self.program, e);
            BuilderError::ToolNotFound {
                program: self.program.clone(),
                search_path: self.search_path.to_string_lossy().to_string(),
            }
        })
    }

    /// Plan a build of `target` from the makefile at `path`
    ///
    /// Never fails: problems are reported in the returned document's `error`.
    pub fn plan(&self, path: &str, target: &str, flags: &[String]) -> InvocationPlan {
        match self.try_plan(path, target, flags) {
            Ok(plan) => plan,
            Err(e) => {
                tracing::warn!("{}", e);
                InvocationPlan::failure(&e)
            }
        }
    }

    fn try_plan(&self, path: &str, target: &str, flags: &[String]) -> BuilderResult<InvocationPlan> {
        let tool = self.locate_tool()?;
        let makefile = expand_home(path);
        let cwd = Path::new(&makefile)
            .parent()
            .map(|dir| dir.to_string_lossy().to_string())
            .unwrap_or_default();
        let args = Self::build_args(&makefile, target, flags);

        tracing::debug!("Planned {} {} in '{}'", tool.display(), args.join(" "), cwd);

        Ok(InvocationPlan::success(
            cwd,
            tool.to_string_lossy(),
            args,
        ))
    }

    /// Arguments for building `target` from `makefile`
    ///
    /// `--file=` is only added when the makefile is not named `Makefile`;
    /// flags follow the target in the order given.
    pub fn build_args(makefile: &str, target: &str, flags: &[String]) -> Vec<String> {
        let mut args = Vec::with_capacity(flags.len() + 2);

        if Path::new(makefile).file_name() != Some(OsStr::new(DEFAULT_MAKEFILE)) {
            args.push(format!("--file={}", makefile));
        }
        args.push(target.to_string());
        args.extend(flags.iter().cloned());

        args
    }
}
