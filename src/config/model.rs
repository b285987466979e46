//! Settings that control how `make` is found and run

use std::ffi::OsString;

use serde::{Deserialize, Serialize};

use crate::error::BuilderError;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// How `make` is located and invoked
    #[serde(default)]
    pub make: MakeConfig,
}

/// Make invocation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MakeConfig {
    /// Executable used for the database dump and looked up by the planner
    #[serde(default = "default_make_program")]
    pub program: String,

    /// Directories searched for `program`, in `PATH` syntax.
    /// Falls back to the `PATH` environment variable when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_path: Option<String>,
}

fn default_make_program() -> String {
    "make".to_string()
}

impl Default for MakeConfig {
    fn default() -> Self {
        Self {
            program: default_make_program(),
            search_path: None,
        }
    }
}

impl Config {
    /// Resolve the search path handed to the planner
    ///
    /// A configured `search_path` has `~`, `$VAR` and `${VAR}` expanded.
    ///
    /// # Errors
    /// * `BuilderError::Config` - If the configured value references an unset variable
    pub fn search_path(&self) -> Result<OsString, BuilderError> {
        match &self.make.search_path {
            Some(raw) => shellexpand::full(raw)
                .map(|expanded| OsString::from(expanded.as_ref()))
                .map_err(|e| BuilderError::Config(format!("make.search_path: {}", e))),
            None => Ok(std::env::var_os("PATH").unwrap_or_default()),
        }
    }
}
