//! Common traits and types for build tool adapters
//!
//! Defines the three requests a host can make of a build tool and the JSON
//! documents that answer them.

use serde::Serialize;

use crate::error::BuilderError;

/// Result type for builder operations
pub type BuilderResult<T> = Result<T, BuilderError>;

/// A variable binding as `[name, value]`
pub type Variable = (String, String);

/// Static capability metadata for a build tool
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ToolDescriptor {
    /// Tool name
    pub name: &'static str,
    /// File name patterns the tool recognises
    pub globs: &'static [&'static str],
}

/// Targets and variables recovered from one build file
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BuildFileReport {
    /// Empty on success
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<Variable>>,
}

impl BuildFileReport {
    /// Create a successful report
    pub fn success(targets: Vec<String>, variables: Vec<Variable>) -> Self {
        Self {
            error: String::new(),
            targets: Some(targets),
            variables: Some(variables),
        }
    }

    /// Create a failed report carrying only the error message
    pub fn failure(err: &BuilderError) -> Self {
        Self {
            error: err.to_string(),
            targets: None,
            variables: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }
}

/// How the host should run a build: executable, working directory, arguments
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InvocationPlan {
    /// Empty on success
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
    /// Absolute path to the executable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
}

impl InvocationPlan {
    /// Create a successful plan
    pub fn success(cwd: impl Into<String>, tool: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            error: String::new(),
            cwd: Some(cwd.into()),
            tool: Some(tool.into()),
            args: Some(args),
        }
    }

    /// Create a failed plan carrying only the error message
    pub fn failure(err: &BuilderError) -> Self {
        Self {
            error: err.to_string(),
            cwd: None,
            tool: None,
            args: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }
}

/// Trait for build tool adapters
///
/// Each request is answered with a document rather than a `Result`: failures
/// travel to the host inside the document's `error` field.
pub trait BuildTool {
    /// Describe the tool itself
    fn describe(&self) -> ToolDescriptor;

    /// Recover targets and variables from a build file
    ///
    /// # Arguments
    /// * `path` - Path to the build file; `~` is expanded
    fn build_info(&self, path: &str) -> BuildFileReport;

    /// Plan a build of one target
    ///
    /// # Arguments
    /// * `path` - Path to the build file; `~` is expanded
    /// * `target` - Target to build
    /// * `flags` - Extra arguments appended verbatim after the target
    fn build_command(&self, path: &str, target: &str, flags: &[String]) -> InvocationPlan;
}
