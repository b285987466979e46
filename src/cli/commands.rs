//! CLI definition using clap

use clap::Parser;

/// Used by editors to interact with Makefiles.
///
/// Prints one JSON document describing the tool, a makefile's targets and
/// variables, or the command line for building a target.
#[derive(Parser, Debug)]
#[command(name = "make-builder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(long)]
    pub verbose: bool,

    /// Config file to merge over the default locations
    #[arg(long)]
    pub config: Option<String>,

    /// Path to the Makefile
    #[arg(long)]
    pub path: Option<String>,

    /// Name of the Makefile target to build
    #[arg(long)]
    pub target: Option<String>,

    /// Extra arguments passed to make after the target
    ///
    /// This tool has no short options, so make's own `-v`, `-c` etc. land here.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub flags: Vec<String>,
}

/// The request selected by the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Describe the tool
    ToolInfo,
    /// Report targets and variables of a makefile
    BuildInfo { path: String },
    /// Plan a build of one target
    BuildCommand {
        path: String,
        target: String,
        flags: Vec<String>,
    },
}

impl Cli {
    /// Work out which request the flags select
    ///
    /// `--target` without `--path` falls back to tool info.
    pub fn request(&self) -> Request {
        match (&self.path, &self.target) {
            (Some(path), Some(target)) => Request::BuildCommand {
                path: path.clone(),
                target: target.clone(),
                flags: self.flags.clone(),
            },
            (Some(path), None) => Request::BuildInfo { path: path.clone() },
            (None, _) => Request::ToolInfo,
        }
    }
}
