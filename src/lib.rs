//! make-builder - Makefile adapter for editor build integration
//!
//! Lets an editor or IDE ask about and drive `make` without understanding
//! Makefile syntax. Each invocation answers one request with one JSON
//! document on stdout:
//!
//! - **tool info** - name of the tool and the file names it handles
//! - **build info** - targets and variables recovered from
//!   `make --dry-run --print-data-base`
//! - **build command** - executable, working directory and arguments for
//!   building a target (the host runs it)

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;

pub use builder::{
    describe, parse_targets, parse_variables, BuildFileReport, BuildTool, DatabaseParser,
    InvocationPlan, InvocationPlanner, MakeTool, ToolDescriptor,
};
pub use cli::{Cli, Request};
pub use config::Config;
pub use error::BuilderError;
pub use executor::{InvokeOutput, Invoker, SystemInvoker};
