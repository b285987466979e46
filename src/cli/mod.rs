//! CLI module for make-builder
//!
//! The host selects a request with flags rather than subcommands:
//! - no `--path` - tool info
//! - `--path` - build info
//! - `--path` and `--target` - build command

pub mod commands;

pub use commands::{Cli, Request};
