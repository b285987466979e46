//! make-builder CLI entry point
//!
//! Usage:
//!   make-builder                                      Describe the tool
//!   make-builder --path <makefile>                    List targets and variables
//!   make-builder --path <makefile> --target <t> [..]  Plan a build of <t>

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use make_builder::builder::{BuildTool, MakeTool};
use make_builder::cli::{Cli, Request};
use make_builder::config::load_config;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; stdout carries the JSON document only
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let tool = MakeTool::new(config);

    let json = respond(&tool, &cli.request())?;
    println!("{}", json);

    Ok(())
}

/// Answer one request with a compact JSON document
fn respond(tool: &impl BuildTool, request: &Request) -> Result<String> {
    let json = match request {
        Request::ToolInfo => serde_json::to_string(&tool.describe()),
        Request::BuildInfo { path } => {
            tracing::debug!("Reading make database for {}", path);
            serde_json::to_string(&tool.build_info(path))
        }
        Request::BuildCommand {
            path,
            target,
            flags,
        } => {
            tracing::debug!("Planning target '{}' of {}", target, path);
            serde_json::to_string(&tool.build_command(path, target, flags))
        }
    };

    json.context("Failed to serialize response")
}
