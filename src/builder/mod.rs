//! Build tool adapters
//!
//! Answers the three host requests for GNU Make:
//! - describe the tool
//! - recover targets and variables from a makefile's database dump
//! - plan a build of one target

pub mod database;
pub mod make;
pub mod planner;
pub mod traits;

pub use database::{parse_targets, parse_variables, DatabaseParser};
pub use make::{describe, MakeTool};
pub use planner::InvocationPlanner;
pub use traits::*;
