//! Command execution module
//!
//! Runs `make` synchronously with captured output behind the [`Invoker`]
//! trait so the database parser can be driven by canned dumps in tests.

pub mod invoker;

pub use invoker::*;
