//! CLI module organization
//!
//! - args: argument structures
//! - commands: command execution
//! - output: result rendering

pub mod args;
pub mod commands;
pub mod output;

pub use args::*;
pub use commands::*;
