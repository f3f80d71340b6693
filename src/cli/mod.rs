//! CLI module for askbase
//!
//! Handles command-line argument parsing and subcommand execution.

pub mod args;
pub mod commands;

pub use args::{Args, Commands};
