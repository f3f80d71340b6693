//! Command-line argument parsing for askbase
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// askbase - Answer questions from a keyworded knowledge base
#[derive(Parser, Debug)]
#[command(name = "askbase")]
#[command(version)]
#[command(about = "Answer questions from a keyworded knowledge base and keep a short history", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// History file (overrides the configured path)
    #[arg(long)]
    pub history_file: Option<PathBuf>,

    /// Corpus file, .toml or .json (overrides the configured corpus)
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Verbosity level: default (config level), -v (debug), -vv (trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a question and record it in history
    Ask {
        /// The question to answer
        #[arg(value_name = "QUESTION", num_args = 1.., required = true)]
        question: Vec<String>,
    },

    /// Show the knowledge base match for a query without recording it
    Match {
        /// The query to score
        #[arg(value_name = "QUERY", num_args = 1.., required = true)]
        query: Vec<String>,
    },

    /// Show recorded history, oldest first
    History,

    /// Delete all recorded history
    Clear,

    /// Show per-source response counts
    Stats,
}

impl Args {
    /// Log filter directive for the requested verbosity, if it overrides config
    pub fn log_level_override(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        }
    }
}

impl Commands {
    /// Words given on the command line joined back into one string
    pub fn text(&self) -> Option<String> {
        match self {
            Commands::Ask { question } => Some(question.join(" ")),
            Commands::Match { query } => Some(query.join(" ")),
            _ => None,
        }
    }
}
