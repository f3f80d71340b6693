//! askbase - knowledge base answers with a bounded chat history
//!
//! # Architecture
//!
//! - **knowledge**: immutable corpus + weighted keyword MatchEngine
//! - **history**: capacity-bounded, atomically persisted interaction log
//! - **assistant**: caller-side composition of the two with an optional
//!   external generator

pub mod errors;

// Re-export commonly used types
pub use errors::{AskError, Result};

pub mod knowledge;
pub mod history;
pub mod assistant;

pub mod cli;
pub mod config;

pub use assistant::{Assistant, Generator, Reply};
pub use history::{AnswerSource, HistoryEntry, HistoryStore};
pub use knowledge::{Corpus, KnowledgeEntry, MatchEngine, MatchResult};
