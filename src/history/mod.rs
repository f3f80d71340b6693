//! Chat history: a bounded, persisted log of past interactions

pub mod store;
pub mod types;

pub use store::{HistoryStore, MAX_HISTORY_ENTRIES};
pub use types::{AnswerSource, HistoryEntry, HistoryStats};
