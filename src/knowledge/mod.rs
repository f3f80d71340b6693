//! Knowledge base matching
//!
//! Components:
//! - Corpus: validated, immutable question/answer entries
//! - MatchEngine: weighted keyword scoring with an exact-match shortcut

pub mod corpus;
pub mod matcher;
pub mod types;

pub use corpus::Corpus;
pub use matcher::{MatchEngine, EXACT_MATCH_CONFIDENCE, MATCH_THRESHOLD};
pub use types::{normalize, KnowledgeEntry, MatchResult};
