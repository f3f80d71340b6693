//! Core data types for knowledge base matching

use serde::{Deserialize, Serialize};

/// Lowercase and trim, the normalization shared by queries and corpus text
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// A canonical question with its answer and topical keywords
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Normalized canonical phrasing
    pub question: String,
    /// Response text
    pub answer: String,
    /// Words or short phrases, normalized
    pub keywords: Vec<String>,
}

impl KnowledgeEntry {
    /// Create an entry, normalizing the question and keywords.
    /// Blank keywords are dropped.
    pub fn new<Q, A, K, S>(question: Q, answer: A, keywords: K) -> Self
    where
        Q: AsRef<str>,
        A: Into<String>,
        K: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            question: normalize(question.as_ref()),
            answer: answer.into(),
            keywords: keywords
                .into_iter()
                .map(|k| normalize(k.as_ref()))
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Re-apply normalization, for entries that came straight from serde
    pub(crate) fn normalized(self) -> Self {
        Self::new(self.question, self.answer, self.keywords)
    }
}

/// Outcome of matching one query against the corpus
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub matched: bool,
    pub answer: Option<String>,
    /// Weighted score; 100 is reserved for exact question matches
    pub confidence: u32,
    /// Entry that produced the match, for diagnostics
    pub source_entry: Option<&'a KnowledgeEntry>,
}

impl<'a> MatchResult<'a> {
    /// Result for a query that cleared the threshold (or matched exactly)
    pub fn hit(entry: &'a KnowledgeEntry, confidence: u32) -> Self {
        Self {
            matched: true,
            answer: Some(entry.answer.clone()),
            confidence,
            source_entry: Some(entry),
        }
    }

    /// Result for a query with no usable candidate
    pub fn miss() -> Self {
        Self {
            matched: false,
            answer: None,
            confidence: 0,
            source_entry: None,
        }
    }
}
