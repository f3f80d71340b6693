//! MatchEngine: weighted lexical matching of a query against the corpus
//!
//! Scoring per entry:
//! - keyword found as a literal substring of the query: +3
//! - otherwise, any word of the keyword among the query tokens: +1
//! - each distinct word shared by the query and the entry question: +2
//!
//! An exact (normalized) question match short-circuits with confidence 100.
//! Otherwise the highest scoring entry wins if it reaches the threshold;
//! ties keep the earliest entry in corpus order.

use std::collections::HashSet;

use crate::knowledge::corpus::Corpus;
use crate::knowledge::types::{normalize, KnowledgeEntry, MatchResult};

/// Confidence reported for an exact question match
pub const EXACT_MATCH_CONFIDENCE: u32 = 100;
/// Minimum weighted score for a keyword match to be used
pub const MATCH_THRESHOLD: u32 = 4;
/// Keyword appears verbatim in the query
pub const PHRASE_WEIGHT: u32 = 3;
/// Some word of the keyword appears among the query tokens
pub const PARTIAL_WEIGHT: u32 = 1;
/// Per distinct word shared with the entry question
pub const QUESTION_WORD_WEIGHT: u32 = 2;

/// Normalized query, computed once per match
struct Query<'q> {
    text: &'q str,
    tokens: HashSet<&'q str>,
}

impl<'q> Query<'q> {
    fn new(text: &'q str) -> Self {
        Self {
            text,
            tokens: text.split_whitespace().collect(),
        }
    }
}

/// Pure, read-only matcher over an immutable corpus
#[derive(Debug, Clone)]
pub struct MatchEngine {
    corpus: Corpus,
}

impl MatchEngine {
    /// Create an engine over a validated corpus
    pub fn new(corpus: Corpus) -> Self {
        Self { corpus }
    }

    /// Create an engine over the built-in corpus
    pub fn with_builtin() -> Self {
        Self::new(Corpus::builtin())
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Find the single best entry for `query`
    pub fn find_best_match(&self, query: &str) -> MatchResult<'_> {
        let normalized = normalize(query);

        if let Some(entry) = self
            .corpus
            .entries()
            .iter()
            .find(|entry| entry.question == normalized)
        {
            tracing::debug!(question = %entry.question, "exact question match");
            return MatchResult::hit(entry, EXACT_MATCH_CONFIDENCE);
        }

        let query = Query::new(&normalized);
        let mut best: Option<(&KnowledgeEntry, u32)> = None;

        for entry in self.corpus.entries() {
            let score = score_entry(entry, &query);
            // Strict comparison keeps the first entry on ties
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((entry, score));
            }
        }

        match best {
            Some((entry, score)) if score >= MATCH_THRESHOLD => {
                tracing::debug!(question = %entry.question, score, "keyword match");
                MatchResult::hit(entry, score)
            }
            Some((entry, score)) => {
                tracing::debug!(
                    question = %entry.question,
                    score,
                    threshold = MATCH_THRESHOLD,
                    "best candidate below threshold"
                );
                MatchResult::miss()
            }
            None => MatchResult::miss(),
        }
    }

    /// Weighted score of a single entry for `query`, without the exact
    /// match shortcut or the threshold
    pub fn score(&self, entry: &KnowledgeEntry, query: &str) -> u32 {
        let normalized = normalize(query);
        score_entry(entry, &Query::new(&normalized))
    }
}

fn score_entry(entry: &KnowledgeEntry, query: &Query<'_>) -> u32 {
    let keyword_score: u32 = entry
        .keywords
        .iter()
        .map(|keyword| {
            if query.text.contains(keyword.as_str()) {
                PHRASE_WEIGHT
            } else if keyword
                .split_whitespace()
                .any(|word| query.tokens.contains(word))
            {
                PARTIAL_WEIGHT
            } else {
                0
            }
        })
        .sum();

    let question_words: HashSet<&str> = entry.question.split_whitespace().collect();
    let shared = query.tokens.intersection(&question_words).count() as u32;

    keyword_score + shared * QUESTION_WORD_WEIGHT
}
