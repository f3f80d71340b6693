//! Core data types for the chat history log

use serde::{Deserialize, Serialize};
use std::fmt;

/// One recorded interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question: String,
    pub answer: String,
    /// ISO-8601 local date-time, kept as text so its format round-trips
    pub timestamp: String,
    /// Opaque tag naming the path that produced the answer
    pub source: String,
}

impl HistoryEntry {
    /// Create an entry stamped with the current local time
    pub fn new(question: impl Into<String>, answer: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            timestamp: chrono::Local::now()
                .naive_local()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            source: source.into(),
        }
    }
}

/// Tags recorded by the assistant for each answer path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerSource {
    /// Knowledge base answer used as-is
    KnowledgeBase,
    /// Generator answer grounded on a knowledge base match
    GeneratorWithKnowledge,
    /// Generator answer without knowledge base context
    GeneratorOnly,
    /// Generator failed, knowledge base answer used instead
    KnowledgeFallback,
    /// Nothing usable, canned reply
    ErrorFallback,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerSource::KnowledgeBase => "kb",
            AnswerSource::GeneratorWithKnowledge => "llm_with_kb",
            AnswerSource::GeneratorOnly => "llm_only",
            AnswerSource::KnowledgeFallback => "kb_fallback",
            AnswerSource::ErrorFallback => "error_fallback",
        }
    }

    /// Parse a recorded tag; unknown tags yield `None`
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "kb" => Some(AnswerSource::KnowledgeBase),
            "llm_with_kb" => Some(AnswerSource::GeneratorWithKnowledge),
            "llm_only" => Some(AnswerSource::GeneratorOnly),
            "kb_fallback" => Some(AnswerSource::KnowledgeFallback),
            "error_fallback" => Some(AnswerSource::ErrorFallback),
            _ => None,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(
            self,
            AnswerSource::GeneratorWithKnowledge | AnswerSource::GeneratorOnly
        )
    }

    pub fn is_knowledge_base(&self) -> bool {
        matches!(
            self,
            AnswerSource::KnowledgeBase | AnswerSource::KnowledgeFallback
        )
    }
}

impl fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-source tallies over the current history log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total_conversations: usize,
    pub generated_responses: usize,
    pub knowledge_base_responses: usize,
    pub fallback_responses: usize,
    /// Tags this crate does not know about
    pub other_responses: usize,
}

impl HistoryStats {
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        let mut stats = HistoryStats {
            total_conversations: entries.len(),
            ..Default::default()
        };

        for entry in entries {
            match AnswerSource::parse(&entry.source) {
                Some(source) if source.is_generated() => stats.generated_responses += 1,
                Some(source) if source.is_knowledge_base() => stats.knowledge_base_responses += 1,
                Some(_) => stats.fallback_responses += 1,
                None => stats.other_responses += 1,
            }
        }

        stats
    }
}
