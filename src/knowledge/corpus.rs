//! Corpus: the immutable set of entries a MatchEngine scores against
//!
//! Invariants are checked once, at construction. After that the corpus is
//! read-only for its whole lifetime.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::errors::{AskError, Result};
use crate::knowledge::types::KnowledgeEntry;

/// Validated, read-only collection of knowledge entries
#[derive(Debug, Clone)]
pub struct Corpus {
    entries: Vec<KnowledgeEntry>,
}

/// On-disk TOML layout: a list of `[[entries]]` tables
#[derive(Debug, Deserialize)]
struct CorpusFile {
    entries: Vec<KnowledgeEntry>,
}

impl Corpus {
    /// Build a corpus, rejecting empty corpora, keywordless entries and
    /// duplicate questions.
    pub fn new(entries: Vec<KnowledgeEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(AskError::InvalidCorpus(
                "corpus must contain at least one entry".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.question.is_empty() {
                return Err(AskError::InvalidCorpus(
                    "entry question must not be blank".to_string(),
                ));
            }
            if entry.keywords.is_empty() {
                return Err(AskError::InvalidCorpus(format!(
                    "entry '{}' has no keywords",
                    entry.question
                )));
            }
            if !seen.insert(entry.question.as_str()) {
                return Err(AskError::InvalidCorpus(format!(
                    "duplicate question '{}'",
                    entry.question
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Load a corpus from a `.toml` or `.json` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AskError::InvalidCorpus(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let entries: Vec<KnowledgeEntry> = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&contents).map_err(|e| {
                AskError::InvalidCorpus(format!("Failed to parse {}: {}", path.display(), e))
            })?,
            Some("toml") => {
                let file: CorpusFile = toml::from_str(&contents).map_err(|e| {
                    AskError::InvalidCorpus(format!("Failed to parse {}: {}", path.display(), e))
                })?;
                file.entries
            }
            _ => {
                return Err(AskError::InvalidCorpus(format!(
                    "Unsupported corpus format: {}",
                    path.display()
                )))
            }
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded corpus file");
        Self::new(entries.into_iter().map(KnowledgeEntry::normalized).collect())
    }

    /// The professional-advice corpus shipped with the binary
    pub fn builtin() -> Self {
        let entries = vec![
            KnowledgeEntry::new(
                "how can i improve team productivity",
                "Use daily stand-ups, set clear OKRs, and encourage time-blocking.",
                ["productivity", "team", "improve", "efficiency"],
            ),
            KnowledgeEntry::new(
                "tips for remote work",
                "Maintain a fixed schedule, use video check-ins, and set clear boundaries.",
                ["remote", "work", "tips", "home office"],
            ),
            KnowledgeEntry::new(
                "how to prioritize tasks",
                "Use the Eisenhower Matrix: urgent-important, not urgent-important, etc.",
                ["prioritize", "tasks", "matrix", "time management"],
            ),
            KnowledgeEntry::new(
                "how to manage startup funding",
                "Track runway, maintain investor relations, and plan funding rounds early.",
                ["startup", "funding", "finance", "investors"],
            ),
            KnowledgeEntry::new(
                "best practices for code review",
                "Keep reviews small, provide constructive feedback, and focus on the code not the person.",
                ["code review", "practices", "development", "quality"],
            ),
            KnowledgeEntry::new(
                "how to handle project deadlines",
                "Break large tasks into smaller milestones, communicate risks early, and maintain buffer time.",
                ["deadlines", "project", "time management", "planning"],
            ),
            KnowledgeEntry::new(
                "ways to boost employee engagement",
                "Provide regular feedback, recognize achievements, offer growth opportunities, and create a positive work culture.",
                ["engagement", "employees", "motivation", "culture"],
            ),
            KnowledgeEntry::new(
                "how to scale a tech team",
                "Establish clear processes, invest in documentation, and hire for cultural fit.",
                ["scale", "team", "tech", "growth"],
            ),
            KnowledgeEntry::new(
                "what are good leadership skills",
                "Good leaders communicate clearly, show empathy, make decisive decisions, and empower their team.",
                ["leadership", "skills", "management", "communication"],
            ),
            KnowledgeEntry::new(
                "how to manage stress at work",
                "Take regular breaks, practice time management, exercise regularly, and maintain work-life balance.",
                ["stress", "work", "management", "wellness"],
            ),
        ];

        Self { entries }
    }

    /// Entries in corpus order
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
