//! Assistant: composes the MatchEngine, an optional Generator and the
//! HistoryStore into a single question/answer call
//!
//! The knowledge base is consulted first. A confident match is either the
//! answer itself or context for the generator. Whatever path produces the
//! answer, the interaction is recorded in history.

use crate::errors::{AskError, Result};
use crate::history::{AnswerSource, HistoryStore};
use crate::knowledge::MatchEngine;

/// Reply used when neither the knowledge base nor a generator can answer
pub const FALLBACK_ANSWER: &str = "I'm having trouble processing your question right now. \
Could you please try rephrasing it or ask about productivity, remote work, \
or professional development topics?";

/// Narrow interface to an external text generator
pub trait Generator: Send + Sync {
    /// Produce an answer, optionally grounded on knowledge base `context`
    fn generate(&self, question: &str, context: Option<&str>) -> anyhow::Result<String>;
}

/// Answer returned to the caller, mirroring what was recorded
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub question: String,
    pub answer: String,
    pub source: AnswerSource,
    /// Knowledge base confidence for the question, 0 on a miss
    pub confidence: u32,
}

pub struct Assistant {
    engine: MatchEngine,
    history: HistoryStore,
    generator: Option<Box<dyn Generator>>,
}

impl Assistant {
    /// Knowledge-base-only assistant
    pub fn new(engine: MatchEngine, history: HistoryStore) -> Self {
        Self {
            engine,
            history,
            generator: None,
        }
    }

    /// Attach a generator
    pub fn with_generator(mut self, generator: Box<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Answer `question` and record the interaction
    pub fn answer(&self, question: &str) -> Result<Reply> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AskError::EmptyQuestion);
        }

        let result = self.engine.find_best_match(question);
        tracing::info!(
            confidence = result.confidence,
            matched = result.matched,
            "knowledge base lookup"
        );

        let kb_answer = result.answer;
        let (answer, source) = match &self.generator {
            None => match kb_answer {
                Some(answer) => (answer, AnswerSource::KnowledgeBase),
                None => (FALLBACK_ANSWER.to_string(), AnswerSource::ErrorFallback),
            },
            Some(generator) => match generator.generate(question, kb_answer.as_deref()) {
                Ok(generated) if kb_answer.is_some() => {
                    (generated, AnswerSource::GeneratorWithKnowledge)
                }
                Ok(generated) => (generated, AnswerSource::GeneratorOnly),
                Err(e) => {
                    tracing::error!(error = %e, "generator failed");
                    match kb_answer {
                        Some(answer) => (answer, AnswerSource::KnowledgeFallback),
                        None => (FALLBACK_ANSWER.to_string(), AnswerSource::ErrorFallback),
                    }
                }
            },
        };

        self.history.append(question, answer.as_str(), source.as_str())?;
        tracing::info!(source = %source, "response recorded");

        Ok(Reply {
            question: question.to_string(),
            answer,
            source,
            confidence: result.confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Records the context it was handed and echoes a fixed reply
    struct RecordingGenerator {
        seen: Arc<Mutex<Vec<Option<String>>>>,
        fail: bool,
    }

    impl Generator for RecordingGenerator {
        fn generate(&self, question: &str, context: Option<&str>) -> anyhow::Result<String> {
            self.seen.lock().unwrap().push(context.map(str::to_string));
            if self.fail {
                anyhow::bail!("provider unavailable");
            }
            Ok(format!("generated: {}", question))
        }
    }

    fn create_test_assistant() -> (Assistant, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let history = HistoryStore::new(temp_dir.path().join("chat_history.json"));
        (Assistant::new(MatchEngine::with_builtin(), history), temp_dir)
    }

    fn generator(fail: bool) -> (Box<dyn Generator>, Arc<Mutex<Vec<Option<String>>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let generator = RecordingGenerator {
            seen: Arc::clone(&seen),
            fail,
        };
        (Box::new(generator), seen)
    }

    #[test]
    fn test_empty_question_rejected() {
        let (assistant, _temp) = create_test_assistant();
        assert!(matches!(assistant.answer("   "), Err(AskError::EmptyQuestion)));
        assert_eq!(assistant.history().count().unwrap(), 0);
    }

    #[test]
    fn test_knowledge_base_answer() {
        let (assistant, _temp) = create_test_assistant();
        let reply = assistant.answer("How to prioritize tasks").unwrap();

        assert_eq!(reply.source, AnswerSource::KnowledgeBase);
        assert_eq!(reply.confidence, 100);
        assert!(reply.answer.contains("Eisenhower"));

        let history = assistant.history().load().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].source, "kb");
    }

    #[test]
    fn test_fallback_without_match() {
        let (assistant, _temp) = create_test_assistant();
        let reply = assistant.answer("asdlkfj").unwrap();

        assert_eq!(reply.source, AnswerSource::ErrorFallback);
        assert_eq!(reply.answer, FALLBACK_ANSWER);
        assert_eq!(assistant.history().load().unwrap()[0].source, "error_fallback");
    }

    #[test]
    fn test_generator_receives_kb_context() {
        let (assistant, _temp) = create_test_assistant();
        let (boxed, seen) = generator(false);
        let assistant = assistant.with_generator(boxed);

        let reply = assistant.answer("any tips for remote work?").unwrap();
        assert_eq!(reply.source, AnswerSource::GeneratorWithKnowledge);
        assert_eq!(reply.answer, "generated: any tips for remote work?");

        let contexts = seen.lock().unwrap();
        assert!(contexts[0].as_deref().unwrap().contains("fixed schedule"));
    }

    #[test]
    fn test_generator_without_context() {
        let (assistant, _temp) = create_test_assistant();
        let (boxed, seen) = generator(false);
        let assistant = assistant.with_generator(boxed);

        let reply = assistant.answer("asdlkfj").unwrap();
        assert_eq!(reply.source, AnswerSource::GeneratorOnly);
        assert_eq!(seen.lock().unwrap()[0], None);
    }

    #[test]
    fn test_below_threshold_candidate_gives_no_context() {
        let (assistant, _temp) = create_test_assistant();
        let (boxed, seen) = generator(false);
        let assistant = assistant.with_generator(boxed);

        // "wellness" is a keyword of the stress entry but scores only 3
        let reply = assistant.answer("wellness").unwrap();
        assert_eq!(reply.source, AnswerSource::GeneratorOnly);
        assert_eq!(reply.confidence, 0);
        assert_eq!(seen.lock().unwrap()[0], None);
    }

    #[test]
    fn test_generator_failure_falls_back_to_kb() {
        let (assistant, _temp) = create_test_assistant();
        let (boxed, _seen) = generator(true);
        let assistant = assistant.with_generator(boxed);

        let reply = assistant.answer("tips for remote work").unwrap();
        assert_eq!(reply.source, AnswerSource::KnowledgeFallback);
        assert!(reply.answer.contains("fixed schedule"));

        let reply = assistant.answer("asdlkfj").unwrap();
        assert_eq!(reply.source, AnswerSource::ErrorFallback);

        let stats = assistant.history().stats().unwrap();
        assert_eq!(stats.knowledge_base_responses, 1);
        assert_eq!(stats.fallback_responses, 1);
    }

    #[test]
    fn test_question_is_trimmed_before_recording() {
        let (assistant, _temp) = create_test_assistant();
        assistant.answer("  tips for remote work \n").unwrap();
        assert_eq!(
            assistant.history().load().unwrap()[0].question,
            "tips for remote work"
        );
    }
}
