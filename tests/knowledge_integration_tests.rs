//! Integration tests for knowledge base matching

#[cfg(test)]
mod builtin_corpus_tests {
    use askbase::knowledge::{MatchEngine, EXACT_MATCH_CONFIDENCE, MATCH_THRESHOLD};

    #[test]
    fn test_exact_question_ignores_case_and_padding() {
        let engine = MatchEngine::with_builtin();
        let result = engine.find_best_match("\tHOW TO SCALE A TECH TEAM  ");

        assert!(result.matched);
        assert_eq!(result.confidence, EXACT_MATCH_CONFIDENCE);
        assert!(result.answer.unwrap().contains("documentation"));
    }

    #[test]
    fn test_paraphrase_matches() {
        let engine = MatchEngine::with_builtin();
        let result = engine.find_best_match("how do I handle stress at my job");

        assert!(result.matched);
        assert!(result.confidence >= MATCH_THRESHOLD);
        assert_eq!(
            result.source_entry.unwrap().question,
            "how to manage stress at work"
        );
    }

    #[test]
    fn test_unrelated_question_misses() {
        let engine = MatchEngine::with_builtin();
        let result = engine.find_best_match("what is the capital of peru");

        assert!(!result.matched);
        assert_eq!(result.confidence, 0);
        assert!(result.answer.is_none());
    }

    #[test]
    fn test_confidence_for_remote_work() {
        let engine = MatchEngine::with_builtin();
        assert_eq!(engine.find_best_match("any tips for remote work?").confidence, 15);
    }
}

#[cfg(test)]
mod custom_corpus_tests {
    use askbase::knowledge::{Corpus, KnowledgeEntry, MatchEngine};

    #[test]
    fn test_independent_corpora() {
        let a = MatchEngine::new(
            Corpus::new(vec![KnowledgeEntry::new("reset password", "Use the portal.", ["password"])])
                .unwrap(),
        );
        let b = MatchEngine::new(
            Corpus::new(vec![KnowledgeEntry::new("book a room", "Use the calendar.", ["room"])])
                .unwrap(),
        );

        assert!(a.find_best_match("reset password").matched);
        assert!(!b.find_best_match("reset password").matched);
    }

    #[test]
    fn test_multi_word_keyword_phrase_beats_partial() {
        let engine = MatchEngine::new(
            Corpus::new(vec![KnowledgeEntry::new("q", "A", ["time management"])]).unwrap(),
        );
        let entry = &engine.corpus().entries()[0];

        assert_eq!(engine.score(entry, "time management"), 3);
        assert_eq!(engine.score(entry, "management of time"), 1);
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = std::sync::Arc::new(MatchEngine::with_builtin());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = std::sync::Arc::clone(&engine);
                std::thread::spawn(move || engine.find_best_match("tips for remote work").confidence)
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 100);
        }
    }
}
