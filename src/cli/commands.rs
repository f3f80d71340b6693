//! Subcommand execution for the askbase binary
//!
//! Only `ask` and `match` load the corpus; history commands work even when
//! the configured corpus is missing or broken.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::assistant::Assistant;
use crate::cli::args::Commands;
use crate::config::Config;
use crate::history::HistoryStore;
use crate::knowledge::{KnowledgeEntry, MatchEngine};

/// Run one subcommand against the resolved configuration
pub fn run(command: &Commands, config: &Config) -> Result<()> {
    let history = config.history_store();

    match command {
        Commands::Ask { .. } => {
            let engine = load_engine(config)?;
            let question = command.text().unwrap_or_default();
            run_ask(Assistant::new(engine, history), &question)?;
        }
        Commands::Match { .. } => {
            let engine = load_engine(config)?;
            let query = command.text().unwrap_or_default();
            show_match(&engine, &query);
        }
        Commands::History => show_history(&history)?,
        Commands::Clear => {
            if history.clear() {
                println!("{}", "✓ Chat history cleared".green());
            } else {
                anyhow::bail!("Failed to clear chat history at {}", history.path().display());
            }
        }
        Commands::Stats => show_stats(&history)?,
    }

    Ok(())
}

fn load_engine(config: &Config) -> Result<MatchEngine> {
    config.match_engine().context("Failed to load corpus")
}

fn run_ask(assistant: Assistant, question: &str) -> Result<()> {
    let reply = assistant.answer(question)?;

    println!("{}", reply.answer);
    println!(
        "{}",
        format!("source: {}  confidence: {}", reply.source, reply.confidence).dimmed()
    );
    Ok(())
}

fn show_match(engine: &MatchEngine, query: &str) {
    let result = engine.find_best_match(query);

    if result.matched {
        println!("{} confidence {}", "✓ match".green().bold(), result.confidence);
    } else {
        println!("{} confidence {}", "✗ no match".yellow().bold(), result.confidence);
    }

    if let Some(KnowledgeEntry { question, keywords, .. }) = result.source_entry {
        println!("  question: {}", question.cyan());
        println!("  keywords: {}", keywords.join(", "));
    }
    if let Some(answer) = &result.answer {
        println!("  answer:   {}", answer);
    }
}

fn show_history(history: &HistoryStore) -> Result<()> {
    let entries = history.load()?;

    if entries.is_empty() {
        println!("{}", "No history yet".dimmed());
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{} {}",
            entry.timestamp.dimmed(),
            format!("[{}]", entry.source).cyan()
        );
        println!("  {} {}", "Q:".bold(), entry.question);
        println!("  {} {}", "A:".bold(), entry.answer);
    }
    println!("\n{} entries", entries.len());
    Ok(())
}

fn show_stats(history: &HistoryStore) -> Result<()> {
    let stats = history.stats()?;

    println!("{}", "Chat statistics".bold());
    println!("  total conversations:       {}", stats.total_conversations);
    println!("  generator responses:       {}", stats.generated_responses);
    println!("  knowledge base responses:  {}", stats.knowledge_base_responses);
    println!("  fallback responses:        {}", stats.fallback_responses);
    if stats.other_responses > 0 {
        println!("  other:                     {}", stats.other_responses);
    }
    Ok(())
}
