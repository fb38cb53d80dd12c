//! Feedback formatting — evaluator judgement to human-readable sections.

use crate::evaluator::{ConjugationTable, SentenceVerdict};

/// Placeholder when the evaluator returned no usable tables.
const NO_TABLES: &str = "(No tables returned)";

/// One text section per verdict, in the evaluator's order. Correct entries
/// get an affirmation only; incorrect ones get the correction and the
/// explanation.
pub fn format_sections(results: &[SentenceVerdict]) -> Vec<String> {
    results
        .iter()
        .map(|verdict| {
            let pronoun = if verdict.pronoun.is_empty() {
                "?"
            } else {
                &verdict.pronoun
            };
            let label = if verdict.tense.is_empty() {
                pronoun.to_string()
            } else {
                format!("{pronoun} ({})", verdict.tense)
            };
            if verdict.correct {
                format!(
                    "Your sentence ({label}):\n{}\n\n✔ Correct.",
                    verdict.original
                )
            } else {
                let corrected = verdict.corrected.as_deref().unwrap_or(&verdict.original);
                format!(
                    "Your sentence ({label}):\n{}\n\nCorrection:\n{corrected}\n\nWhy:\n{}",
                    verdict.original, verdict.explanation
                )
            }
        })
        .collect()
}

/// All conjugation tables flattened into one block, tense header first.
pub fn format_conjugation_tables(tables: &[ConjugationTable]) -> String {
    if tables.is_empty() {
        return NO_TABLES.to_string();
    }
    tables
        .iter()
        .map(|table| format!("--- {} ---\n{}", table.tense, table.body))
        .collect::<Vec<_>>()
        .join("\n\n")
}
