//! Sentence evaluation via an external LLM.
//!
//! The evaluator contract: given the verb, the five pronoun+tense
//! assignments, and the student's sentences, return a structured judgement.
//! Responses may arrive wrapped in markdown code fences; individual fields
//! default, but a response that is not a JSON object is a hard failure.

pub mod openai;
pub mod prompt;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::EvaluatorConfig;
use crate::error::LlmError;
use crate::exercise::Assignment;

pub use openai::OpenAiEvaluator;

/// Judgement for one submitted sentence.
#[derive(Debug, Clone, Deserialize)]
pub struct SentenceVerdict {
    #[serde(default)]
    pub pronoun: String,
    #[serde(default)]
    pub tense: String,
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub correct: bool,
    #[serde(default)]
    pub corrected: Option<String>,
    #[serde(default)]
    pub explanation: String,
}

/// One conjugation table: tense header plus a 5-line body.
#[derive(Debug, Clone)]
pub struct ConjugationTable {
    pub tense: String,
    pub body: String,
}

/// Parsed evaluator judgement.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub results: Vec<SentenceVerdict>,
    pub tables: Vec<ConjugationTable>,
    pub encouragement: String,
}

/// External evaluator contract.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(
        &self,
        verb: &str,
        assignments: &[Assignment],
        sentences: &[String],
    ) -> Result<Evaluation, LlmError>;
}

/// Create an evaluator from configuration.
pub fn create_evaluator(config: &EvaluatorConfig) -> Arc<dyn Evaluator> {
    Arc::new(OpenAiEvaluator::new(config.clone()))
}

/// Raw wire shape of the evaluator response.
#[derive(Deserialize)]
struct RawEvaluation {
    #[serde(default)]
    results: Vec<SentenceVerdict>,
    #[serde(default)]
    conjugation_tables: serde_json::Value,
    #[serde(default)]
    encouragement: Option<String>,
}

/// Strip markdown code fences the model sometimes wraps around its JSON.
pub fn strip_code_fences(raw: &str) -> &str {
    let text = raw.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_start();
    rest.strip_suffix("```").map(str::trim_end).unwrap_or(rest)
}

/// Parse the evaluator's raw response into an `Evaluation`.
///
/// Defaulting rules are applied here, once: missing fields default, blank
/// tables are dropped, and `conjugation_tables` supplied as anything other
/// than a mapping is treated as empty.
pub fn parse_evaluation(raw: &str, provider: &str) -> Result<Evaluation, LlmError> {
    let text = strip_code_fences(raw);
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| LlmError::InvalidResponse {
            provider: provider.to_string(),
            reason: format!("not valid JSON: {e}"),
        })?;
    if !value.is_object() {
        return Err(LlmError::InvalidResponse {
            provider: provider.to_string(),
            reason: "expected a JSON object".to_string(),
        });
    }

    let raw_eval: RawEvaluation =
        serde_json::from_value(value).map_err(|e| LlmError::InvalidResponse {
            provider: provider.to_string(),
            reason: e.to_string(),
        })?;

    let tables = match raw_eval.conjugation_tables {
        serde_json::Value::Object(map) => map
            .into_iter()
            .filter_map(|(tense, value)| {
                let body = value.as_str()?.trim();
                if body.is_empty() {
                    None
                } else {
                    Some(ConjugationTable {
                        tense,
                        body: body.to_string(),
                    })
                }
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(Evaluation {
        results: raw_eval.results,
        tables,
        encouragement: raw_eval
            .encouragement
            .unwrap_or_else(|| "Keep practicing!".to_string()),
    })
}
