//! OpenAI-backed evaluator over the chat completions API.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::EvaluatorConfig;
use crate::error::LlmError;
use crate::exercise::Assignment;

use super::{Evaluation, Evaluator, parse_evaluation, prompt};

const API_URL: &str = "https://api.openai.com/v1/chat/completions";
const PROVIDER: &str = "openai";

/// Evaluator backed by the OpenAI chat completions endpoint.
pub struct OpenAiEvaluator {
    config: EvaluatorConfig,
    client: reqwest::Client,
}

impl OpenAiEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    async fn complete(&self, prompt_text: &str) -> Result<String, LlmError> {
        let body = json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt_text}],
            "temperature": 0.2,
        });

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: format!("HTTP {status}: {detail}"),
            });
        }

        let completion: ChatCompletion =
            response.json().await.map_err(|e| LlmError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: "response contained no choices".to_string(),
            })
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

#[async_trait]
impl Evaluator for OpenAiEvaluator {
    async fn evaluate(
        &self,
        verb: &str,
        assignments: &[Assignment],
        sentences: &[String],
    ) -> Result<Evaluation, LlmError> {
        let prompt_text = prompt::build_evaluation_prompt(verb, assignments, sentences);
        debug!(model = %self.config.model, "Requesting evaluation");
        let raw = self.complete(&prompt_text).await?;
        parse_evaluation(&raw, PROVIDER)
    }
}
