//! Generation client for the Google Generative Language REST API.
//!
//! This module is intentionally thin: all prompt engineering lives in
//! [`crate::prompts`], and all lifecycle/state handling lives in
//! [`crate::session`]. What remains here is the wire format — request
//! bodies built with `serde_json::json!`, candidate-text extraction, and
//! the schema-constrained quiz parse.
//!
//! There is deliberately no retry, rate limiting, or application-level
//! timeout: a failed call surfaces immediately as an [`ArtifactError`] and
//! the user re-triggers the artifact. Timeouts are the transport's own.

use crate::artifact::QuizQuestion;
use crate::config::StudyConfig;
use crate::error::{ArtifactError, StudyError};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Client for `models/{model}:generateContent`.
#[derive(Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
}

impl GeminiClient {
    /// Build a client from the config, reading [`API_KEY_ENV`] when the
    /// config carries no key.
    ///
    /// A missing credential is fatal here, before any network call.
    pub fn from_config(config: &StudyConfig) -> Result<Self, StudyError> {
        let api_key = match &config.api_key {
            Some(key) => key.trim().to_string(),
            None => std::env::var(API_KEY_ENV).unwrap_or_default().trim().to_string(),
        };
        if api_key.is_empty() {
            return Err(StudyError::ProviderNotConfigured);
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| StudyError::Internal(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key,
            model: config.model.clone(),
            base_url: config.api_base.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// The model this client sends requests to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Free-form generation: returns the model's text verbatim.
    ///
    /// The config's sampling knobs (temperature, max output tokens), when
    /// set, apply to every request this client sends.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, ArtifactError> {
        let body = build_request_body(prompt, self.temperature, self.max_tokens, None);
        let response = self.post(&body).await?;
        extract_candidate_text(&response)
    }

    /// Schema-constrained quiz generation.
    ///
    /// The response is requested as JSON matching [`quiz_response_schema`],
    /// then trimmed and parsed once at this boundary into typed questions.
    pub async fn generate_quiz(&self, prompt: &str) -> Result<Vec<QuizQuestion>, ArtifactError> {
        let body = build_request_body(
            prompt,
            self.temperature,
            self.max_tokens,
            Some(quiz_response_schema()),
        );
        let response = self.post(&body).await?;
        let text = extract_candidate_text(&response)?;
        parse_quiz_payload(&text)
    }

    async fn post(&self, body: &Value) -> Result<Value, ArtifactError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );
        debug!("POST {} ({} byte prompt body)", url, body.to_string().len());

        let resp = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            warn!("Generation call failed: HTTP {} — {}", status, message);
            return Err(ArtifactError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json::<Value>().await?)
    }
}

/// Build a `generateContent` request body.
///
/// `response_schema`, when present, constrains the output to JSON matching
/// the schema (`generationConfig.responseMimeType` + `responseSchema`).
pub fn build_request_body(
    prompt: &str,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
    response_schema: Option<Value>,
) -> Value {
    let mut body = json!({
        "contents": [{
            "parts": [{ "text": prompt }]
        }]
    });

    let mut gen_config = serde_json::Map::new();
    if let Some(t) = temperature {
        gen_config.insert("temperature".to_string(), json!(t));
    }
    if let Some(n) = max_tokens {
        gen_config.insert("maxOutputTokens".to_string(), json!(n));
    }
    if let Some(schema) = response_schema {
        gen_config.insert(
            "responseMimeType".to_string(),
            json!("application/json"),
        );
        gen_config.insert("responseSchema".to_string(), schema);
    }
    if !gen_config.is_empty() {
        body["generationConfig"] = Value::Object(gen_config);
    }

    body
}

/// The strict output schema for quiz generation.
///
/// An array of objects with required `question`, `type` (one of the three
/// enumerated spellings), `answer`, and optional `options`.
pub fn quiz_response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": {
                    "type": "STRING",
                    "description": "The question text."
                },
                "type": {
                    "type": "STRING",
                    "enum": ["Multiple Choice", "True/False", "Short Answer"],
                    "description": "The type of the question."
                },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "An array of options. For Multiple Choice, provide 4 options. For True/False, provide [\"True\", \"False\"]. Omit for Short Answer."
                },
                "answer": {
                    "type": "STRING",
                    "description": "The correct answer to the question."
                }
            },
            "required": ["question", "type", "answer"]
        }
    })
}

/// Pull the first candidate's text out of a `generateContent` response.
pub fn extract_candidate_text(response: &Value) -> Result<String, ArtifactError> {
    response["candidates"]
        .as_array()
        .and_then(|arr| arr.first())
        .and_then(|c| c["content"]["parts"].as_array())
        .and_then(|parts| parts.first())
        .and_then(|p| p["text"].as_str())
        .map(str::to_string)
        .ok_or(ArtifactError::MissingContent)
}

/// Parse the quiz payload: trim, require a JSON array, deserialise once.
///
/// Anything else — non-JSON text, a top-level object, an item the typed
/// shape rejects — is a malformed AI response and fails the quiz
/// generation without touching other artifact kinds.
pub fn parse_quiz_payload(text: &str) -> Result<Vec<QuizQuestion>, ArtifactError> {
    let trimmed = text.trim();
    let value: Value =
        serde_json::from_str(trimmed).map_err(|e| ArtifactError::MalformedResponse {
            detail: format!("not valid JSON: {e}"),
        })?;
    if !value.is_array() {
        return Err(ArtifactError::MalformedResponse {
            detail: "top-level value is not an array".into(),
        });
    }
    serde_json::from_value(value).map_err(|e| ArtifactError::MalformedResponse {
        detail: format!("unexpected question shape: {e}"),
    })
}
