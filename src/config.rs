//! Configuration for document loading and artifact generation.
//!
//! Every knob lives in [`StudyConfig`], built via its
//! [`StudyConfigBuilder`]. Keeping the knobs in one struct makes it trivial
//! to share a config across concurrent generation calls and to log the
//! exact settings a run used.

use crate::error::StudyError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default Gemini model used for every generation call.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL of the Generative Language REST API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for a study session.
///
/// Built via [`StudyConfig::builder()`] or [`StudyConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2study::StudyConfig;
///
/// let config = StudyConfig::builder()
///     .model("gemini-2.5-flash")
///     .temperature(0.4)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Gemini model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// API key for the Generative Language API.
    ///
    /// If `None`, the client reads `GEMINI_API_KEY` from the environment
    /// when constructed; absence of both is
    /// [`StudyError::ProviderNotConfigured`], raised before any network call.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL of the API. Default: [`DEFAULT_API_BASE`].
    ///
    /// Overridable so tests can point the client at a local stub server.
    pub api_base: String,

    /// Sampling temperature, when set. Default: `None` (provider default).
    pub temperature: Option<f32>,

    /// Maximum tokens per generation, when set. Default: `None`.
    pub max_tokens: Option<usize>,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            temperature: None,
            max_tokens: None,
            download_timeout_secs: 120,
        }
    }
}

impl fmt::Debug for StudyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudyConfig")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .finish()
    }
}

impl StudyConfig {
    /// Create a new builder for `StudyConfig`.
    pub fn builder() -> StudyConfigBuilder {
        StudyConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`StudyConfig`].
#[derive(Debug)]
pub struct StudyConfigBuilder {
    config: StudyConfig,
}

impl StudyConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.config.api_base = base.into();
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = Some(t.clamp(0.0, 2.0));
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = Some(n);
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<StudyConfig, StudyError> {
        let c = &self.config;
        if c.model.trim().is_empty() {
            return Err(StudyError::InvalidConfig("model must not be empty".into()));
        }
        if c.api_base.trim().is_empty() {
            return Err(StudyError::InvalidConfig(
                "api_base must not be empty".into(),
            ));
        }
        if let Some(key) = &c.api_key {
            if key.trim().is_empty() {
                return Err(StudyError::InvalidConfig(
                    "api_key must not be blank when set".into(),
                ));
            }
        }
        Ok(self.config)
    }
}
