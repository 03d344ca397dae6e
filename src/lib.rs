//! # pdf2study
//!
//! Turn a PDF document into study artifacts — a summary, a 4-week
//! learning/action plan, and a short mixed-format quiz — using the Gemini
//! generative-language API.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input    validate local file or URL (application/pdf, ≤ 50 MiB)
//!  ├─ 2. Extract  per-page text items → one plain-text string
//!  ├─ 3. Prompt   kind-specific instruction, source capped at 50 000 chars
//!  ├─ 4. Generate generateContent call (schema-constrained JSON for quiz)
//!  ├─ 5. Session  per-artifact lifecycle state (loading / error / content)
//!  └─ 6. Output   markdown-subset → sanitised markup, plain text, grading
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2study::{
//!     generate, load_document, ArtifactKind, GeminiClient, GenerateOptions, StudyConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credential read from GEMINI_API_KEY
//!     let config = StudyConfig::default();
//!     let client = GeminiClient::from_config(&config)?;
//!
//!     let document = load_document("paper.pdf", &config).await?;
//!     let artifact = generate(
//!         &client,
//!         &document.extracted_text,
//!         ArtifactKind::Summary,
//!         &GenerateOptions::default(),
//!     )
//!     .await?;
//!     println!("{artifact:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2study` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdf2study = { version = "0.1", default-features = false }
//! ```
//!
//! ## Failure model
//!
//! Fatal errors ([`StudyError`]) end the session: rejected input, a PDF the
//! extractor cannot parse, a missing API key. Per-artifact errors
//! ([`ArtifactError`]) are recoverable by re-triggering just that artifact;
//! they never disturb the other kinds' state. Nothing is retried
//! automatically.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod artifact;
pub mod config;
pub mod error;
pub mod markdown;
pub mod pipeline;
pub mod prompts;
pub mod quiz;
pub mod session;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::{
    export_plain_text, export_text, generate, load_document, quiz_as_text, GenerateOptions,
};
pub use artifact::{
    ArtifactKind, Document, GeneratedArtifact, QuestionType, QuizQuestion, SummaryLength,
};
pub use config::{StudyConfig, StudyConfigBuilder};
pub use error::{ArtifactError, StudyError};
pub use pipeline::llm::GeminiClient;
pub use quiz::{grade, GradeReport};
pub use session::{ArtifactView, GenerationState, Phase, QuizSession, Session};
