//! Error types for the pdf2study library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`StudyError`] — **Fatal**: the session cannot proceed at all
//!   (rejected input, extraction failure, missing credential). Returned as
//!   `Err(StudyError)` from document loading and export functions.
//!
//! * [`ArtifactError`] — **Non-fatal**: one generation request for one
//!   artifact kind failed (transport error, non-2xx response, malformed
//!   model output). The other kinds' state is untouched; the user
//!   re-triggers that kind to recover. Converted at the resumption boundary
//!   into the user-facing message stored in the lifecycle state — the
//!   structured variant never crosses into presentation.

use crate::artifact::ArtifactKind;
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2study library.
///
/// Per-artifact generation failures use [`ArtifactError`] and are recorded
/// in the session's per-kind state rather than propagated here.
#[derive(Debug, Error)]
pub enum StudyError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a valid file path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// File exceeds the 50 MiB upload limit. Checked before any parse attempt.
    #[error(
        "File size exceeds {limit_mib} MiB: '{path}' is {size} bytes.\nPlease provide a smaller PDF."
    )]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        limit_mib: u64,
    },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The PDF parsing collaborator failed. Terminal for the session until reset.
    #[error("Failed to parse the PDF file: {detail}")]
    ExtractionFailed { detail: String },

    // ── Provider errors ───────────────────────────────────────────────────
    /// Required credential for the generation API is missing.
    #[error(
        "Gemini API key is not configured.\n\
Set the GEMINI_API_KEY environment variable or pass the key in StudyConfig."
    )]
    ProviderNotConfigured,

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an exported artifact file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single generation request.
///
/// Scoped to one [`ArtifactKind`]; the session converts it into the
/// user-facing message via [`ArtifactError::user_message`].
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The HTTP request never completed (connect failure, transport timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body carried no candidate text.
    #[error("response contained no generated content")]
    MissingContent,

    /// JSON was required but the response was not a JSON array of questions.
    #[error("malformed AI response: {detail}")]
    MalformedResponse { detail: String },
}

impl ArtifactError {
    /// The message shown to the user and stored in the per-kind state.
    pub fn user_message(&self, kind: ArtifactKind) -> String {
        format!("Failed to generate {kind}. Please try again.")
    }
}
