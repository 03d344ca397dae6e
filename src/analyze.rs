//! Top-level entry points: load a document, generate artifacts, export.
//!
//! These functions are the seams the CLI (and library consumers) drive.
//! Loading is fallible with [`StudyError`]; each generation call is an
//! independent async operation returning [`ArtifactError`] on failure so a
//! failed quiz never disturbs a finished summary. Callers that want all
//! three artifacts can issue the calls concurrently and apply the results
//! to a [`crate::session::Session`] in completion order.

use crate::artifact::{ArtifactKind, Document, GeneratedArtifact, SummaryLength};
use crate::config::StudyConfig;
use crate::error::{ArtifactError, StudyError};
use crate::markdown;
use crate::pipeline::{extract, input, llm::GeminiClient};
use crate::prompts;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Options applying to a single generation request.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Verbosity for summary generation; ignored by the other kinds.
    pub summary_length: SummaryLength,
}

/// Resolve, validate, and extract a PDF into an immutable [`Document`].
///
/// `input_str` may be a local path or an HTTP/HTTPS URL. Fails with
/// the InputRejected variants before any parse attempt, and with
/// [`StudyError::ExtractionFailed`] when the PDF parser cannot cope.
pub async fn load_document(
    input_str: impl AsRef<str>,
    config: &StudyConfig,
) -> Result<Document, StudyError> {
    let start = Instant::now();
    let input_str = input_str.as_ref();
    info!("Loading document: {}", input_str);

    let resolved = input::resolve_input(input_str, config.download_timeout_secs).await?;
    let document = extract::build_document(resolved.name, &resolved.bytes)?;

    info!(
        "Loaded '{}' in {}ms ({} bytes, {} chars of text)",
        document.name,
        start.elapsed().as_millis(),
        document.byte_size,
        document.extracted_text.len()
    );
    Ok(document)
}

/// Generate one artifact from extracted text.
///
/// Builds the kind-appropriate prompt (source truncated to the fixed
/// character budget) and dispatches to the free-form or schema-constrained
/// client call. One request, no retry; the caller records the outcome.
pub async fn generate(
    client: &GeminiClient,
    text: &str,
    kind: ArtifactKind,
    options: &GenerateOptions,
) -> Result<GeneratedArtifact, ArtifactError> {
    let start = Instant::now();
    let artifact = match kind {
        ArtifactKind::Summary => {
            let prompt = prompts::summary_prompt(text, options.summary_length);
            GeneratedArtifact::Summary(client.generate_text(&prompt).await?)
        }
        ArtifactKind::Strategy => {
            let prompt = prompts::strategy_prompt(text);
            GeneratedArtifact::Strategy(client.generate_text(&prompt).await?)
        }
        ArtifactKind::Quiz => {
            let prompt = prompts::quiz_prompt(text);
            GeneratedArtifact::Quiz(client.generate_quiz(&prompt).await?)
        }
    };
    info!("Generated {} in {}ms", kind, start.elapsed().as_millis());
    Ok(artifact)
}

/// Export an artifact's markdown as markup-stripped plain text to
/// `{dir}/{kind}.txt`.
pub async fn export_plain_text(
    dir: impl AsRef<Path>,
    kind: ArtifactKind,
    content_markdown: &str,
) -> Result<PathBuf, StudyError> {
    let text = markdown::to_plain_text(content_markdown);
    export_text(dir, kind, &text).await
}

/// Write already-plain artifact text to `{dir}/{kind}.txt`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn export_text(
    dir: impl AsRef<Path>,
    kind: ArtifactKind,
    text: &str,
) -> Result<PathBuf, StudyError> {
    let dir = dir.as_ref();
    let path = dir.join(format!("{kind}.txt"));

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| StudyError::OutputWriteFailed {
            path: path.clone(),
            source: e,
        })?;

    let tmp_path = path.with_extension("txt.tmp");
    tokio::fs::write(&tmp_path, text)
        .await
        .map_err(|e| StudyError::OutputWriteFailed {
            path: path.clone(),
            source: e,
        })?;
    tokio::fs::rename(&tmp_path, &path)
        .await
        .map_err(|e| StudyError::OutputWriteFailed {
            path: path.clone(),
            source: e,
        })?;

    info!("Exported {} to {}", kind, path.display());
    Ok(path)
}

/// Render a quiz question set as plain text for export.
///
/// One numbered line per question with its options, so the `.txt` export
/// of a quiz is readable without any player.
pub fn quiz_as_text(questions: &[crate::artifact::QuizQuestion]) -> String {
    let mut out = String::new();
    for (i, q) in questions.iter().enumerate() {
        out.push_str(&format!("{}. {} [{}]\n", i + 1, q.question, q.question_type));
        if let Some(options) = &q.options {
            for option in options {
                out.push_str(&format!("   - {option}\n"));
            }
        }
        out.push_str(&format!("   Answer: {}\n", q.answer));
    }
    out
}
