//! Prompt construction for the three artifact kinds.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — tuning the wording of a request (e.g.
//!    asking for sub-points in the strategy plan) requires editing exactly
//!    one place.
//!
//! 2. **Testability** — unit tests can inspect the built prompts directly
//!    without touching the network, so prompt regressions are easy to catch.
//!
//! Source text is truncated to a fixed character budget before being spliced
//! into a prompt; truncation is a hard cut, not word-boundary aware.

use crate::artifact::SummaryLength;

/// Character budget for source text embedded in a prompt.
///
/// Keeps request payloads bounded regardless of document size. Anything past
/// this limit is dropped.
pub const MAX_SOURCE_CHARS: usize = 50_000;

/// Keep exactly the first [`MAX_SOURCE_CHARS`] characters of `text`.
pub fn truncate_source(text: &str) -> &str {
    match text.char_indices().nth(MAX_SOURCE_CHARS) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Prompt requesting a summary at the given verbosity.
///
/// Asks for key points, main arguments, and conclusions, formatted with the
/// markdown subset the renderer understands (headings, subheadings, bullets).
pub fn summary_prompt(text: &str, length: SummaryLength) -> String {
    format!(
        "Based on the following text from a document, please provide a {length} summary. \
The summary should capture the key points, main arguments, and conclusions. \
Format the output using markdown (e.g., headings, subheadings, bullet points) for readability. \
Text: \"{}\"",
        truncate_source(text)
    )
}

/// Prompt requesting a structured 4-week learning/action plan.
pub fn strategy_prompt(text: &str) -> String {
    format!(
        "Analyze the following text and generate a comprehensive 4-week learning or action \
strategy plan based on its content. Break it down week by week with clear, actionable steps \
and sub-points. The plan should be structured to help someone master the concepts or apply \
the information from the document. Format the output using markdown (e.g., using headings \
for each week and bullet points for actions). Text: \"{}\"",
        truncate_source(text)
    )
}

/// Prompt requesting exactly 5 mixed-format quiz questions.
///
/// The structural constraints repeated here (4 options for Multiple Choice,
/// `["True", "False"]` for True/False, an answer on every question) are also
/// enforced by the response schema sent alongside this prompt; stating them
/// in both places measurably improves compliance.
pub fn quiz_prompt(text: &str) -> String {
    format!(
        "Generate a random quiz with exactly 5 questions based on the provided text. \
The quiz should include a mix of Multiple Choice, True/False, and Short Answer questions. \
For multiple-choice questions, provide 4 options. For True/False questions, the options \
array must contain only \"True\" and \"False\". For all questions, provide the correct \
answer. Text: \"{}\"",
        truncate_source(text)
    )
}
