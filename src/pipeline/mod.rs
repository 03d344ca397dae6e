//! Pipeline stages for turning a PDF into study artifacts.
//!
//! Each submodule implements exactly one transformation step, keeping every
//! stage independently testable.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ prompts ──▶ llm
//! (path/URL) (pdf text)  (build)    (Gemini)
//! ```
//!
//! 1. [`input`]   — validate the user-supplied path or URL (MIME/size rules)
//! 2. [`extract`] — pull per-page text items and concatenate them
//! 3. [`llm`]     — the only stage with network I/O; free-form and
//!    schema-constrained calls to `generateContent`
//!
//! Prompt wording lives in [`crate::prompts`]; rendering and grading of the
//! generated artifacts live in [`crate::markdown`] and [`crate::quiz`].

pub mod extract;
pub mod input;
pub mod llm;
