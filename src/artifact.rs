//! Core data model: artifact kinds, summary verbosity, and quiz questions.
//!
//! `QuestionType` and `QuizQuestion` serialise with the exact wire spellings
//! the generation API is asked to produce ("Multiple Choice", "True/False",
//! "Short Answer"), so the schema-constrained quiz response deserialises
//! directly into typed values with no intermediate stringly layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three derived outputs the pipeline can produce for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Summary,
    Strategy,
    Quiz,
}

impl ArtifactKind {
    /// All kinds, in presentation order.
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Summary,
        ArtifactKind::Strategy,
        ArtifactKind::Quiz,
    ];

    /// Lower-case name used in user-facing messages and export filenames.
    pub fn name(&self) -> &'static str {
        match self {
            ArtifactKind::Summary => "summary",
            ArtifactKind::Strategy => "strategy",
            ArtifactKind::Quiz => "quiz",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "summary" => Ok(ArtifactKind::Summary),
            "strategy" => Ok(ArtifactKind::Strategy),
            "quiz" => Ok(ArtifactKind::Quiz),
            other => Err(format!("unknown artifact kind: '{other}'")),
        }
    }
}

/// Verbosity of the generated summary. Parameterises summary generation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Detailed,
}

impl SummaryLength {
    /// The adjective spliced into the summary prompt.
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Detailed => "detailed",
        }
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryLength {
    type Err = std::convert::Infallible;

    /// Unrecognised values fall back to [`SummaryLength::Medium`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "short" => SummaryLength::Short,
            "detailed" => SummaryLength::Detailed,
            _ => SummaryLength::Medium,
        })
    }
}

/// The question formats the quiz generator mixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "Multiple Choice")]
    MultipleChoice,
    #[serde(rename = "True/False")]
    TrueFalse,
    #[serde(rename = "Short Answer")]
    ShortAnswer,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::TrueFalse => "True/False",
            QuestionType::ShortAnswer => "Short Answer",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One quiz question as returned by the schema-constrained generation call.
///
/// `options` is an explicit `Option` rather than an implicit absent key:
/// Multiple Choice carries exactly 4 entries, True/False carries
/// `["True", "False"]`, and Short Answer carries none. The model is
/// instructed to honour that invariant, but the deserialiser does not
/// enforce per-variant cardinality — display and grading tolerate
/// incomplete items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub answer: String,
}

/// A document whose text has been successfully extracted.
///
/// Immutable once created; destroyed only by a session reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Display name (file name or URL tail).
    pub name: String,
    /// Size of the original PDF in bytes.
    pub byte_size: u64,
    /// Concatenated plain text of all pages.
    pub extracted_text: String,
}

/// A successfully generated artifact, typed by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedArtifact {
    /// Markdown-subset summary text.
    Summary(String),
    /// Markdown-subset 4-week plan text.
    Strategy(String),
    /// The quiz question set.
    Quiz(Vec<QuizQuestion>),
}

impl GeneratedArtifact {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            GeneratedArtifact::Summary(_) => ArtifactKind::Summary,
            GeneratedArtifact::Strategy(_) => ArtifactKind::Strategy,
            GeneratedArtifact::Quiz(_) => ArtifactKind::Quiz,
        }
    }
}
