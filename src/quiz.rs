//! Quiz grading: normalised string comparison against canonical answers.
//!
//! Correctness is deliberately shallow — case-insensitive, surrounding-
//! whitespace-insensitive equality. No semantic equivalence, no fuzzy
//! matching: "paris " matches "Paris", "the capital Paris" does not.

use crate::artifact::QuizQuestion;
use std::collections::HashMap;

/// The graded outcome of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeReport {
    /// Count of correct answers; always in `[0, questions.len()]`.
    pub score: usize,
    /// Per-question correctness, index-aligned with the question set.
    pub per_question: Vec<bool>,
}

/// Normalise an answer for comparison.
fn normalise(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Grade recorded answers against the canonical ones.
///
/// An absent answer for an index is treated as the empty string.
pub fn grade(questions: &[QuizQuestion], answers: &HashMap<usize, String>) -> GradeReport {
    let per_question: Vec<bool> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let given = answers.get(&i).map(String::as_str).unwrap_or("");
            normalise(given) == normalise(&q.answer)
        })
        .collect();

    GradeReport {
        score: per_question.iter().filter(|&&c| c).count(),
        per_question,
    }
}
