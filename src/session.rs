//! Artifact store and lifecycle controller.
//!
//! All mutable session state lives here, owned by [`Session`] and mutated
//! only through its transition methods at the points where asynchronous
//! operations resume. Presentation code receives read-only projections
//! ([`ArtifactView`], [`Phase`]) and never touches the fields directly.
//!
//! ## Concurrency model
//!
//! Duplicate in-flight requests for the same kind are neither queued nor
//! cancelled; transitions are applied in the order their operations resume,
//! so whichever response lands last wins and overwrites the state
//! (last-resume-wins, a documented design choice — there is no request
//! token to detect staleness). An implementer wanting first-issued-wins
//! could add a monotonically increasing token per kind and drop stale
//! resumptions; nothing here relies on its absence.

use crate::artifact::{ArtifactKind, Document, GeneratedArtifact, QuizQuestion};
use crate::quiz::{self, GradeReport};
use std::collections::HashMap;
use tracing::debug;

/// Per-artifact generation lifecycle: `Idle → Generating → (Succeeded |
/// Failed)`, re-entrant from either terminal state.
#[derive(Debug, Clone, Default)]
pub struct GenerationState<T> {
    content: Option<T>,
    in_flight: bool,
    last_error: Option<String>,
}

/// Read-only projection of a [`GenerationState`], in rendering priority
/// order: an in-flight request shows as loading, a recorded error takes
/// priority over stale content, content over the empty placeholder.
#[derive(Debug, PartialEq, Eq)]
pub enum ArtifactView<'a, T> {
    Empty,
    Loading,
    Failed(&'a str),
    Ready(&'a T),
}

impl<T> GenerationState<T> {
    /// Enter `Generating`: clear the previous error, keep previous content
    /// visible (stale-while-revalidating).
    fn begin(&mut self) {
        self.last_error = None;
        self.in_flight = true;
    }

    fn succeed(&mut self, content: T) {
        self.content = Some(content);
        self.in_flight = false;
    }

    /// Record a failure; content is left unchanged.
    fn fail(&mut self, message: String) {
        self.last_error = Some(message);
        self.in_flight = false;
    }

    pub fn content(&self) -> Option<&T> {
        self.content.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn view(&self) -> ArtifactView<'_, T> {
        if self.in_flight {
            ArtifactView::Loading
        } else if let Some(err) = &self.last_error {
            ArtifactView::Failed(err)
        } else if let Some(content) = &self.content {
            ArtifactView::Ready(content)
        } else {
            ArtifactView::Empty
        }
    }
}

/// Coarse application state, derived from the session — never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Parsing,
    Ready,
    Success,
    Error,
}

/// Learner progress through the current quiz question set.
///
/// Reset whenever the question set is replaced — identity-based, so a
/// regeneration that happens to produce identical questions still clears it.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    selected_answers: HashMap<usize, String>,
    submitted: bool,
    score: usize,
}

impl QuizSession {
    /// Record an answer for a question index. Ignored after submission.
    pub fn select_answer(&mut self, question_index: usize, answer: impl Into<String>) {
        if self.submitted {
            return;
        }
        self.selected_answers.insert(question_index, answer.into());
    }

    /// Submission is enabled once every index has a recorded answer
    /// (an empty string counts as recorded).
    pub fn all_answered(&self, question_count: usize) -> bool {
        (0..question_count).all(|i| self.selected_answers.contains_key(&i))
    }

    /// Grade and lock in the submission.
    pub fn submit(&mut self, questions: &[QuizQuestion]) -> GradeReport {
        let report = quiz::grade(questions, &self.selected_answers);
        self.score = report.score;
        self.submitted = true;
        report
    }

    /// "Try again": clear answers and the submitted flag, keep the same
    /// question set.
    pub fn try_again(&mut self) {
        self.selected_answers.clear();
        self.submitted = false;
        self.score = 0;
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn answer(&self, question_index: usize) -> Option<&str> {
        self.selected_answers.get(&question_index).map(String::as_str)
    }
}

/// Owner of all per-session state: the document, the three artifact
/// lifecycles, and the quiz session.
#[derive(Debug, Default)]
pub struct Session {
    document: Option<Document>,
    parsing: bool,
    extraction_error: Option<String>,
    summary: GenerationState<String>,
    strategy: GenerationState<String>,
    quiz: GenerationState<Vec<QuizQuestion>>,
    quiz_session: QuizSession,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Parsing lifecycle ────────────────────────────────────────────────

    pub fn begin_parsing(&mut self) {
        self.parsing = true;
        self.extraction_error = None;
    }

    pub fn finish_parsing(&mut self, document: Document) {
        debug!(
            "Document ready: {} ({} chars extracted)",
            document.name,
            document.extracted_text.len()
        );
        self.document = Some(document);
        self.parsing = false;
    }

    /// Extraction failure is terminal for the session until reset.
    pub fn fail_parsing(&mut self, message: impl Into<String>) {
        self.extraction_error = Some(message.into());
        self.parsing = false;
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn extraction_error(&self) -> Option<&str> {
        self.extraction_error.as_deref()
    }

    // ── Generation lifecycle ─────────────────────────────────────────────

    /// Enter `Generating` for one kind; the other kinds are untouched.
    pub fn begin_generation(&mut self, kind: ArtifactKind) {
        match kind {
            ArtifactKind::Summary => self.summary.begin(),
            ArtifactKind::Strategy => self.strategy.begin(),
            ArtifactKind::Quiz => self.quiz.begin(),
        }
    }

    /// Apply a successful generation at its resumption point.
    ///
    /// A quiz success replaces the question set and resets the quiz
    /// session, regardless of whether the new questions equal the old ones.
    pub fn record_success(&mut self, artifact: GeneratedArtifact) {
        match artifact {
            GeneratedArtifact::Summary(text) => self.summary.succeed(text),
            GeneratedArtifact::Strategy(text) => self.strategy.succeed(text),
            GeneratedArtifact::Quiz(questions) => {
                self.quiz.succeed(questions);
                self.quiz_session = QuizSession::default();
            }
        }
    }

    /// Apply a failed generation at its resumption point; stores the
    /// kind-specific user-facing message and leaves content unchanged.
    pub fn record_failure(&mut self, kind: ArtifactKind, message: impl Into<String>) {
        let message = message.into();
        debug!("Generation failed for {kind}: {message}");
        match kind {
            ArtifactKind::Summary => self.summary.fail(message),
            ArtifactKind::Strategy => self.strategy.fail(message),
            ArtifactKind::Quiz => self.quiz.fail(message),
        }
    }

    // ── Projections ──────────────────────────────────────────────────────

    pub fn summary(&self) -> &GenerationState<String> {
        &self.summary
    }

    pub fn strategy(&self) -> &GenerationState<String> {
        &self.strategy
    }

    pub fn quiz(&self) -> &GenerationState<Vec<QuizQuestion>> {
        &self.quiz
    }

    pub fn quiz_session(&self) -> &QuizSession {
        &self.quiz_session
    }

    pub fn quiz_session_mut(&mut self) -> &mut QuizSession {
        &mut self.quiz_session
    }

    /// Derived application phase.
    ///
    /// Success once any artifact has ever succeeded (content is never
    /// cleared except by reset, so presence of content is that record);
    /// otherwise Error if extraction failed or any artifact carries a
    /// terminal failure; otherwise Ready when a document is loaded.
    pub fn phase(&self) -> Phase {
        if self.parsing {
            return Phase::Parsing;
        }
        let any_success = self.summary.content().is_some()
            || self.strategy.content().is_some()
            || self.quiz.content().is_some();
        if any_success {
            return Phase::Success;
        }
        let any_failure = self.extraction_error.is_some()
            || self.summary.last_error().is_some()
            || self.strategy.last_error().is_some()
            || self.quiz.last_error().is_some();
        if any_failure {
            return Phase::Error;
        }
        if self.document.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    /// Full reset: drop the document, every generation state, and the quiz
    /// session, returning to `Idle`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
