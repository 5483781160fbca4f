use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::model::{Category, ImageRef, Question, Score};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Reasons a requested transition was not applied.
///
/// The snapshot is left untouched whenever one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransitionError {
    #[error("expected the {expected:?} screen, found {actual:?}")]
    WrongScreen { expected: Screen, actual: Screen },

    #[error("a provider call is already in flight")]
    Busy,

    #[error("no provider call is in flight")]
    NotLoading,

    #[error("response for generation {response} arrived after reset to {current}")]
    Superseded { response: u64, current: u64 },

    #[error("the provider task was cancelled before it finished")]
    Interrupted,
}

//
// ─── SCREEN ───────────────────────────────────────────────────────────────────
//

/// The three mutually exclusive phases of a play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Screen {
    #[default]
    CategorySelection,
    Quiz,
    Results,
}

/// Why the most recent provider call degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureKind {
    /// Network error or timeout.
    Transport,
    /// Non-success HTTP status or an error code from the API.
    Protocol,
    /// Payload did not have the expected shape.
    Parse,
    /// The question bank answered with an empty set.
    NoQuestions,
}

//
// ─── ANSWER STEP ──────────────────────────────────────────────────────────────
//

/// What happened when an answer was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answered {
    pub was_correct: bool,
    /// Final score once the last question has been answered.
    pub completed: Option<Score>,
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// Immutable snapshot of one play-through.
///
/// Transitions never mutate a snapshot; they return the next one. Cloning is cheap
/// because the question list is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    screen: Screen,
    category: Option<Category>,
    questions: Arc<[Question]>,
    current: usize,
    score: u32,
    loading: bool,
    celebration: Option<ImageRef>,
    last_failure: Option<FailureKind>,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Fresh session on the category selection screen.
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Screen::CategorySelection,
            category: None,
            questions: Arc::from(Vec::new()),
            current: 0,
            score: 0,
            loading: false,
            celebration: None,
            last_failure: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_question_index(&self) -> usize {
        self.current
    }

    /// The question awaiting an answer, if any.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.screen {
            Screen::Quiz => self.questions.get(self.current),
            Screen::CategorySelection | Screen::Results => None,
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Score against the full question count.
    #[must_use]
    pub fn final_score(&self) -> Score {
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        Score::new(self.score, total)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn celebration(&self) -> Option<&ImageRef> {
        self.celebration.as_ref()
    }

    #[must_use]
    pub fn last_failure(&self) -> Option<FailureKind> {
        self.last_failure
    }

    /// Bumped on every reset; responses tagged with an older value are dropped.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when the snapshot matches a freshly constructed one, ignoring the generation.
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        Self {
            generation: self.generation,
            ..Self::new()
        } == *self
    }

    /// Begin loading questions for `category`.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::Busy` while a load is in flight and
    /// `TransitionError::WrongScreen` outside category selection.
    pub fn start(&self, category: Category) -> Result<Self, TransitionError> {
        self.expect_idle()?;
        self.expect_screen(Screen::CategorySelection)?;

        Ok(Self {
            category: Some(category),
            loading: true,
            last_failure: None,
            ..self.clone()
        })
    }

    /// Apply the question fetch started by [`Session::start`].
    ///
    /// A non-empty list moves to the quiz; an empty list or a failure clears the
    /// loading flag and stays on category selection.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::Superseded` if the session was reset after the
    /// fetch began, or another variant if no start is pending.
    pub fn complete_start(
        &self,
        generation: u64,
        fetched: Result<Vec<Question>, FailureKind>,
    ) -> Result<Self, TransitionError> {
        self.expect_generation(generation)?;
        self.expect_loading()?;
        self.expect_screen(Screen::CategorySelection)?;

        let failure = match fetched {
            Ok(questions) if !questions.is_empty() => {
                return Ok(Self {
                    screen: Screen::Quiz,
                    questions: Arc::from(questions),
                    current: 0,
                    score: 0,
                    loading: false,
                    celebration: None,
                    last_failure: None,
                    ..self.clone()
                });
            }
            Ok(_) => FailureKind::NoQuestions,
            Err(kind) => kind,
        };

        Ok(Self {
            loading: false,
            last_failure: Some(failure),
            ..self.clone()
        })
    }

    /// Answer the current question.
    ///
    /// After the last question the returned snapshot is loading, with the index past
    /// the end, until [`Session::finish`] publishes the results.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::WrongScreen` outside the quiz and
    /// `TransitionError::Busy` while finalization is running.
    pub fn answer(&self, answer: &str) -> Result<(Self, Answered), TransitionError> {
        self.expect_screen(Screen::Quiz)?;
        self.expect_idle()?;
        let Some(question) = self.questions.get(self.current) else {
            return Err(TransitionError::Busy);
        };

        let was_correct = question.is_correct(answer);
        let score = if was_correct { self.score + 1 } else { self.score };
        let next = self.current + 1;
        let last = next >= self.questions.len();

        let session = Self {
            current: next,
            score,
            loading: last,
            ..self.clone()
        };
        let completed = last.then(|| session.final_score());

        Ok((
            session,
            Answered {
                was_correct,
                completed,
            },
        ))
    }

    /// Publish the results screen after the last answer.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::Superseded` if the session was reset during
    /// finalization, or another variant if no finalization is pending.
    pub fn finish(
        &self,
        generation: u64,
        celebration: Option<ImageRef>,
        failure: Option<FailureKind>,
    ) -> Result<Self, TransitionError> {
        self.expect_generation(generation)?;
        self.expect_loading()?;
        self.expect_screen(Screen::Quiz)?;

        Ok(Self {
            screen: Screen::Results,
            loading: false,
            celebration,
            last_failure: failure,
            ..self.clone()
        })
    }

    /// Discard this play-through. Legal from any state.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self {
            generation: self.generation.wrapping_add(1),
            ..Self::new()
        }
    }

    fn expect_screen(&self, expected: Screen) -> Result<(), TransitionError> {
        if self.screen == expected {
            Ok(())
        } else {
            Err(TransitionError::WrongScreen {
                expected,
                actual: self.screen,
            })
        }
    }

    fn expect_idle(&self) -> Result<(), TransitionError> {
        if self.loading {
            Err(TransitionError::Busy)
        } else {
            Ok(())
        }
    }

    fn expect_loading(&self) -> Result<(), TransitionError> {
        if self.loading {
            Ok(())
        } else {
            Err(TransitionError::NotLoading)
        }
    }

    fn expect_generation(&self, generation: u64) -> Result<(), TransitionError> {
        if self.generation == generation {
            Ok(())
        } else {
            Err(TransitionError::Superseded {
                response: generation,
                current: self.generation,
            })
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
