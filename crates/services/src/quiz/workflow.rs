use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use quiz_core::model::{Category, Score, Session, TransitionError};

use super::store::SessionStore;
use crate::config::DEFAULT_QUESTION_COUNT;
use crate::providers::{ImageProvider, QuestionProvider};

/// Orchestrates a play-through: question loading, answering, and finalization.
///
/// Each intent returns the snapshot it published, or the `TransitionError` explaining
/// why it was ignored. Ignored intents never touch the published state.
///
/// Provider calls and the transitions that complete them run on spawned tasks, so a
/// caller that stops waiting still leaves the snapshot settled.
#[derive(Clone)]
pub struct QuizLoopService {
    store: SessionStore,
    questions: Arc<dyn QuestionProvider>,
    images: Arc<dyn ImageProvider>,
    question_count: u32,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionProvider>, images: Arc<dyn ImageProvider>) -> Self {
        Self {
            store: SessionStore::new(),
            questions,
            images,
            question_count: DEFAULT_QUESTION_COUNT,
        }
    }

    #[must_use]
    pub fn with_question_count(mut self, question_count: u32) -> Self {
        self.question_count = question_count;
        self
    }

    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.store.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.store.subscribe()
    }

    /// Load questions for `category` and enter the quiz.
    ///
    /// A failed or empty fetch clears the loading flag, stays on category selection and
    /// records the failure kind on the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError` when a load is already running, the session is not on
    /// category selection, or the session was reset before the questions arrived.
    pub async fn start_quiz(&self, category: Category) -> Result<Session, TransitionError> {
        let generation = self
            .store
            .transition(|session| {
                let next = session.start(category)?;
                let generation = next.generation();
                Ok((next, generation))
            })
            .inspect_err(|err| debug!(%category, error = %err, "start ignored"))?;

        let worker = self.clone();
        join(tokio::spawn(async move {
            worker.load_questions(category, generation).await
        }))
        .await
    }

    /// Answer the current question; the last answer runs finalization.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError` when no question is awaiting an answer, or the session
    /// was reset while finalization was running.
    pub async fn submit_answer(&self, answer: &str) -> Result<Session, TransitionError> {
        let (published, answered) = self
            .store
            .transition(|session| {
                let (next, answered) = session.answer(answer)?;
                Ok((next.clone(), (next, answered)))
            })
            .inspect_err(|err| debug!(error = %err, "answer ignored"))?;

        debug!(
            correct = answered.was_correct,
            score = published.score(),
            "answer recorded"
        );

        match answered.completed {
            Some(score) => {
                let worker = self.clone();
                let generation = published.generation();
                join(tokio::spawn(async move {
                    worker.finalize(generation, score).await
                }))
                .await
            }
            None => Ok(published),
        }
    }

    /// Discard the current play-through and return the fresh snapshot.
    pub fn reset_quiz(&self) -> Session {
        let fresh = self.store.replace_with(Session::reset);
        info!(generation = fresh.generation(), "quiz reset");
        fresh
    }

    async fn load_questions(
        &self,
        category: Category,
        generation: u64,
    ) -> Result<Session, TransitionError> {
        let fetched = self
            .questions
            .fetch_questions(category.provider_id(), self.question_count)
            .await
            .map_err(|err| err.kind());

        let published = self
            .store
            .transition(|session| {
                let next = session.complete_start(generation, fetched)?;
                Ok((next.clone(), next))
            })
            .inspect_err(|err| debug!(%category, error = %err, "dropping question response"))?;

        match published.last_failure() {
            None => info!(
                %category,
                total = published.total_questions(),
                "quiz started"
            ),
            Some(kind) => warn!(%category, ?kind, "quiz could not start"),
        }
        Ok(published)
    }

    async fn finalize(&self, generation: u64, score: Score) -> Result<Session, TransitionError> {
        let (celebration, failure) = if score.earns_celebration() {
            match self.images.fetch_celebration().await {
                Ok(image) => (image, None),
                Err(err) => (None, Some(err.kind())),
            }
        } else {
            (None, None)
        };

        let published = self
            .store
            .transition(|session| {
                let next = session.finish(generation, celebration, failure)?;
                Ok((next.clone(), next))
            })
            .inspect_err(|err| debug!(error = %err, "dropping finalization"))?;

        info!(
            score = score.correct(),
            total = score.total(),
            percentage = score.percentage(),
            celebration = published.celebration().is_some(),
            degraded = ?published.last_failure(),
            "quiz finished"
        );
        Ok(published)
    }
}

/// Await a provider task spawned by the service.
///
/// The task owns the completing transition, so dropping the caller's future never
/// leaves the loading flag set.
async fn join(
    task: JoinHandle<Result<Session, TransitionError>>,
) -> Result<Session, TransitionError> {
    match task.await {
        Ok(result) => result,
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(err) => {
            warn!(error = %err, "provider task cancelled");
            Err(TransitionError::Interrupted)
        }
    }
}
