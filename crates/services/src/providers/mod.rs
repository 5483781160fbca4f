//! Network collaborators of the quiz state machine.

mod giphy;
mod trivia;

use async_trait::async_trait;
use quiz_core::model::{ImageRef, Question};

use crate::error::ProviderError;

pub use giphy::{CELEBRATION_TERMS, GIPHY_RESULT_LIMIT, GiphyService};
pub use trivia::TriviaService;

/// Source of trivia questions for a category.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Fetch `count` multiple-choice questions for the bank's `category_id`.
    ///
    /// Implementations return either every question of the batch or an error, never a
    /// partial list. An empty list means the bank had nothing to offer.
    async fn fetch_questions(
        &self,
        category_id: u32,
        count: u32,
    ) -> Result<Vec<Question>, ProviderError>;
}

/// Source of a celebration image for the results screen.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Fetch one celebration image, or `None` when the search found nothing.
    async fn fetch_celebration(&self) -> Result<Option<ImageRef>, ProviderError>;
}
