use std::sync::Arc;

use reqwest::Client;

use quiz_core::RandomSource;

use crate::config::QuizConfig;
use crate::error::AppServicesError;
use crate::providers::{GiphyService, ImageProvider, QuestionProvider, TriviaService};
use crate::quiz::QuizLoopService;

/// Assembles app-facing services from configuration.
#[derive(Clone)]
pub struct AppServices {
    config: QuizConfig,
    quiz: Arc<QuizLoopService>,
}

impl AppServices {
    /// Build services backed by the HTTP providers.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the HTTP client cannot be built.
    pub fn from_config(config: QuizConfig, random: RandomSource) -> Result<Self, AppServicesError> {
        let client = Client::builder().timeout(config.http_timeout).build()?;
        let questions = Arc::new(TriviaService::new(
            client.clone(),
            config.trivia_base_url.clone(),
            random.clone(),
        ));
        let images = Arc::new(GiphyService::new(
            client,
            config.giphy_base_url.clone(),
            config.giphy_api_key.clone(),
            random,
        ));
        Ok(Self::with_providers(config, questions, images))
    }

    /// Build services around caller-supplied providers.
    #[must_use]
    pub fn with_providers(
        config: QuizConfig,
        questions: Arc<dyn QuestionProvider>,
        images: Arc<dyn ImageProvider>,
    ) -> Self {
        let quiz = Arc::new(
            QuizLoopService::new(questions, images).with_question_count(config.question_count),
        );
        Self { config, quiz }
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn celebrations_enabled(&self) -> bool {
        self.config.giphy_api_key.is_some()
    }
}
