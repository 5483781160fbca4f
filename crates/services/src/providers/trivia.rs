use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use quiz_core::RandomSource;
use quiz_core::model::Question;
use quiz_core::text::decode_entities;

use super::QuestionProvider;
use crate::error::ProviderError;

/// Open Trivia DB client.
#[derive(Clone)]
pub struct TriviaService {
    client: Client,
    base_url: String,
    random: RandomSource,
}

impl TriviaService {
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>, random: RandomSource) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            random,
        }
    }

    async fn request(&self, category_id: u32, count: u32) -> Result<Vec<Question>, ProviderError> {
        debug!(category_id, count, url = %self.base_url, "requesting trivia questions");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("amount", count.to_string()),
                ("category", category_id.to_string()),
                ("type", "multiple".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        parse_questions(&body, &self.random)
    }
}

#[async_trait]
impl QuestionProvider for TriviaService {
    async fn fetch_questions(
        &self,
        category_id: u32,
        count: u32,
    ) -> Result<Vec<Question>, ProviderError> {
        let result = self.request(category_id, count).await;
        match &result {
            Ok(questions) => debug!(category_id, received = questions.len(), "trivia questions received"),
            Err(err) => warn!(category_id, error = %err, "trivia request failed"),
        }
        result
    }
}

/// Decode a question bank payload into shuffled, entity-free questions.
///
/// One malformed entry fails the whole batch.
pub(crate) fn parse_questions(
    body: &str,
    random: &RandomSource,
) -> Result<Vec<Question>, ProviderError> {
    let payload: TriviaResponse = serde_json::from_str(body)?;
    if payload.response_code != 0 {
        return Err(ProviderError::ResponseCode(payload.response_code));
    }

    payload
        .results
        .into_iter()
        .map(|item| {
            let incorrect = item
                .incorrect_answers
                .iter()
                .map(|answer| decode_entities(answer))
                .collect();
            Question::new(
                decode_entities(&item.question),
                decode_entities(&item.correct_answer),
                incorrect,
                random,
            )
            .map_err(ProviderError::from)
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct TriviaResponse {
    #[serde(default)]
    response_code: u8,
    results: Vec<TriviaItem>,
}

#[derive(Debug, Deserialize)]
struct TriviaItem {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}
