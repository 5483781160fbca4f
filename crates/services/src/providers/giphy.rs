use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use quiz_core::RandomSource;
use quiz_core::model::ImageRef;

use super::ImageProvider;
use crate::error::ProviderError;

/// Search terms for celebration images.
pub const CELEBRATION_TERMS: [&str; 6] = [
    "celebration",
    "success",
    "winner",
    "congratulations",
    "party",
    "awesome",
];

/// Number of search results to pick from.
pub const GIPHY_RESULT_LIMIT: u32 = 20;

/// Giphy search client. Disabled when no API key is configured.
#[derive(Clone)]
pub struct GiphyService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    random: RandomSource,
}

impl GiphyService {
    #[must_use]
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
        random: RandomSource,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
            random,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, api_key: &str) -> Result<Option<ImageRef>, ProviderError> {
        let term = self
            .random
            .choose(&CELEBRATION_TERMS)
            .copied()
            .unwrap_or(CELEBRATION_TERMS[0]);
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        debug!(term, url = %url, "searching celebration images");

        let response = self
            .client
            .get(url)
            .query(&[
                ("api_key", api_key.to_string()),
                ("q", term.to_string()),
                ("limit", GIPHY_RESULT_LIMIT.to_string()),
                ("rating", "g".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        pick_image(&body, &self.random)
    }
}

#[async_trait]
impl ImageProvider for GiphyService {
    async fn fetch_celebration(&self) -> Result<Option<ImageRef>, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("celebration images disabled: no api key");
            return Ok(None);
        };

        let result = self.search(api_key).await;
        if let Err(err) = &result {
            warn!(error = %err, "celebration image request failed");
        }
        result
    }
}

/// Pick one result uniformly at random and return its original rendition.
pub(crate) fn pick_image(
    body: &str,
    random: &RandomSource,
) -> Result<Option<ImageRef>, ProviderError> {
    let payload: GiphyResponse = serde_json::from_str(body)?;
    let Some(item) = random.choose(&payload.data) else {
        return Ok(None);
    };
    Ok(Some(ImageRef::parse(&item.images.original.url)?))
}

#[derive(Debug, Deserialize)]
struct GiphyResponse {
    data: Vec<GiphyItem>,
}

#[derive(Debug, Deserialize)]
struct GiphyItem {
    images: GiphyImages,
}

#[derive(Debug, Deserialize)]
struct GiphyImages {
    original: GiphyRendition,
}

#[derive(Debug, Deserialize)]
struct GiphyRendition {
    url: String,
}
