use std::env;
use std::time::Duration;

pub const DEFAULT_TRIVIA_BASE_URL: &str = "https://opentdb.com/api.php";
pub const DEFAULT_GIPHY_BASE_URL: &str = "https://api.giphy.com/v1/gifs";
pub const DEFAULT_QUESTION_COUNT: u32 = 10;
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Provider endpoints and limits, read from `QUIZ_*` environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizConfig {
    pub trivia_base_url: String,
    pub giphy_base_url: String,
    /// `None` disables celebration images.
    pub giphy_api_key: Option<String>,
    pub question_count: u32,
    pub http_timeout: Duration,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            trivia_base_url: DEFAULT_TRIVIA_BASE_URL.into(),
            giphy_base_url: DEFAULT_GIPHY_BASE_URL.into(),
            giphy_api_key: None,
            question_count: DEFAULT_QUESTION_COUNT,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl QuizConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unparseable numbers fall back to defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let giphy_api_key = non_blank("QUIZ_GIPHY_API_KEY").map(|key| key.trim().to_string());
        let trivia_base_url = non_blank("QUIZ_TRIVIA_BASE_URL").unwrap_or(defaults.trivia_base_url);
        let giphy_base_url = non_blank("QUIZ_GIPHY_BASE_URL").unwrap_or(defaults.giphy_base_url);
        let question_count = non_blank("QUIZ_QUESTION_COUNT")
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|count| *count > 0)
            .unwrap_or(defaults.question_count);
        let http_timeout = non_blank("QUIZ_HTTP_TIMEOUT_SECS")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(defaults.http_timeout, Duration::from_secs);

        Self {
            trivia_base_url,
            giphy_base_url,
            giphy_api_key,
            question_count,
            http_timeout,
        }
    }

    #[must_use]
    pub fn with_giphy_api_key(mut self, key: impl Into<String>) -> Self {
        self.giphy_api_key = Some(key.into());
        self
    }
}
