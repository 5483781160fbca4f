//! Shared fixtures for services integration tests.

#![allow(dead_code)]

pub mod mock_server;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use tokio::sync::Notify;
use tracing_subscriber::{EnvFilter, fmt};

use quiz_core::model::{ImageRef, Question};
use services::{ImageProvider, ProviderError, QuestionProvider};

static LOGGING: OnceLock<()> = OnceLock::new();

/// Install a test-writer subscriber once. Level from `TEST_LOG`, then `RUST_LOG`, else `warn`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// `n` questions whose correct answer is `Right {i}`, listed second.
pub fn questions(n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| {
            Question::with_order(
                format!("Question {i}?"),
                format!("Right {i}"),
                vec![format!("Wrong {i}a"), format!("Right {i}"), format!("Wrong {i}b")],
            )
            .unwrap()
        })
        .collect()
}

pub fn correct(i: usize) -> String {
    format!("Right {i}")
}

pub fn wrong(i: usize) -> String {
    format!("Wrong {i}a")
}

enum QuestionReply {
    Questions(Vec<Question>),
    Status(reqwest::StatusCode),
}

/// Question provider returning a canned reply, optionally held until released.
pub struct StubQuestions {
    reply: QuestionReply,
    gate: Option<Arc<Notify>>,
    requests: Mutex<Vec<(u32, u32)>>,
}

impl StubQuestions {
    pub fn ok(questions: Vec<Question>) -> Self {
        Self {
            reply: QuestionReply::Questions(questions),
            gate: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: reqwest::StatusCode) -> Self {
        Self {
            reply: QuestionReply::Status(status),
            gate: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Hold every response until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn requests(&self) -> Vec<(u32, u32)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionProvider for StubQuestions {
    async fn fetch_questions(
        &self,
        category_id: u32,
        count: u32,
    ) -> Result<Vec<Question>, ProviderError> {
        self.requests.lock().unwrap().push((category_id, count));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.reply {
            QuestionReply::Questions(questions) => Ok(questions.clone()),
            QuestionReply::Status(status) => Err(ProviderError::HttpStatus(*status)),
        }
    }
}

/// Image provider counting its calls, optionally held until released.
pub struct StubImages {
    reply: Option<Result<ImageRef, reqwest::StatusCode>>,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
}

impl StubImages {
    pub fn with_url(url: &str) -> Self {
        Self {
            reply: Some(Ok(ImageRef::parse(url).unwrap())),
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self {
            reply: None,
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(status: reqwest::StatusCode) -> Self {
        Self {
            reply: Some(Err(status)),
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Hold every response until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageProvider for StubImages {
    async fn fetch_celebration(&self) -> Result<Option<ImageRef>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.reply {
            None => Ok(None),
            Some(Ok(image)) => Ok(Some(image.clone())),
            Some(Err(status)) => Err(ProviderError::HttpStatus(*status)),
        }
    }
}
