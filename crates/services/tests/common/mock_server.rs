//! In-process HTTP server answering the trivia and image clients with queued replies.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::IntoResponse;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// What the server saw for one request.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
}

impl CapturedRequest {
    /// Whether the query string holds `key=value` exactly.
    pub fn has_param(&self, key: &str, value: &str) -> bool {
        self.query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .any(|(k, v)| k == key && v == value)
    }
}

/// A queued reply; the server answers 404 once the queue runs dry.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: StatusCode,
    body: String,
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_owned(),
        }
    }

    pub fn error(status: u16) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: r#"{"message":"unavailable"}"#.to_owned(),
        }
    }
}

#[derive(Default)]
struct Exchange {
    seen: Vec<CapturedRequest>,
    replies: VecDeque<MockResponse>,
}

type Shared = Arc<Mutex<Exchange>>;

pub struct MockServer {
    addr: SocketAddr,
    exchange: Shared,
    task: JoinHandle<()>,
}

impl MockServer {
    pub async fn start() -> Self {
        let exchange = Shared::default();
        let router = Router::new()
            .fallback(reply)
            .with_state(Arc::clone(&exchange));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            addr,
            exchange,
            task,
        }
    }

    pub fn enqueue(&self, response: MockResponse) {
        self.exchange.lock().unwrap().replies.push_back(response);
    }

    pub fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.exchange.lock().unwrap().seen.clone()
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn reply(State(exchange): State<Shared>, method: Method, uri: Uri) -> impl IntoResponse {
    let mut exchange = exchange.lock().unwrap();
    exchange.seen.push(CapturedRequest {
        method,
        path: uri.path().to_owned(),
        query: uri.query().unwrap_or_default().to_owned(),
    });
    let next = exchange
        .replies
        .pop_front()
        .unwrap_or_else(|| MockResponse::error(404));

    (
        next.status,
        [(header::CONTENT_TYPE, "application/json")],
        next.body,
    )
}
