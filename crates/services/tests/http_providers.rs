mod common;

use std::time::Duration;

use reqwest::Client;

use common::init_logging;
use common::mock_server::{MockResponse, MockServer};
use quiz_core::RandomSource;
use quiz_core::model::{Category, FailureKind, Screen};
use services::{
    AppServices, GiphyService, ImageProvider, ProviderError, QuestionProvider, QuizConfig,
    TriviaService,
};

const TRIVIA_BODY: &str = r#"{
    "response_code": 0,
    "results": [
        {
            "type": "multiple",
            "difficulty": "easy",
            "category": "Science &amp; Nature",
            "question": "What does &quot;DNA&quot; stand for?",
            "correct_answer": "Deoxyribonucleic acid",
            "incorrect_answers": ["Dinitrogen acid", "Di&shy;nucleic acid", "Dynamic nucleic acid"]
        },
        {
            "type": "multiple",
            "difficulty": "medium",
            "category": "Science &amp; Nature",
            "question": "Which gas is most abundant in Earth&#039;s atmosphere?",
            "correct_answer": "Nitrogen",
            "incorrect_answers": ["Oxygen", "Argon", "Carbon dioxide"]
        }
    ]
}"#;

const GIPHY_BODY: &str = r#"{
    "data": [
        {"id": "a", "images": {"original": {"url": "https://media.giphy.com/media/a/giphy.gif"}}},
        {"id": "b", "images": {"original": {"url": "https://media.giphy.com/media/b/giphy.gif"}}}
    ],
    "meta": {"status": 200, "msg": "OK"}
}"#;

fn client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn trivia_request_carries_query_and_decodes_entities() {
    init_logging();
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(TRIVIA_BODY));
    let trivia = TriviaService::new(client(), server.url("/api.php"), RandomSource::fixed());

    let questions = trivia.fetch_questions(17, 10).await.unwrap();

    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].prompt(), "What does \"DNA\" stand for?");
    assert_eq!(questions[0].answers()[1], "Dinucleic acid");
    assert_eq!(questions[0].answers()[3], "Deoxyribonucleic acid");
    assert_eq!(
        questions[1].prompt(),
        "Which gas is most abundant in Earth's atmosphere?"
    );

    let requests = server.captured_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, axum::http::Method::GET);
    assert_eq!(requests[0].path, "/api.php");
    assert!(requests[0].has_param("amount", "10"));
    assert!(requests[0].has_param("category", "17"));
    assert!(requests[0].has_param("type", "multiple"));
}

#[tokio::test]
async fn trivia_error_status_is_a_protocol_failure() {
    init_logging();
    let server = MockServer::start().await;
    server.enqueue(MockResponse::error(500));
    let trivia = TriviaService::new(client(), server.url("/api.php"), RandomSource::fixed());

    let err = trivia.fetch_questions(9, 10).await.unwrap_err();

    assert!(matches!(err, ProviderError::HttpStatus(status) if status.as_u16() == 500));
    assert_eq!(err.kind(), FailureKind::Protocol);
}

#[tokio::test]
async fn trivia_malformed_body_is_a_parse_failure() {
    init_logging();
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(r#"{"results": "nope"}"#));
    let trivia = TriviaService::new(client(), server.url("/api.php"), RandomSource::fixed());

    let err = trivia.fetch_questions(9, 10).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Parse);
}

#[tokio::test]
async fn unreachable_trivia_bank_is_a_transport_failure() {
    init_logging();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let trivia = TriviaService::new(
        client(),
        format!("http://{addr}/api.php"),
        RandomSource::fixed(),
    );

    let err = trivia.fetch_questions(9, 10).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transport);
}

#[tokio::test]
async fn giphy_search_sends_filters_and_picks_result() {
    init_logging();
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(GIPHY_BODY));
    let giphy = GiphyService::new(
        client(),
        server.url("/v1/gifs/"),
        Some("test-key".into()),
        RandomSource::fixed(),
    );

    let image = giphy.fetch_celebration().await.unwrap().unwrap();

    assert_eq!(image.as_str(), "https://media.giphy.com/media/a/giphy.gif");
    let requests = server.captured_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/v1/gifs/search");
    assert!(requests[0].has_param("api_key", "test-key"));
    assert!(requests[0].has_param("q", "celebration"));
    assert!(requests[0].has_param("limit", "20"));
    assert!(requests[0].has_param("rating", "g"));
}

#[tokio::test]
async fn giphy_empty_result_set_is_none() {
    init_logging();
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(r#"{"data": []}"#));
    let giphy = GiphyService::new(
        client(),
        server.url("/v1/gifs"),
        Some("test-key".into()),
        RandomSource::seeded(1),
    );

    assert_eq!(giphy.fetch_celebration().await.unwrap(), None);
}

#[tokio::test]
async fn giphy_without_api_key_makes_no_request() {
    init_logging();
    let server = MockServer::start().await;
    let giphy = GiphyService::new(
        client(),
        server.url("/v1/gifs"),
        None,
        RandomSource::fixed(),
    );

    assert!(!giphy.enabled());
    assert_eq!(giphy.fetch_celebration().await.unwrap(), None);
    assert!(server.captured_requests().is_empty());
}

#[tokio::test]
async fn app_services_play_through_against_http_providers() {
    init_logging();
    let server = MockServer::start().await;
    server.enqueue(MockResponse::json(TRIVIA_BODY));
    server.enqueue(MockResponse::json(GIPHY_BODY));

    let config = QuizConfig {
        trivia_base_url: server.url("/api.php"),
        giphy_base_url: server.url("/v1/gifs"),
        question_count: 2,
        http_timeout: Duration::from_secs(5),
        ..QuizConfig::default()
    }
    .with_giphy_api_key("test-key");
    let services = AppServices::from_config(config, RandomSource::fixed()).unwrap();
    assert!(services.celebrations_enabled());
    let quiz = services.quiz();

    let session = quiz.start_quiz(Category::Science).await.unwrap();
    assert_eq!(session.screen(), Screen::Quiz);
    assert_eq!(session.total_questions(), 2);

    quiz.submit_answer("Deoxyribonucleic acid").await.unwrap();
    let done = quiz.submit_answer("Nitrogen").await.unwrap();

    assert_eq!(done.screen(), Screen::Results);
    assert_eq!(done.score(), 2);
    assert_eq!(
        done.celebration().map(|c| c.as_str()),
        Some("https://media.giphy.com/media/a/giphy.gif")
    );

    let requests = server.captured_requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].has_param("amount", "2"));
    assert_eq!(requests[1].path, "/v1/gifs/search");
}
