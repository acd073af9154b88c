//! End-to-end tests of the check endpoint through the router.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use spellgate_core::{EngineError, MAX_TEXT_LEN, SpellEngine};
use spellgate_server::{ServerConfig, SpellServer};
use tower::ServiceExt;

/// Accepts a fixed word list; panics on "boom".
struct WordList {
    words: &'static [&'static str],
    calls: Arc<AtomicUsize>,
}

impl SpellEngine for WordList {
    fn check(&mut self, word: &str) -> Result<bool, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if word == "boom" {
            panic!("engine fault");
        }
        Ok(self.words.contains(&word) || word.bytes().all(|b| b == b'a'))
    }

    fn suggest(&mut self, _word: &str) -> Result<Vec<String>, EngineError> {
        Ok(Vec::new())
    }

    fn analyze(&mut self, _word: &str) -> Result<Vec<String>, EngineError> {
        Ok(Vec::new())
    }
}

fn app_with(config: ServerConfig) -> (Router, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = WordList {
        words: &["I", "a", "have", "pen"],
        calls: Arc::clone(&calls),
    };
    let router = SpellServer::new(config, engine).build_router();
    (router, calls)
}

fn app() -> (Router, Arc<AtomicUsize>) {
    app_with(ServerConfig::default().with_access_log(None))
}

fn post_json(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn post_text(text: &str) -> Request<Body> {
    post_json(serde_json::to_vec(&json!(text)).unwrap())
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn assert_bad_request(router: Router, request: Request<Body>) {
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!("400 Bad Request"));
}

// ---------------------------------------------------------------------------
// Successful checks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn checks_sentence() {
    let (router, calls) = app();
    let response = router.oneshot(post_text("I havv a pen.")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    for name in ["x-check-time", "x-wait-time"] {
        let value = response.headers().get(name).unwrap().to_str().unwrap();
        value.parse::<u64>().unwrap();
    }
    assert_eq!(
        body_json(response).await,
        json!([
            ["I", {"correct": true}],
            [" ", {"note": "ignored", "correct": true}],
            ["havv", {"correct": false}],
            [" ", {"note": "ignored", "correct": true}],
            ["a", {"correct": true}],
            [" ", {"note": "ignored", "correct": true}],
            ["pen", {"correct": true}],
            [".", {"note": "ignored", "correct": true}],
        ])
    );
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn any_path_is_the_check_endpoint() {
    let (router, _) = app();
    let mut request = post_text("pen");
    *request.uri_mut() = "/some/other/path".parse().unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([["pen", {"correct": true}]]));
}

#[tokio::test]
async fn content_type_parameters_are_accepted() {
    let (router, _) = app();
    let mut request = post_text("pen");
    request.headers_mut().insert(
        header::CONTENT_TYPE,
        "application/json; charset=utf-8".parse().unwrap(),
    );
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn separators_only_skip_engine() {
    let (router, calls) = app();
    let response = router.oneshot(post_text("12, 34!")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 7);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn maximum_length_is_accepted() {
    let (router, _) = app();
    let text = "a".repeat(MAX_TEXT_LEN);
    let response = router.oneshot(post_text(&text)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([[text, {"correct": true}]]));
}

#[tokio::test]
async fn fully_escaped_maximum_text_fits_default_body_cap() {
    let (router, calls) = app();
    let body = format!("\"{}\"", "\\u0021".repeat(MAX_TEXT_LEN));
    assert!(body.len() < ServerConfig::default().max_body_bytes);

    let response = router.oneshot(post_json(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), MAX_TEXT_LEN);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn over_maximum_length_is_rejected() {
    let (router, calls) = app();
    assert_bad_request(router, post_text(&"a".repeat(MAX_TEXT_LEN + 1))).await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_text_is_rejected() {
    let (router, _) = app();
    assert_bad_request(router, post_text("")).await;
}

#[tokio::test]
async fn non_ascii_is_rejected() {
    let (router, calls) = app();
    assert_bad_request(router, post_text("caf\u{e9}")).await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn plain_text_content_type_is_rejected() {
    let (router, _) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#""I havv a pen.""#))
        .unwrap();
    assert_bad_request(router, request).await;
}

#[tokio::test]
async fn missing_content_type_is_rejected() {
    let (router, _) = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .body(Body::from(r#""pen""#))
        .unwrap();
    assert_bad_request(router, request).await;
}

#[tokio::test]
async fn non_string_json_is_rejected() {
    for body in [r#"{"text": "pen"}"#, r#"["pen"]"#, "42", "null", "not json"] {
        let (router, _) = app();
        assert_bad_request(router, post_json(body)).await;
    }
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let (router, _) = app_with(
        ServerConfig::default()
            .with_access_log(None)
            .with_max_body_bytes(16),
    );
    assert_bad_request(router, post_text("a perfectly valid but long sentence")).await;
}

// ---------------------------------------------------------------------------
// Redirects and failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_post_redirects() {
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let (router, calls) = app_with(
            ServerConfig::default()
                .with_access_log(None)
                .with_redirect_url("https://example.com/project"),
        );
        let request = Request::builder()
            .method(method.clone())
            .uri("/anything")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FOUND, "{method}");
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://example.com/project"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn engine_panic_returns_500_and_service_recovers() {
    let (router, _) = app();

    let response = router.clone().oneshot(post_text("a boom")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!("500 Internal Server Error"));

    let response = router.oneshot(post_text("pen")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
