//! HTTP API tests against the router, without remote services

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

use seo_assistant::assistant::Assistant;
use seo_assistant::insertion::KeywordInserter;
use seo_assistant::server::{AppState, RouterLimits, create_router};

fn app() -> Router {
    let assistant = Assistant::new(Arc::new(KeywordInserter::default()));
    create_router(
        Arc::new(AppState {
            assistant: Arc::new(assistant),
        }),
        RouterLimits::default(),
    )
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    let body = body.to_string();
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn health_reports_service_configuration() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Backend is running");
    assert_eq!(body["textrazorKeySet"], false);
    assert_eq!(body["geminiKeySet"], false);
    assert_eq!(body["similarityCache"]["size"], 0);
}

#[tokio::test]
async fn analyze_requires_text() {
    let (status, body) = send(post_json("/analyze", &json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Text is required" }));

    let (status, _) = send(post_json("/analyze", &json!({ "text": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn whitespace_only_text_is_accepted() {
    let payload = json!({ "text": "   ", "keyword": "test" });
    let (status, body) = send(post_json("/insert-keyword", &payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updatedText"], "test");
    assert_eq!(body["insertedAt"], 0);
    assert_eq!(body["strategy"], "append");

    let (status, body) = send(post_json("/analyze", &json!({ "text": "  " }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["keywords"], json!([]));
}

#[tokio::test]
async fn analyze_returns_metrics() {
    let text = "Great content helps search engines understand your business.";
    let (status, body) = send(post_json("/analyze", &json!({ "text": text }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["keywords"],
        json!(["Great", "content", "helps", "search", "engines"])
    );
    assert_eq!(
        body["suggestions"],
        "Consider adding keywords: Great, content, helps, search, engines"
    );
    assert!(body["readability"].is_i64());
    assert_eq!(body["sentiment"]["tone"], "Positive");
    assert_eq!(body["sentiment"]["suggestion"], "Your tone is engaging!");
    assert_eq!(body["updatedText"], text);
}

#[tokio::test]
async fn insert_requires_text_and_keyword() {
    for payload in [
        json!({}),
        json!({ "text": "Some text." }),
        json!({ "keyword": "seo" }),
        json!({ "text": "Some text.", "keyword": "" }),
    ] {
        let (status, body) = send(post_json("/insert-keyword", &payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
        assert_eq!(body["error"], "Text and keyword are required");
    }
}

#[tokio::test]
async fn insert_rejects_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/insert-keyword")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Text and keyword are required");
}

#[tokio::test]
async fn insert_keyword_reports_position() {
    let payload = json!({ "text": "The quick fox jumps. It runs fast.", "keyword": "dog" });
    let (status, body) = send(post_json("/insert-keyword", &payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "updatedText": "The quick fox jumps. dog It runs fast.",
            "insertedAt": 21,
            "keywordLength": 3,
            "strategy": "sentence-boundary",
        })
    );
}

#[tokio::test]
async fn insert_keyword_offsets_are_utf16() {
    let payload = json!({ "text": "🚀 Launch day. Go.", "keyword": "kw" });
    let (status, body) = send(post_json("/insert-keyword", &payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updatedText"], "🚀 Launch day. kw Go.");
    assert_eq!(body["insertedAt"], 15);
    assert_eq!(body["keywordLength"], 2);
}

#[tokio::test]
async fn generative_mode_without_service_uses_local_engine() {
    let payload = json!({
        "text": "I love coffee, truly.",
        "keyword": "coffees",
        "mode": "generative",
    });
    let (status, body) = send(post_json("/insert-keyword", &payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updatedText"], "I love coffee coffees, truly.");
    assert_eq!(body["strategy"], "fuzzy-anchor");
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let assistant = Assistant::new(Arc::new(KeywordInserter::default()));
    let app = create_router(
        Arc::new(AppState {
            assistant: Arc::new(assistant),
        }),
        RouterLimits {
            max_body_size: 64,
            ..RouterLimits::default()
        },
    );
    let payload = json!({ "text": "word ".repeat(100), "keyword": "seo" });
    let response = app
        .oneshot(post_json("/insert-keyword", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
