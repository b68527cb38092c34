mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use solace::api::{create_router, COMPANION_SUPPORT_PATH};

use common::{app_state, completion_body};

fn support_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(COMPANION_SUPPORT_PATH)
        .header("content-type", "application/json")
        .header("apikey", "anon")
        .header("x-client-info", "web/1.0")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(server: &MockServer, api_key: Option<&str>, body: Value) -> (StatusCode, Value) {
    let app = create_router(app_state(&format!("{}/v1", server.uri()), api_key));
    let response = app.oneshot(support_request(body)).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn upstream_replying(status: u16, body: Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn successful_reply_is_returned_as_suggestion() {
    let server = upstream_replying(200, completion_body("Break it into three steps...")).await;

    let (status, body) = send(
        &server,
        Some("test-key"),
        json!({ "worry": "I feel anxious about my exam", "useCase": "problem-solving" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "suggestion": "Break it into three steps..." }));
}

#[tokio::test]
async fn upstream_statuses_map_to_client_errors() {
    let cases = [
        (
            429,
            StatusCode::TOO_MANY_REQUESTS,
            "Rate limit exceeded. Please try again later.",
        ),
        (
            402,
            StatusCode::PAYMENT_REQUIRED,
            "AI service requires payment. Please check your billing settings.",
        ),
        (500, StatusCode::INTERNAL_SERVER_ERROR, "AI gateway error: 500"),
    ];

    for (upstream, expected, message) in cases {
        let server = upstream_replying(upstream, json!({ "error": "upstream" })).await;
        let (status, body) = send(&server, Some("test-key"), json!({ "worry": "hi" })).await;

        assert_eq!(status, expected, "upstream {upstream}");
        assert_eq!(body, json!({ "error": message }));
    }
}

#[tokio::test]
async fn empty_completion_is_a_server_error() {
    let server = upstream_replying(200, completion_body("")).await;

    let (status, body) = send(&server, Some("test-key"), json!({ "worry": "hi" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "No suggestion received from AI" }));
}

#[tokio::test]
async fn validation_happens_before_any_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
        .expect(0)
        .mount(&server)
        .await;

    for body in [json!({}), json!({ "worry": "" }), json!({ "worry": 7 })] {
        let (status, response) = send(&server, Some("test-key"), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({ "error": "Worry text is required" }));
    }

    let (status, _) = send(&server, None, json!({ "worry": "hi" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn attachment_reaches_upstream_as_second_part() {
    let server = upstream_replying(200, completion_body("Nice desk.")).await;

    let (status, _) = send(
        &server,
        Some("test-key"),
        json!({
            "worry": "What do you think?",
            "attachmentUrl": "https://img.example/desk.png",
            "conversationHistory": [{ "role": "user", "content": "Earlier" }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let requests = server.received_requests().await.unwrap();
    let sent: Value = requests[0].body_json().unwrap();
    let last = sent["messages"].as_array().unwrap().last().unwrap().clone();
    let parts = last["content"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["type"], "text");
    assert_eq!(parts[1]["type"], "image_url");
    assert_eq!(parts[1]["image_url"]["url"], "https://img.example/desk.png");
}
