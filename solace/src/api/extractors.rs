use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::error::SolaceError;

/// `axum::Json` whose rejections become `{ "error": ... }` 400 responses
/// instead of axum's plain-text defaults.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(SolaceError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for SolaceError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> SolaceError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            SolaceError::Validation(format!("Invalid request body: {}", err.body_text()))
        }
        JsonRejection::JsonSyntaxError(err) => {
            SolaceError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => {
            SolaceError::Validation("Missing `Content-Type: application/json` header".to_string())
        }
        JsonRejection::BytesRejection(err) => {
            SolaceError::Validation(format!("Failed to read request body: {}", err.body_text()))
        }
        _ => SolaceError::Validation(rejection.body_text()),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        name: String,
    }

    async fn echo(AppJson(_payload): AppJson<Payload>) -> StatusCode {
        StatusCode::NO_CONTENT
    }

    async fn post_body(content_type: Option<&str>, body: &'static str) -> (StatusCode, String) {
        let app = Router::new().route("/", post(echo));
        let mut request = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            request = request.header("content-type", content_type);
        }
        let response = app
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json["error"].as_str().unwrap_or_default().to_string())
    }

    #[tokio::test]
    async fn syntax_errors_are_bad_requests() {
        let (status, message) = post_body(Some("application/json"), "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.starts_with("JSON syntax error"));
    }

    #[tokio::test]
    async fn shape_errors_are_bad_requests() {
        let (status, message) = post_body(Some("application/json"), r#"{"name": 4}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn missing_content_type_is_a_bad_request() {
        let (status, message) = post_body(None, r#"{"name": "x"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("Content-Type"));
    }
}
