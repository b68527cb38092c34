use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const WORRY_REQUIRED: &str = "Worry text is required";
pub const NO_SUGGESTION: &str = "No suggestion received from AI";

#[derive(Error, Debug)]
pub enum SolaceError {
    #[error("{0}")]
    Validation(String),

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("AI service requires payment. Please check your billing settings.")]
    PaymentRequired,

    #[error("LLM_API_KEY is not configured")]
    MissingCredential,

    #[error("{0}")]
    Upstream(String),

    #[error("No suggestion received from AI")]
    EmptySuggestion,

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl SolaceError {
    pub fn worry_required() -> Self {
        Self::Validation(WORRY_REQUIRED.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            SolaceError::Validation(_) => StatusCode::BAD_REQUEST,
            SolaceError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            SolaceError::PaymentRequired => StatusCode::PAYMENT_REQUIRED,
            SolaceError::MissingCredential
            | SolaceError::Upstream(_)
            | SolaceError::EmptySuggestion
            | SolaceError::Http(_)
            | SolaceError::Json(_)
            | SolaceError::Io(_)
            | SolaceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SolaceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, SolaceError>;
