use axum::extract::Path;

use crate::api::v1::dto::{MoodResponse, UseCaseResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::breathing::{self, BreathingPattern};
use crate::llm::UseCase;
use crate::mood;

/// `GET /api/v1/use-cases`
#[utoipa::path(
    get,
    path = "/api/v1/use-cases",
    tag = "catalog",
    responses(
        (status = 200, description = "Support personas and their system prompts", body = Vec<UseCaseResponse>),
    )
)]
pub async fn list_use_cases() -> ApiResponse<Vec<UseCaseResponse>> {
    ApiResponse::success(UseCase::ALL.into_iter().map(UseCaseResponse::from).collect())
}

/// `GET /api/v1/breathing/patterns`
#[utoipa::path(
    get,
    path = "/api/v1/breathing/patterns",
    tag = "catalog",
    responses(
        (status = 200, description = "Built-in breathing patterns", body = Vec<BreathingPattern>),
    )
)]
pub async fn list_breathing_patterns() -> ApiResponse<Vec<BreathingPattern>> {
    ApiResponse::success(breathing::presets())
}

/// `GET /api/v1/breathing/patterns/{key}`
#[utoipa::path(
    get,
    path = "/api/v1/breathing/patterns/{key}",
    tag = "catalog",
    params(("key" = String, Path, description = "Pattern key, e.g. `box`")),
    responses(
        (status = 200, description = "The pattern", body = BreathingPattern),
        (status = 404, description = "No such pattern", body = ApiError),
    )
)]
pub async fn get_breathing_pattern(Path(key): Path<String>) -> ApiResponse<BreathingPattern> {
    match breathing::preset(&key) {
        Some(pattern) => ApiResponse::success(pattern),
        None => ApiResponse::error(
            ErrorCode::NotFound,
            format!("Breathing pattern '{key}' not found"),
        ),
    }
}

/// `GET /api/v1/moods`
#[utoipa::path(
    get,
    path = "/api/v1/moods",
    tag = "catalog",
    responses(
        (status = 200, description = "Mood gradient table", body = Vec<MoodResponse>),
    )
)]
pub async fn list_moods() -> ApiResponse<Vec<MoodResponse>> {
    ApiResponse::success(mood::mood_table().into_iter().map(MoodResponse::from).collect())
}
