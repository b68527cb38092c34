use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Solace API",
        version = "1.0.0",
        description = "Companion support gateway and wellness catalogs.",
    ),
    paths(
        handlers::health::health_check,
        handlers::support::companion_support,
        handlers::catalog::list_use_cases,
        handlers::catalog::list_breathing_patterns,
        handlers::catalog::get_breathing_pattern,
        handlers::catalog::list_moods,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        // Support
        dto::support::SupportRequest,
        dto::support::SupportResponse,
        dto::support::SupportError,
        crate::models::ChatTurn,
        crate::models::ChatRole,
        // Catalogs
        dto::catalog::UseCaseResponse,
        dto::catalog::MoodResponse,
        crate::llm::UseCase,
        crate::mood::MoodKey,
        crate::breathing::BreathingPattern,
        crate::breathing::Phase,
        crate::breathing::PhaseKind,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::LlmStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "support", description = "AI companion replies"),
        (name = "catalog", description = "Use cases, breathing patterns and moods"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
