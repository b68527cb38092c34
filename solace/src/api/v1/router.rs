use axum::{
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;

pub fn v1_router() -> Router<AppState> {
    let breathing = Router::new()
        .route("/patterns", get(handlers::catalog::list_breathing_patterns))
        .route(
            "/patterns/{key}",
            get(handlers::catalog::get_breathing_pattern),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/support", post(handlers::support::companion_support))
        .route("/use-cases", get(handlers::catalog::list_use_cases))
        .route("/moods", get(handlers::catalog::list_moods))
        .nest("/breathing", breathing)
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router())
}
