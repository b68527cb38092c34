use axum::http::{header, HeaderName, Method};
use axum::routing::post;
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::middleware::request_id_middleware;
use super::v1;
use super::AppState;

pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Path the web client already calls; kept stable alongside `/api/v1/support`.
pub const COMPANION_SUPPORT_PATH: &str = "/functions/v1/companion-support";

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            COMPANION_SUPPORT_PATH,
            post(v1::handlers::support::companion_support),
        )
        .nest("/api/v1", v1::router::v1_router())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
