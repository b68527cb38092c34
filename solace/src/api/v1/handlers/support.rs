use axum::extract::State;
use axum::Json;

use crate::api::extractors::AppJson;
use crate::api::state::AppState;
use crate::api::v1::dto::{SupportError, SupportRequest, SupportResponse};
use crate::error::SolaceError;

/// `POST /functions/v1/companion-support` (also mounted at `/api/v1/support`)
///
/// Forwards the worry, the chosen persona and any prior turns to the
/// chat-completion gateway and returns its first reply.
#[utoipa::path(
    post,
    path = "/api/v1/support",
    tag = "support",
    request_body = SupportRequest,
    responses(
        (status = 200, description = "Supportive reply", body = SupportResponse),
        (status = 400, description = "Missing worry or malformed body", body = SupportError),
        (status = 402, description = "Upstream billing problem", body = SupportError),
        (status = 429, description = "Upstream rate limit", body = SupportError),
        (status = 500, description = "Configuration or upstream failure", body = SupportError),
    )
)]
pub async fn companion_support(
    State(state): State<AppState>,
    AppJson(request): AppJson<SupportRequest>,
) -> Result<Json<SupportResponse>, SolaceError> {
    let query = request.into_query()?;
    let suggestion = state.llm.suggest(&query).await?;

    Ok(Json(SupportResponse { suggestion }))
}
