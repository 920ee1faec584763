//! POST /refresh - proxy a refresh-token exchange
//!
//! Stateless: no session is involved, the provider response is passed
//! through verbatim on success.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{bad_request, refresh_exchange_error, ErrorBody};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
    #[schema(example = "google")]
    pub provider: Option<String>,
}

/// Exchange a refresh token for fresh tokens.
///
/// Provider rejections map to a generic `400 Refresh failed` without the
/// provider body — deliberately unlike the callback path.
#[utoipa::path(
    post,
    path = "/refresh",
    tag = "relay",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Provider token JSON, passed through unreshaped"),
        (status = 400, description = "Invalid request, unsupported provider, or refresh rejected", body = ErrorBody),
        (status = 500, description = "Provider unreachable", body = ErrorBody)
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    body: Result<Json<RefreshRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = body else {
        return bad_request("Invalid JSON");
    };

    let (refresh_token, provider) = match (&request.refresh_token, &request.provider) {
        (Some(token), Some(provider)) if !token.is_empty() && !provider.is_empty() => {
            (token, provider)
        }
        _ => return bad_request("Missing refresh_token or provider"),
    };

    let Some(config) = state.registry.resolve(provider) else {
        return bad_request("Provider not supported");
    };

    match state.exchanger.refresh(config, refresh_token).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => refresh_exchange_error(e),
    }
}
