//! GET /login/{session_id} - redirect the browser to the provider

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::info;

use relay_oauth::build_authorize_url;

use crate::state::AppState;

/// Redirect to the provider authorize URL for this session.
///
/// Responds 302 with the session id riding along as the OAuth `state`
/// parameter. An expired or unknown session is a plain 404; the two are
/// indistinguishable by design.
#[utoipa::path(
    get,
    path = "/login/{session_id}",
    tag = "relay",
    params(("session_id" = String, Path, description = "Opaque session identifier")),
    responses(
        (status = 302, description = "Redirect to the provider authorize URL"),
        (status = 404, description = "Session not found or expired")
    )
)]
pub async fn login(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    let session = match state.sessions.get_session(&session_id).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, "Invalid or expired session").into_response();
        }
        Err(e) => return crate::error::internal_error(&e),
    };

    // The session can only exist if the provider resolved at initiate time,
    // but credentials may have been rotated out since.
    let Some(config) = state.registry.resolve(&session.provider) else {
        return (StatusCode::BAD_REQUEST, "Provider not supported").into_response();
    };

    let authorize_url = build_authorize_url(config, &session.id, &state.redirect_uri());
    info!(session_id = %session.id, provider = %session.provider, "redirecting to provider");

    (StatusCode::FOUND, [(header::LOCATION, authorize_url)]).into_response()
}
