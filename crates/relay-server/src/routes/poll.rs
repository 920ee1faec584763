//! GET /poll/{session_id} - session status for the waiting client

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{internal_error, not_found, ErrorBody};
use crate::state::AppState;

/// Poll response. Token fields are present only once the session is
/// authenticated.
#[derive(Debug, Serialize, ToSchema)]
pub struct PollResponse {
    #[schema(example = "pending")]
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

/// Report the session status, with tokens once the callback has landed.
///
/// The client loops on this endpoint after `/initiate`; all retry policy
/// lives on the client side.
#[utoipa::path(
    get,
    path = "/poll/{session_id}",
    tag = "relay",
    params(("session_id" = String, Path, description = "Opaque session identifier")),
    responses(
        (status = 200, description = "Session status, tokens included once authenticated", body = PollResponse),
        (status = 404, description = "Session not found or expired", body = ErrorBody)
    )
)]
pub async fn poll(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    let session = match state.sessions.get_session(&session_id).await {
        Ok(Some(session)) => session,
        Ok(None) => return not_found("Invalid session"),
        Err(e) => return internal_error(&e),
    };

    if !session.is_authenticated() {
        return Json(PollResponse {
            status: "pending",
            email: None,
            provider: None,
            access_token: None,
            refresh_token: None,
            expires_at: None,
        })
        .into_response();
    }

    Json(PollResponse {
        status: "authenticated",
        email: Some(session.email),
        provider: Some(session.provider),
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        expires_at: session.expires_at,
    })
    .into_response()
}
