//! GET /callback - exchange the authorization code and finish the session

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use tracing::{info, warn};

use relay_types::AppError;

use crate::error::callback_exchange_error;
use crate::pages::SUCCESS_PAGE;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// Provider redirect target. Validates the `state` against the session
/// store, exchanges the code for tokens, and rewrites the session as
/// authenticated.
///
/// A failed exchange leaves the session `Pending`; the browser may retry the
/// callback until the session TTL runs out, though the provider will usually
/// reject a re-used code.
#[utoipa::path(
    get,
    path = "/callback",
    tag = "relay",
    params(
        ("code" = Option<String>, Query, description = "Authorization code"),
        ("state" = Option<String>, Query, description = "Session id round-tripped through the provider")
    ),
    responses(
        (status = 200, description = "HTML success page"),
        (status = 400, description = "Missing code/state or unknown session state"),
        (status = 500, description = "Exchange failed; body carries the provider error text")
    )
)]
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let (Some(code), Some(session_id)) = (query.code, query.state) else {
        return (StatusCode::BAD_REQUEST, "Missing code or state").into_response();
    };

    // No outbound call happens unless the state maps to a live session.
    let session = match state.sessions.get_session(&session_id).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            warn!("callback with unknown or expired state");
            return (StatusCode::BAD_REQUEST, "Invalid session state").into_response();
        }
        Err(e) => return crate::error::internal_error(&e),
    };

    let Some(config) = state.registry.resolve(&session.provider) else {
        return (StatusCode::BAD_REQUEST, "Provider not supported").into_response();
    };

    let tokens = match state
        .exchanger
        .exchange_code(config, &code, &state.redirect_uri())
        .await
    {
        Ok(tokens) => tokens,
        Err(e) => return callback_exchange_error(e),
    };

    match state.sessions.mark_authenticated(&session_id, tokens).await {
        Ok(_) => {
            info!(session_id = %session_id, "callback completed");
            Html(SUCCESS_PAGE).into_response()
        }
        // Session expired between the store read and the rewrite
        Err(AppError::NotFound(_)) => {
            (StatusCode::BAD_REQUEST, "Invalid session state").into_response()
        }
        Err(e) => crate::error::internal_error(&e),
    }
}
