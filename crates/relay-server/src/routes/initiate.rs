//! POST /initiate - create a session and hand back the login URL

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::error::{bad_request, internal_error, ErrorBody};
use crate::state::AppState;

/// Session creation request.
///
/// Fields are optional at the serde level so that "missing field" and
/// "malformed JSON" produce distinct error messages, as the contract
/// requires.
#[derive(Debug, Deserialize, ToSchema)]
pub struct InitiateRequest {
    /// End-user mailbox address, opaque to the relay.
    #[schema(example = "user@example.com")]
    pub email: Option<String>,
    /// Provider registry key.
    #[schema(example = "google")]
    pub provider: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InitiateResponse {
    pub session_id: String,
    /// URL the client opens in the user's browser.
    pub auth_url: String,
}

/// Create a pending session for `(email, provider)`.
///
/// The provider is resolved before anything touches the session store, so an
/// unsupported provider never creates state.
#[utoipa::path(
    post,
    path = "/initiate",
    tag = "relay",
    request_body = InitiateRequest,
    responses(
        (status = 200, description = "Session created", body = InitiateResponse),
        (status = 400, description = "Invalid JSON, missing fields, or unsupported provider", body = ErrorBody)
    )
)]
pub async fn initiate(
    State(state): State<AppState>,
    body: Result<Json<InitiateRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = body else {
        return bad_request("Invalid JSON");
    };

    let (email, provider) = match (&request.email, &request.provider) {
        (Some(email), Some(provider)) if !email.is_empty() && !provider.is_empty() => {
            (email, provider)
        }
        _ => return bad_request("Missing email or provider"),
    };

    if state.registry.resolve(provider).is_none() {
        debug!(provider, "initiate rejected: provider not supported");
        return bad_request("Provider not supported");
    }

    match state.sessions.create_session(email, provider).await {
        Ok(session) => Json(InitiateResponse {
            auth_url: state.login_url(&session.id),
            session_id: session.id,
        })
        .into_response(),
        Err(e) => internal_error(&e),
    }
}
