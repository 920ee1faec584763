//! Error responses for the HTTP surface
//!
//! All `AppError` handling happens here, at the boundary: no error ever
//! crosses back into session state. The callback and refresh paths map the
//! same broker errors differently on purpose — callback surfaces the raw
//! provider error body, refresh answers with a generic message — and that
//! asymmetry is part of the external contract.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use relay_types::AppError;

/// Machine-readable JSON error body, `{"error": "..."}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Provider not supported")]
    pub error: String,
}

/// `400 {"error": msg}`
pub fn bad_request(msg: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: msg.to_string(),
        }),
    )
        .into_response()
}

/// `404 {"error": msg}`
pub fn not_found(msg: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: msg.to_string(),
        }),
    )
        .into_response()
}

/// `500 {"error": "Internal Server Error"}`, logging the cause server-side.
pub fn internal_error(err: &AppError) -> Response {
    error!("internal error: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "Internal Server Error".to_string(),
        }),
    )
        .into_response()
}

/// Map a broker failure on the callback path. The raw provider body is
/// surfaced for diagnosability; transport failures stay generic.
pub fn callback_exchange_error(err: AppError) -> Response {
    match err {
        AppError::Exchange { status, body } => {
            error!(status, "token exchange rejected by provider: {body}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Token exchange failed: {body}"),
            )
                .into_response()
        }
        other => {
            error!("token exchange failed: {other}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Map a broker failure on the refresh path. Unlike the callback path the
/// provider body is not leaked; the client gets a generic `Refresh failed`.
pub fn refresh_exchange_error(err: AppError) -> Response {
    match err {
        AppError::Exchange { status, .. } => {
            error!(status, "refresh rejected by provider");
            bad_request("Refresh failed")
        }
        other => internal_error(&other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_error_leaks_provider_body() {
        let response = callback_exchange_error(AppError::Exchange {
            status: 400,
            body: "invalid_grant".to_string(),
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_refresh_error_is_generic() {
        let response = refresh_exchange_error(AppError::Exchange {
            status: 400,
            body: "secret provider details".to_string(),
        });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_transport_error_maps_to_500_on_both_paths() {
        let response =
            callback_exchange_error(AppError::Transport("connection refused".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response =
            refresh_exchange_error(AppError::Transport("connection refused".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
