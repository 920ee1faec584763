//! OpenAPI document for the relay's external protocol

use axum::response::IntoResponse;
use axum::Json;
use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::routes::initiate::{InitiateRequest, InitiateResponse};
use crate::routes::poll::PollResponse;
use crate::routes::refresh::RefreshRequest;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "mailrelay",
        description = "Multi-provider OAuth2 relay for mail clients",
    ),
    paths(
        crate::routes::initiate::initiate,
        crate::routes::login::login,
        crate::routes::callback::callback,
        crate::routes::poll::poll,
        crate::routes::refresh::refresh,
    ),
    components(schemas(
        InitiateRequest,
        InitiateResponse,
        PollResponse,
        RefreshRequest,
        ErrorBody,
    )),
    tags((name = "relay", description = "Session and token exchange endpoints"))
)]
pub struct ApiDoc;

/// GET /openapi.json
pub async fn serve_openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_lists_all_endpoints() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        for expected in [
            "/initiate",
            "/login/{session_id}",
            "/callback",
            "/poll/{session_id}",
            "/refresh",
        ] {
            assert!(paths.contains(&expected.to_string()), "missing {expected}");
        }
    }
}
