//! Token and refresh exchange against provider token endpoints
//!
//! One form-encoded POST per exchange, bounded by the client-level timeout.
//! No retries: a transport failure or provider error is reported to the
//! caller, who decides whether to re-drive the flow.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use relay_providers::{CredentialTransmission, ProviderConfig};
use relay_types::{AppError, AppResult, TokenSet};

/// Outbound request timeout for token and refresh exchanges.
const EXCHANGE_TIMEOUT_SECS: u64 = 30;

/// Default token lifetime when the provider omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

/// Token response from a provider token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Performs code and refresh exchanges over a shared HTTPS client.
pub struct TokenExchanger {
    client: Client,
}

impl TokenExchanger {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(EXCHANGE_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Exchange an authorization code for tokens.
    ///
    /// The body always carries `code`, `grant_type=authorization_code` and
    /// `redirect_uri`. Credentials travel per the provider's transmission
    /// method: `InHeader` providers get a Basic header and no credential
    /// body fields, `InBody` providers the reverse.
    pub async fn exchange_code(
        &self,
        config: &ProviderConfig,
        code: &str,
        redirect_uri: &str,
    ) -> AppResult<TokenSet> {
        let mut params = vec![
            ("code", code.to_string()),
            ("grant_type", "authorization_code".to_string()),
            ("redirect_uri", redirect_uri.to_string()),
        ];

        let response = self.token_request(config, &mut params).await?;
        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("failed to parse token response: {e}")))?;

        info!(token_url = %config.token_url, "code exchange successful");
        Ok(into_token_set(token_response))
    }

    /// Exchange a refresh token for new tokens, passing the provider's JSON
    /// through to the caller without reshaping.
    pub async fn refresh(
        &self,
        config: &ProviderConfig,
        refresh_token: &str,
    ) -> AppResult<serde_json::Value> {
        let mut params = vec![
            ("refresh_token", refresh_token.to_string()),
            ("grant_type", "refresh_token".to_string()),
        ];

        let response = self.token_request(config, &mut params).await?;
        let body = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("failed to parse refresh response: {e}")))?;

        info!(token_url = %config.token_url, "refresh exchange successful");
        Ok(body)
    }

    /// Send one form-encoded POST to the provider token endpoint, applying
    /// the credential transmission rules and mapping the failure classes.
    async fn token_request(
        &self,
        config: &ProviderConfig,
        params: &mut Vec<(&str, String)>,
    ) -> AppResult<reqwest::Response> {
        let mut request = self.client.post(&config.token_url);

        match config.credential_transmission {
            CredentialTransmission::InHeader => {
                let auth = BASE64.encode(format!("{}:{}", config.client_id, config.client_secret));
                request = request.header(reqwest::header::AUTHORIZATION, format!("Basic {auth}"));
            }
            CredentialTransmission::InBody => {
                params.push(("client_id", config.client_id.clone()));
                params.push(("client_secret", config.client_secret.clone()));
            }
        }

        let response = request
            .form(params)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("token endpoint unreachable: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!(token_url = %config.token_url, status, "provider rejected exchange: {body}");
            return Err(AppError::Exchange { status, body });
        }

        Ok(response)
    }
}

impl Default for TokenExchanger {
    fn default() -> Self {
        Self::new()
    }
}

fn into_token_set(response: TokenResponse) -> TokenSet {
    let expires_in = response.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
    TokenSet {
        access_token: response.access_token,
        refresh_token: response.refresh_token,
        expires_at: Utc::now().timestamp() + expires_in,
    }
}
