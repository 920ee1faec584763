//! Static provider endpoint table and lookup
//!
//! `resolve` is a pure function of the name: no I/O, no interior mutability.
//! A provider whose deployment left the client credentials empty resolves to
//! `None` exactly like an unknown name, so callers report both as
//! "provider not supported" instead of producing a broken redirect.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::RegistryConfig;

/// How client id/secret travel during a token or refresh exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialTransmission {
    /// `client_id`/`client_secret` as form fields in the request body.
    InBody,
    /// `Authorization: Basic base64(client_id:client_secret)` header,
    /// credentials omitted from the body.
    InHeader,
}

/// OAuth endpoint configuration for one provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub authorize_url: String,
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Space-joined when building the authorize request.
    pub scopes: Vec<String>,
    /// Ordered overrides appended after the required authorize params; on a
    /// key collision the entry here wins because it is appended last.
    pub extra_authorize_params: Vec<(&'static str, &'static str)>,
    pub credential_transmission: CredentialTransmission,
}

impl ProviderConfig {
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }

    fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

/// Immutable provider-name → config mapping, built once at process start.
pub struct ProviderRegistry {
    providers: HashMap<&'static str, ProviderConfig>,
}

impl ProviderRegistry {
    /// Build the registry from injected credentials. Endpoint URLs, scopes
    /// and extra params are fixed per provider; only credentials vary by
    /// deployment.
    pub fn new(config: RegistryConfig) -> Self {
        let mut providers = HashMap::new();

        providers.insert(
            "google",
            ProviderConfig {
                authorize_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
                token_url: "https://oauth2.googleapis.com/token".to_string(),
                client_id: config.google.client_id,
                client_secret: config.google.client_secret,
                scopes: vec!["https://mail.google.com/".to_string()],
                extra_authorize_params: vec![("access_type", "offline"), ("prompt", "consent")],
                credential_transmission: CredentialTransmission::InBody,
            },
        );

        providers.insert(
            "microsoft",
            ProviderConfig {
                authorize_url: "https://login.microsoftonline.com/common/oauth2/v2.0/authorize"
                    .to_string(),
                token_url: "https://login.microsoftonline.com/common/oauth2/v2.0/token"
                    .to_string(),
                client_id: config.microsoft.client_id,
                client_secret: config.microsoft.client_secret,
                scopes: vec![
                    "https://outlook.office.com/IMAP.AccessAsUser.All".to_string(),
                    "https://outlook.office.com/SMTP.Send".to_string(),
                    "offline_access".to_string(),
                ],
                extra_authorize_params: vec![("response_mode", "query")],
                credential_transmission: CredentialTransmission::InBody,
            },
        );

        providers.insert(
            "yahoo",
            ProviderConfig {
                authorize_url: "https://api.login.yahoo.com/oauth2/request_auth".to_string(),
                token_url: "https://api.login.yahoo.com/oauth2/get_token".to_string(),
                client_id: config.yahoo.client_id,
                client_secret: config.yahoo.client_secret,
                scopes: vec!["mail-r".to_string()],
                extra_authorize_params: vec![],
                credential_transmission: CredentialTransmission::InHeader,
            },
        );

        providers.insert(
            "aol",
            ProviderConfig {
                authorize_url: "https://api.login.aol.com/oauth2/request_auth".to_string(),
                token_url: "https://api.login.aol.com/oauth2/get_token".to_string(),
                client_id: config.aol.client_id,
                client_secret: config.aol.client_secret,
                scopes: vec!["mail-r".to_string()],
                extra_authorize_params: vec![],
                credential_transmission: CredentialTransmission::InHeader,
            },
        );

        providers.insert(
            "yandex",
            ProviderConfig {
                authorize_url: "https://oauth.yandex.com/authorize".to_string(),
                token_url: "https://oauth.yandex.com/token".to_string(),
                client_id: config.yandex.client_id,
                client_secret: config.yandex.client_secret,
                scopes: vec![],
                extra_authorize_params: vec![],
                credential_transmission: CredentialTransmission::InBody,
            },
        );

        providers.insert(
            "zoho",
            ProviderConfig {
                authorize_url: "https://accounts.zoho.com/oauth/v2/auth".to_string(),
                token_url: "https://accounts.zoho.com/oauth/v2/token".to_string(),
                client_id: config.zoho.client_id,
                client_secret: config.zoho.client_secret,
                scopes: vec![
                    "ZohoMail.accounts.ALL".to_string(),
                    "ZohoMail.messages.ALL".to_string(),
                    "ZohoMail.folders.ALL".to_string(),
                ],
                extra_authorize_params: vec![("access_type", "offline")],
                credential_transmission: CredentialTransmission::InBody,
            },
        );

        providers.insert(
            "mailru",
            ProviderConfig {
                authorize_url: "https://oauth.mail.ru/login".to_string(),
                token_url: "https://oauth.mail.ru/token".to_string(),
                client_id: config.mailru.client_id,
                client_secret: config.mailru.client_secret,
                scopes: vec!["userinfo".to_string(), "mail.imap".to_string()],
                extra_authorize_params: vec![],
                credential_transmission: CredentialTransmission::InBody,
            },
        );

        Self { providers }
    }

    /// Build a registry from an explicit table. Integration tests use this
    /// to point token endpoints at a mock server; production code goes
    /// through `new`.
    pub fn from_providers(providers: HashMap<&'static str, ProviderConfig>) -> Self {
        Self { providers }
    }

    /// Look up a provider by name.
    ///
    /// Returns `None` both for names not in the table and for providers
    /// deployed without credentials; the two cases are indistinguishable to
    /// callers by design.
    pub fn resolve(&self, name: &str) -> Option<&ProviderConfig> {
        let config = self.providers.get(name)?;
        if !config.is_configured() {
            warn!(provider = name, "provider requested but has no credentials configured");
            return None;
        }
        Some(config)
    }

    /// Names of all providers in the table, configured or not.
    pub fn provider_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.providers.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
