//! Deployment credential configuration
//!
//! One `client_id`/`client_secret` pair per supported provider, sourced from
//! environment variables (`GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`, ...).
//! Missing variables are left empty; the registry then treats that provider
//! as unconfigured rather than failing startup.

use serde::Deserialize;

/// Opaque client credential pair for one provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
}

impl Credentials {
    fn from_env(prefix: &str) -> Self {
        Self {
            client_id: std::env::var(format!("{prefix}_CLIENT_ID")).unwrap_or_default(),
            client_secret: std::env::var(format!("{prefix}_CLIENT_SECRET")).unwrap_or_default(),
        }
    }
}

/// Credentials for every provider in the static table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub google: Credentials,
    #[serde(default)]
    pub microsoft: Credentials,
    #[serde(default)]
    pub yahoo: Credentials,
    #[serde(default)]
    pub aol: Credentials,
    #[serde(default)]
    pub yandex: Credentials,
    #[serde(default)]
    pub zoho: Credentials,
    #[serde(default)]
    pub mailru: Credentials,
}

impl RegistryConfig {
    /// Read all provider credentials from the process environment.
    pub fn from_env() -> Self {
        Self {
            google: Credentials::from_env("GOOGLE"),
            microsoft: Credentials::from_env("MICROSOFT"),
            yahoo: Credentials::from_env("YAHOO"),
            aol: Credentials::from_env("AOL"),
            yandex: Credentials::from_env("YANDEX"),
            zoho: Credentials::from_env("ZOHO"),
            mailru: Credentials::from_env("MAILRU"),
        }
    }
}
