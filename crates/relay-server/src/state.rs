//! Server state management
//!
//! Shared state for the web server: provider registry, session manager, and
//! the token exchanger. All request handlers borrow this; there is no other
//! in-process mutable state.

use std::sync::Arc;

use relay_oauth::TokenExchanger;
use relay_providers::ProviderRegistry;
use relay_sessions::SessionManager;

/// Web server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Externally visible origin, e.g. `https://relay.example.com`. Used to
    /// build `auth_url` and `redirect_uri`, which must be stable across
    /// initiate/login/callback because providers validate the redirect URI
    /// exactly.
    pub public_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            public_origin: "http://127.0.0.1:8080".to_string(),
        }
    }
}

/// Shared application state, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ProviderRegistry>,
    pub sessions: Arc<SessionManager>,
    pub exchanger: Arc<TokenExchanger>,
    pub public_origin: String,
}

impl AppState {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        sessions: Arc<SessionManager>,
        exchanger: Arc<TokenExchanger>,
        public_origin: String,
    ) -> Self {
        Self {
            registry,
            sessions,
            exchanger,
            public_origin: public_origin.trim_end_matches('/').to_string(),
        }
    }

    /// The redirect URI registered with every provider for this deployment.
    pub fn redirect_uri(&self) -> String {
        format!("{}/callback", self.public_origin)
    }

    /// The login URL handed back to the client from `/initiate`.
    pub fn login_url(&self, session_id: &str) -> String {
        format!("{}/login/{}", self.public_origin, session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_providers::RegistryConfig;
    use relay_sessions::MemoryStore;

    #[test]
    fn test_origin_trailing_slash_trimmed() {
        let state = AppState::new(
            Arc::new(ProviderRegistry::new(RegistryConfig::default())),
            Arc::new(SessionManager::new(Arc::new(MemoryStore::new()))),
            Arc::new(TokenExchanger::new()),
            "https://relay.example.com/".to_string(),
        );

        assert_eq!(state.redirect_uri(), "https://relay.example.com/callback");
        assert_eq!(
            state.login_url("abc123"),
            "https://relay.example.com/login/abc123"
        );
    }
}
