//! Session lifecycle manager
//!
//! The only component permitted to construct or mutate `Session` records.
//! Sessions are created `Pending` with a short TTL and rewritten in place
//! once the callback exchange succeeds; everything else is left to TTL
//! expiry.

use std::sync::Arc;
use std::time::Duration;

use ring::rand::{SecureRandom, SystemRandom};
use tracing::{debug, info, warn};

use relay_types::{AppError, AppResult, Session, SessionStatus, TokenSet};

use crate::store::SessionStore;

/// TTL for a freshly created session waiting on the browser flow.
pub const PENDING_TTL: Duration = Duration::from_secs(600);

/// TTL granted after a successful exchange, giving the polling client a
/// window to retrieve the tokens.
pub const AUTHENTICATED_TTL: Duration = Duration::from_secs(3600);

const SESSION_ID_LEN: usize = 32;
const SESSION_ID_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Session lifecycle manager over an expiring key-value store.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    rng: SystemRandom,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            rng: SystemRandom::new(),
        }
    }

    /// Create a `Pending` session and persist it with the short TTL.
    ///
    /// Callers validate that `email` is non-empty and `provider` resolves in
    /// the registry before getting here. No id collision check is performed;
    /// the id space makes collisions negligible.
    pub async fn create_session(&self, email: &str, provider: &str) -> AppResult<Session> {
        let session = Session {
            id: self.generate_session_id()?,
            email: email.to_string(),
            provider: provider.to_string(),
            status: SessionStatus::Pending,
            created_at: chrono::Utc::now().timestamp(),
            access_token: None,
            refresh_token: None,
            expires_at: None,
        };

        self.persist(&session, PENDING_TTL).await?;
        info!(session_id = %session.id, provider, "created pending session");
        Ok(session)
    }

    /// Fetch a session by id. `None` covers both "never existed" and
    /// "expired"; the two are deliberately indistinguishable.
    pub async fn get_session(&self, id: &str) -> AppResult<Option<Session>> {
        match self.store.get(id).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Attach tokens to a session and flip it to `Authenticated`, extending
    /// the TTL so the polling client can pick the tokens up.
    ///
    /// Read-modify-write against a store with no compare-and-swap: two
    /// concurrent callbacks can both get here, in which case the first write
    /// wins and the second exchange's tokens are dropped. A session that is
    /// already `Authenticated` is returned unchanged rather than overwritten.
    pub async fn mark_authenticated(&self, id: &str, tokens: TokenSet) -> AppResult<Session> {
        let mut session = self
            .get_session(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("session {id} absent or expired")))?;

        if session.is_authenticated() {
            warn!(session_id = id, "session already authenticated, keeping existing tokens");
            return Ok(session);
        }

        session.status = SessionStatus::Authenticated;
        session.access_token = Some(tokens.access_token);
        session.refresh_token = tokens.refresh_token;
        session.expires_at = Some(tokens.expires_at);

        self.persist(&session, AUTHENTICATED_TTL).await?;
        info!(session_id = id, provider = %session.provider, "session authenticated");
        Ok(session)
    }

    async fn persist(&self, session: &Session, ttl: Duration) -> AppResult<()> {
        let raw = serde_json::to_string(session)?;
        self.store.put(&session.id, raw, ttl).await
    }

    /// Generate a 32-character alphanumeric id from the system CSPRNG. The
    /// id doubles as the OAuth `state` parameter, so it must be unguessable.
    fn generate_session_id(&self) -> AppResult<String> {
        let mut bytes = [0u8; SESSION_ID_LEN];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| AppError::Internal("failed to generate random bytes".to_string()))?;

        let id = bytes
            .iter()
            .map(|b| SESSION_ID_ALPHABET[*b as usize % SESSION_ID_ALPHABET.len()] as char)
            .collect();
        debug!("generated new session id");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn manager() -> SessionManager {
        SessionManager::new(Arc::new(MemoryStore::new()))
    }

    fn tokens() -> TokenSet {
        TokenSet {
            access_token: "at".to_string(),
            refresh_token: Some("rt".to_string()),
            expires_at: 1_700_003_600,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let manager = manager();
        let session = manager.create_session("user@example.com", "google").await.unwrap();

        let fetched = manager.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "user@example.com");
        assert_eq!(fetched.provider, "google");
        assert_eq!(fetched.status, SessionStatus::Pending);
        assert!(fetched.access_token.is_none());
    }

    #[tokio::test]
    async fn test_get_unknown_session() {
        let manager = manager();
        assert!(manager.get_session("doesnotexist").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mark_authenticated() {
        let manager = manager();
        let session = manager.create_session("user@example.com", "yahoo").await.unwrap();

        let updated = manager.mark_authenticated(&session.id, tokens()).await.unwrap();
        assert_eq!(updated.status, SessionStatus::Authenticated);
        assert_eq!(updated.access_token.as_deref(), Some("at"));

        let fetched = manager.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, SessionStatus::Authenticated);
        assert_eq!(fetched.refresh_token.as_deref(), Some("rt"));
        assert_eq!(fetched.expires_at, Some(1_700_003_600));
    }

    #[tokio::test]
    async fn test_mark_authenticated_absent_session() {
        let manager = manager();
        let err = manager.mark_authenticated("gone", tokens()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_mark_authenticated_twice_keeps_first_tokens() {
        let manager = manager();
        let session = manager.create_session("user@example.com", "google").await.unwrap();

        manager.mark_authenticated(&session.id, tokens()).await.unwrap();

        let second = TokenSet {
            access_token: "at-2".to_string(),
            refresh_token: None,
            expires_at: 1_700_009_999,
        };
        let result = manager.mark_authenticated(&session.id, second).await.unwrap();

        // The second callback's tokens are discarded, not an error
        assert_eq!(result.access_token.as_deref(), Some("at"));
        assert_eq!(result.expires_at, Some(1_700_003_600));
    }

    #[tokio::test]
    async fn test_session_id_shape() {
        let manager = manager();
        let id = manager.generate_session_id().unwrap();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_session_id_uniqueness() {
        let manager = manager();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            assert!(seen.insert(manager.generate_session_id().unwrap()));
        }
    }
}
