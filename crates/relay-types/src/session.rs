//! Session data model
//!
//! A session is the single unit of persisted state: one JSON record per
//! session id in the expiring key-value store. The id doubles as the OAuth
//! `state` parameter, so it must come from a cryptographically secure source.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Where a session is in the authorization-code flow.
///
/// There is no failed state: a failed exchange leaves the session `Pending`
/// until its TTL runs out, and the client re-initiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Authenticated,
}

/// Tokens obtained from a provider's token endpoint, with the relative
/// `expires_in` already converted to an absolute unix-second expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: i64,
}

/// One relay session, serialized as-is into the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub email: String,
    pub provider: String,
    pub status: SessionStatus,
    /// Unix seconds at creation.
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&SessionStatus::Authenticated).unwrap(),
            "\"authenticated\""
        );
    }

    #[test]
    fn test_pending_session_omits_token_fields() {
        let session = Session {
            id: "abc".to_string(),
            email: "user@example.com".to_string(),
            provider: "google".to_string(),
            status: SessionStatus::Pending,
            created_at: 1_700_000_000,
            access_token: None,
            refresh_token: None,
            expires_at: None,
        };

        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("access_token"));
        assert!(!json.contains("refresh_token"));
        assert!(!json.contains("expires_at"));
    }

    #[test]
    fn test_session_round_trips_through_store_format() {
        let session = Session {
            id: "abc".to_string(),
            email: "user@example.com".to_string(),
            provider: "yahoo".to_string(),
            status: SessionStatus::Authenticated,
            created_at: 1_700_000_000,
            access_token: Some("at".to_string()),
            refresh_token: Some("rt".to_string()),
            expires_at: Some(1_700_003_600),
        };

        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back.status, SessionStatus::Authenticated);
        assert_eq!(back.access_token.as_deref(), Some("at"));
        assert_eq!(back.expires_at, Some(1_700_003_600));
    }
}
