//! Fake identity-provider boundary for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use stundir_web::{SESSION_COOKIE, SessionIdentity, SessionVerifier};

/// Token the default test session is keyed by.
pub const DEFAULT_SESSION_TOKEN: &str = "valid-session-token";
/// Tenant the default test session belongs to.
pub const DEFAULT_TENANT: &str = "alfa";

/// Cookie header value carrying the default test session.
#[must_use]
pub fn default_session_cookie() -> String {
    format!("{SESSION_COOKIE}={DEFAULT_SESSION_TOKEN}")
}

/// Session verifier backed by a fixed token table.
#[derive(Debug, Default)]
pub struct StaticSessionVerifier {
    sessions: HashMap<String, SessionIdentity>,
}

impl StaticSessionVerifier {
    /// Verifier with no sessions; every token is rejected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Verifier pre-loaded with the default test session.
    #[must_use]
    pub fn with_default_session() -> Self {
        Self::new().with_session(DEFAULT_SESSION_TOKEN, "u-1001", DEFAULT_TENANT)
    }

    /// Add a session for the given token.
    #[must_use]
    pub fn with_session(mut self, token: &str, subject: &str, tenant: &str) -> Self {
        self.sessions.insert(
            token.to_string(),
            SessionIdentity {
                subject: subject.to_string(),
                tenant: tenant.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl SessionVerifier for StaticSessionVerifier {
    async fn verify(&self, token: &str) -> Option<SessionIdentity> {
        self.sessions.get(token).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn verifier_accepts_known_tokens_only() {
        let verifier = StaticSessionVerifier::with_default_session();
        let identity = verifier.verify(DEFAULT_SESSION_TOKEN).await.expect("identity");
        assert_eq!(identity.tenant, DEFAULT_TENANT);
        assert!(verifier.verify("other-token").await.is_none());
    }
}
