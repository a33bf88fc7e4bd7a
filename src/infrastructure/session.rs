//! Session provider backed by configuration.

use async_trait::async_trait;
use tracing::debug;

use super::config::SessionConfig;
use crate::domain::entities::{Session, SessionToken};
use crate::domain::errors::ApiError;
use crate::domain::ports::SessionPort;

/// Serves one fixed session built from configuration and environment.
///
/// There is no refresh: an expired token surfaces as a session error from the
/// API and the user has to supply a new one.
#[derive(Debug, Clone)]
pub struct StaticSessionProvider {
    session: Result<Session, String>,
}

impl StaticSessionProvider {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            session: Ok(session),
        }
    }

    /// Builds the session from configuration. A missing token or user id
    /// is reported on every `ensure_session` call.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        let session = match config.token.as_deref().and_then(SessionToken::new) {
            None => Err("no session token configured (set CLANCHAT_TOKEN)".to_string()),
            Some(_) if config.user_id.trim().is_empty() => {
                Err("no session user id configured (set CLANCHAT_USER_ID)".to_string())
            }
            Some(token) => Ok(Session::new(
                token,
                config.user_id.trim(),
                config.username.trim(),
            )),
        };
        Self { session }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.session.is_ok()
    }
}

#[async_trait]
impl SessionPort for StaticSessionProvider {
    async fn ensure_session(&self) -> Result<Session, ApiError> {
        match &self.session {
            Ok(session) => {
                debug!(user_id = %session.user_id, "Using configured session");
                Ok(session.clone())
            }
            Err(message) => Err(ApiError::session(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn config(token: Option<&str>, user_id: &str) -> SessionConfig {
        SessionConfig {
            token: token.map(str::to_string),
            user_id: user_id.to_string(),
            username: " alice ".to_string(),
        }
    }

    #[tokio::test]
    async fn test_configured_session() {
        let provider = StaticSessionProvider::from_config(&config(Some("tok-123"), "u1"));
        assert!(provider.is_configured());

        let session = assert_ok!(provider.ensure_session().await);
        assert_eq!(session.user_id.to_string(), "u1");
        assert_eq!(session.username, "alice");
        assert_eq!(session.token.as_str(), "tok-123");
    }

    #[tokio::test]
    async fn test_missing_token() {
        let provider = StaticSessionProvider::from_config(&config(Some("   "), "u1"));
        let error = provider.ensure_session().await.unwrap_err();
        assert!(matches!(error, ApiError::SessionUnavailable { .. }));
        assert!(error.to_string().contains("CLANCHAT_TOKEN"));
    }

    #[tokio::test]
    async fn test_missing_user_id() {
        let provider = StaticSessionProvider::from_config(&config(Some("tok"), ""));
        assert!(!provider.is_configured());
        assert_err!(provider.ensure_session().await);
    }
}
