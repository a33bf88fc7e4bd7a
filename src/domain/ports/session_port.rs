//! Session resolution port.

use async_trait::async_trait;

use crate::domain::entities::Session;
use crate::domain::errors::ApiError;

/// Supplies an authenticated session, refreshing it if needed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionPort: Send + Sync {
    /// Returns a usable session.
    ///
    /// # Errors
    /// Returns `ApiError::SessionUnavailable` when no session can be produced.
    async fn ensure_session(&self) -> Result<Session, ApiError>;
}

#[cfg(test)]
pub mod fixtures {
    use crate::domain::entities::{Session, SessionToken};

    /// Session owned by `alice` (user id `u-alice`).
    pub fn session() -> Session {
        session_for("u-alice", "alice")
    }

    pub fn session_for(user_id: &str, username: &str) -> Session {
        Session::new(
            SessionToken::new("test-token-value-0123456789").unwrap(),
            user_id,
            username,
        )
    }
}
