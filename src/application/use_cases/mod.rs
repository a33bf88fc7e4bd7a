//! Async operations over session, cache, remote API and stores.

mod fetch_channels_by_user;
mod fetch_clan_members;
mod friends;

pub use fetch_channels_by_user::{FetchChannelsByUserUseCase, FetchChannelsRequest};
pub use fetch_clan_members::FetchClanMembersUseCase;
pub use friends::{FriendsUseCase, GENERIC_FRIEND_FAILURE};

use std::sync::Arc;

use tracing::warn;

use crate::application::cache::FetchCaches;
use crate::application::context::SessionContext;
use crate::application::state::AppStore;
use crate::domain::errors::ApiError;
use crate::domain::ports::{ChatApiPort, SessionPort};

/// Dependencies every use case shares.
#[derive(Clone)]
pub struct UseCaseDeps {
    pub sessions: Arc<dyn SessionPort>,
    pub client: Arc<dyn ChatApiPort>,
    pub caches: Arc<FetchCaches>,
    pub store: AppStore,
}

impl UseCaseDeps {
    /// Resolves the session and pairs it with the client.
    async fn context(&self) -> Result<SessionContext, ApiError> {
        let session = self.sessions.ensure_session().await.map_err(|e| {
            warn!(error = %e, "Session resolution failed");
            e
        })?;
        Ok(SessionContext::new(Arc::clone(&self.client), session))
    }
}

impl std::fmt::Debug for UseCaseDeps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UseCaseDeps")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::domain::ports::mocks::{MockChatApi, MockSessionPort, fixtures};

    /// Deps backed by `api` with a session port that always succeeds.
    pub fn deps(api: Arc<MockChatApi>) -> UseCaseDeps {
        let mut sessions = MockSessionPort::new();
        sessions
            .expect_ensure_session()
            .returning(|| Ok(fixtures::session()));
        UseCaseDeps {
            sessions: Arc::new(sessions),
            client: api,
            caches: Arc::new(FetchCaches::default()),
            store: AppStore::new(),
        }
    }

    /// Deps whose session port always fails.
    pub fn deps_without_session(api: Arc<MockChatApi>) -> UseCaseDeps {
        let mut sessions = MockSessionPort::new();
        sessions
            .expect_ensure_session()
            .returning(|| Err(ApiError::session("token expired")));
        UseCaseDeps {
            sessions: Arc::new(sessions),
            ..deps(api)
        }
    }
}
