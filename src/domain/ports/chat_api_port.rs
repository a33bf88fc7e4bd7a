//! Remote chat API port.

use async_trait::async_trait;

use super::payloads::{ApiChannelDescList, ApiClanUserList, ApiFriendList, FriendTargets};
use crate::domain::entities::{ClanId, FriendState, Session};
use crate::domain::errors::ApiError;

/// Port for the authenticated remote calls the state layer depends on.
#[async_trait]
pub trait ChatApiPort: Send + Sync {
    /// Lists every channel the session user belongs to.
    async fn list_channels_by_user(&self, session: &Session)
    -> Result<ApiChannelDescList, ApiError>;

    /// Lists the members of a clan.
    async fn list_clan_users(
        &self,
        session: &Session,
        clan_id: &ClanId,
    ) -> Result<ApiClanUserList, ApiError>;

    /// Lists relationships, optionally filtered by state.
    async fn list_friends(
        &self,
        session: &Session,
        state: Option<FriendState>,
        limit: u32,
        cursor: &str,
    ) -> Result<ApiFriendList, ApiError>;

    /// Sends or accepts friend requests. `Ok(false)` means the server refused.
    async fn add_friends(&self, session: &Session, targets: &FriendTargets)
    -> Result<bool, ApiError>;

    /// Removes friends or cancels requests.
    async fn delete_friends(
        &self,
        session: &Session,
        targets: &FriendTargets,
    ) -> Result<bool, ApiError>;

    /// Blocks users.
    async fn block_friends(
        &self,
        session: &Session,
        targets: &FriendTargets,
    ) -> Result<bool, ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::domain::ports::payloads::{ApiClanUser, ApiFriend, ApiUser};

    /// Counters for each remote call.
    #[derive(Debug, Default)]
    pub struct CallCounts {
        pub list_channels: AtomicUsize,
        pub list_clan_users: AtomicUsize,
        pub list_friends: AtomicUsize,
        pub add_friends: AtomicUsize,
        pub delete_friends: AtomicUsize,
        pub block_friends: AtomicUsize,
    }

    impl CallCounts {
        pub fn get(counter: &AtomicUsize) -> usize {
            counter.load(Ordering::SeqCst)
        }
    }

    /// Scriptable in-memory chat API.
    #[derive(Default)]
    pub struct MockChatApi {
        pub calls: CallCounts,
        channels: Mutex<ApiChannelDescList>,
        clan_users: Mutex<ApiClanUserList>,
        friends: Mutex<ApiFriendList>,
        failure: Mutex<Option<ApiError>>,
        mutation_result: Mutex<Option<Result<bool, ApiError>>>,
        delay: Mutex<Option<Duration>>,
    }

    impl MockChatApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_channels(self, channels: ApiChannelDescList) -> Self {
            *self.channels.lock() = channels;
            self
        }

        pub fn with_clan_users(self, users: Vec<ApiClanUser>) -> Self {
            *self.clan_users.lock() = ApiClanUserList {
                clan_users: Some(users),
                cursor: None,
            };
            self
        }

        pub fn with_friends(self, friends: Vec<ApiFriend>) -> Self {
            self.set_friends(friends);
            self
        }

        pub fn with_delay(self, delay: Duration) -> Self {
            *self.delay.lock() = Some(delay);
            self
        }

        pub fn set_channels(&self, channels: ApiChannelDescList) {
            *self.channels.lock() = channels;
        }

        pub fn set_friends(&self, friends: Vec<ApiFriend>) {
            self.set_friend_list(ApiFriendList {
                friends: Some(friends),
                cursor: None,
            });
        }

        pub fn set_friend_list(&self, list: ApiFriendList) {
            *self.friends.lock() = list;
        }

        /// Makes every list call fail with `error` until cleared.
        pub fn fail_with(&self, error: Option<ApiError>) {
            *self.failure.lock() = error;
        }

        /// Overrides the outcome of add/delete/block calls.
        pub fn mutations_return(&self, result: Result<bool, ApiError>) {
            *self.mutation_result.lock() = Some(result);
        }

        async fn pause(&self) {
            let delay = *self.delay.lock();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
        }

        fn check_failure(&self) -> Result<(), ApiError> {
            match self.failure.lock().clone() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }

        fn mutation_outcome(&self) -> Result<bool, ApiError> {
            self.mutation_result.lock().clone().unwrap_or(Ok(true))
        }
    }

    /// Builds a wire user.
    pub fn api_user(id: &str, username: &str) -> ApiUser {
        ApiUser {
            id: Some(id.to_string()),
            username: Some(username.to_string()),
            ..ApiUser::default()
        }
    }

    /// Builds a wire relationship.
    pub fn api_friend(user_id: &str, source_id: &str, state: i64) -> ApiFriend {
        ApiFriend {
            user: Some(api_user(user_id, user_id)),
            state: Some(state),
            source_id: Some(source_id.to_string()),
        }
    }

    #[async_trait]
    impl ChatApiPort for MockChatApi {
        async fn list_channels_by_user(
            &self,
            _session: &Session,
        ) -> Result<ApiChannelDescList, ApiError> {
            self.calls.list_channels.fetch_add(1, Ordering::SeqCst);
            self.pause().await;
            self.check_failure()?;
            Ok(self.channels.lock().clone())
        }

        async fn list_clan_users(
            &self,
            _session: &Session,
            _clan_id: &ClanId,
        ) -> Result<ApiClanUserList, ApiError> {
            self.calls.list_clan_users.fetch_add(1, Ordering::SeqCst);
            self.pause().await;
            self.check_failure()?;
            Ok(self.clan_users.lock().clone())
        }

        async fn list_friends(
            &self,
            _session: &Session,
            _state: Option<FriendState>,
            _limit: u32,
            _cursor: &str,
        ) -> Result<ApiFriendList, ApiError> {
            self.calls.list_friends.fetch_add(1, Ordering::SeqCst);
            self.pause().await;
            self.check_failure()?;
            Ok(self.friends.lock().clone())
        }

        async fn add_friends(
            &self,
            _session: &Session,
            _targets: &FriendTargets,
        ) -> Result<bool, ApiError> {
            self.calls.add_friends.fetch_add(1, Ordering::SeqCst);
            self.mutation_outcome()
        }

        async fn delete_friends(
            &self,
            _session: &Session,
            _targets: &FriendTargets,
        ) -> Result<bool, ApiError> {
            self.calls.delete_friends.fetch_add(1, Ordering::SeqCst);
            self.mutation_outcome()
        }

        async fn block_friends(
            &self,
            _session: &Session,
            _targets: &FriendTargets,
        ) -> Result<bool, ApiError> {
            self.calls.block_friends.fetch_add(1, Ordering::SeqCst);
            self.mutation_outcome()
        }
    }
}
