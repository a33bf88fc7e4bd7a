use std::sync::Arc;

use tracing::{debug, info, warn};

use super::UseCaseDeps;
use crate::application::cache::{DEFAULT_FRIEND_LIMIT, FriendListQuery};
use crate::application::dto::map_friends;
use crate::application::state::SentStatus;
use crate::domain::NotificationLevel;
use crate::domain::entities::Friend;
use crate::domain::errors::ApiError;
use crate::domain::ports::{FriendTargets, NotificationPort};

/// Shown when a relationship change fails without a server message.
pub const GENERIC_FRIEND_FAILURE: &str = "No valid ID or username was provided.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Add,
    Delete,
    Block,
}

impl Mutation {
    const fn title(self) -> &'static str {
        match self {
            Self::Add => "Friend request failed",
            Self::Delete => "Could not remove friend",
            Self::Block => "Could not block user",
        }
    }
}

impl std::fmt::Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Delete => write!(f, "delete"),
            Self::Block => write!(f, "block"),
        }
    }
}

/// Friend list loading and relationship changes.
///
/// Successful changes force a refetch of the list so the store reflects the
/// server rather than a local guess. Failed changes raise a notification.
#[derive(Clone)]
pub struct FriendsUseCase {
    deps: UseCaseDeps,
    notifier: Arc<dyn NotificationPort>,
}

impl FriendsUseCase {
    #[must_use]
    pub fn new(deps: UseCaseDeps, notifier: Arc<dyn NotificationPort>) -> Self {
        Self { deps, notifier }
    }

    /// Replaces the friend store with the first page of relationships.
    ///
    /// # Errors
    /// Returns the session or remote error; stored friends are left alone.
    pub async fn fetch_list_friends(&self, no_cache: bool) -> Result<usize, ApiError> {
        let store = &self.deps.store;
        store.update_friends(|s| s.load.start());

        match self.fetch(no_cache).await {
            Ok(friends) => {
                let count = friends.len();
                store.update_friends(|s| {
                    s.set_all(friends);
                    s.load.succeed();
                });
                info!(count, "Loaded friends");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load friends");
                store.update_friends(|s| s.load.fail(e.to_string()));
                Err(e)
            }
        }
    }

    /// Sends friend requests and records whether sending worked.
    ///
    /// # Errors
    /// Returns the rejection; the user has already been notified.
    pub async fn add_friends(&self, targets: &FriendTargets) -> Result<(), ApiError> {
        match self.mutate(Mutation::Add, targets).await {
            Ok(()) => {
                self.deps
                    .store
                    .update_friends(|s| s.set_sent_status(Some(SentStatus { is_success: true })));
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                let message = self.report_failure(Mutation::Add, &e);
                self.deps.store.update_friends(|s| {
                    s.set_sent_status(Some(SentStatus { is_success: false }));
                    s.load.fail(message);
                });
                Err(e)
            }
        }
    }

    /// Removes friends or cancels pending requests.
    ///
    /// # Errors
    /// Returns the rejection; the user has already been notified.
    pub async fn delete_friends(&self, targets: &FriendTargets) -> Result<(), ApiError> {
        self.mutate_and_refresh(Mutation::Delete, targets).await
    }

    /// Blocks users.
    ///
    /// # Errors
    /// Returns the rejection; the user has already been notified.
    pub async fn block_friends(&self, targets: &FriendTargets) -> Result<(), ApiError> {
        self.mutate_and_refresh(Mutation::Block, targets).await
    }

    async fn mutate_and_refresh(&self, kind: Mutation, targets: &FriendTargets) -> Result<(), ApiError> {
        match self.mutate(kind, targets).await {
            Ok(()) => {
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                self.report_failure(kind, &e);
                Err(e)
            }
        }
    }

    async fn mutate(&self, kind: Mutation, targets: &FriendTargets) -> Result<(), ApiError> {
        if targets.is_empty() {
            return Err(ApiError::rejected(""));
        }
        let ctx = self.deps.context().await?;
        debug!(
            mutation = %kind,
            ids = targets.ids.len(),
            usernames = targets.usernames.len(),
            "Sending relationship change"
        );

        let accepted = match kind {
            Mutation::Add => ctx.client.add_friends(&ctx.session, targets).await?,
            Mutation::Delete => ctx.client.delete_friends(&ctx.session, targets).await?,
            Mutation::Block => ctx.client.block_friends(&ctx.session, targets).await?,
        };
        if !accepted {
            return Err(ApiError::rejected(""));
        }
        info!(mutation = %kind, "Relationship change accepted");
        Ok(())
    }

    /// Notifies the user and returns the message shown.
    fn report_failure(&self, kind: Mutation, error: &ApiError) -> String {
        warn!(mutation = %kind, error = %error, "Relationship change failed");
        let message = error
            .server_message()
            .unwrap_or(GENERIC_FRIEND_FAILURE)
            .to_string();
        self.notifier
            .send(NotificationLevel::Error, kind.title(), &message);
        message
    }

    /// Forced refetch after a change. Its failure is recorded in the store
    /// by `fetch_list_friends` and does not fail the change itself.
    async fn refresh(&self) {
        if let Err(e) = self.fetch_list_friends(true).await {
            warn!(error = %e, "Friend list refresh failed");
        }
    }

    async fn fetch(&self, no_cache: bool) -> Result<Vec<Friend>, ApiError> {
        let ctx = self.deps.context().await?;
        let query = FriendListQuery::all(DEFAULT_FRIEND_LIMIT);
        let cache = &self.deps.caches.friends;
        if no_cache && cache.invalidate(&ctx, &query) {
            debug!("Evicted cached friend list");
        }
        let response = cache.call(&ctx, query).await?;
        Ok(map_friends(response))
    }
}

impl std::fmt::Debug for FriendsUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FriendsUseCase")
            .field("deps", &self.deps)
            .finish_non_exhaustive()
    }
}
