//! Relationships of the local user.

use std::sync::Arc;

use super::{Entity, EntityCollection, LoadState};
use crate::domain::entities::{Friend, FriendKey, FriendState, StatusUpdate, UserId, UserStatus};

impl Entity for Friend {
    type Key = FriendKey;

    fn key(&self) -> FriendKey {
        self.key.clone()
    }
}

/// Tab shown when nothing else was picked.
pub const DEFAULT_TAB_STATUS: &str = "all";

/// Outcome of the last friend request sent from this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentStatus {
    pub is_success: bool,
}

#[derive(Debug, Clone)]
pub struct FriendsState {
    pub friends: EntityCollection<Friend>,
    pub load: LoadState,
    pub current_tab_status: String,
    pub sent_status: Option<SentStatus>,
}

impl Default for FriendsState {
    fn default() -> Self {
        Self {
            friends: EntityCollection::new(),
            load: LoadState::default(),
            current_tab_status: DEFAULT_TAB_STATUS.to_string(),
            sent_status: None,
        }
    }
}

impl FriendsState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_all(&mut self, friends: Vec<Friend>) {
        self.friends.set_all(friends);
    }

    /// First record whose counterpart is `user_id`.
    #[must_use]
    pub fn find_by_user(&self, user_id: &UserId) -> Option<Arc<Friend>> {
        self.friends.find(|f| f.user_id() == user_id)
    }

    /// Removes the first record whose counterpart is `user_id`.
    pub fn remove(&mut self, user_id: &UserId) -> bool {
        let Some(friend) = self.find_by_user(user_id) else {
            return false;
        };
        self.friends.remove_one(&friend.key).is_some()
    }

    pub fn change_current_status_tab(&mut self, tab: impl Into<String>) {
        self.current_tab_status = tab.into();
    }

    pub fn set_sent_status(&mut self, status: Option<SentStatus>) {
        self.sent_status = status;
    }

    /// Applies presence pushes to the matching counterparts.
    pub fn set_many_status_user(&mut self, updates: &[StatusUpdate]) -> usize {
        updates
            .iter()
            .filter(|update| {
                self.find_by_user(&update.user_id).is_some_and(|friend| {
                    self.friends.update_one(&friend.key, |f| {
                        f.user.online = update.online;
                        f.user.is_mobile = update.is_mobile;
                    })
                })
            })
            .count()
    }

    pub fn update_user_status(&mut self, user_id: &UserId, user_status: UserStatus) -> bool {
        let Some(friend) = self.find_by_user(user_id) else {
            return false;
        };
        self.friends.update_one(&friend.key, |f| {
            f.user.metadata.user_status = Some(user_status);
        })
    }

    /// Changes the state of the first record involving `user_id` on either
    /// side. The record keeps its key even if `source_id` moves.
    pub fn update_friend_state(
        &mut self,
        user_id: &UserId,
        state: FriendState,
        source_id: Option<UserId>,
    ) -> bool {
        let Some(friend) = self.friends.find(|f| f.involves(user_id)) else {
            return false;
        };
        self.friends.update_one(&friend.key, |f| {
            f.state = state;
            if let Some(source_id) = source_id {
                f.source_id = source_id;
            }
        })
    }
}
