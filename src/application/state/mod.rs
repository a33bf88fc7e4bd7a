//! Normalized entity stores.
//!
//! Each store owns an [`EntityCollection`] and, where a fetch feeds it, a
//! [`LoadState`]. Stores are plain values mutated through their methods;
//! [`AppStore`] puts them behind locks for sharing.

mod account;
mod channels_by_user;
mod clan_members;
mod clan_members_meta;
mod entity_collection;
mod friends;
mod store;

pub use account::AccountState;
pub use channels_by_user::ChannelsByUserState;
pub use clan_members::{ClanMembersState, RoleAssignment};
pub use clan_members_meta::ClanMembersMetaState;
pub use entity_collection::{Entity, EntityCollection};
pub use friends::{FriendsState, SentStatus, DEFAULT_TAB_STATUS};
pub use store::AppStore;

use crate::domain::LoadingStatus;

/// Loading lifecycle of a store fed by an async operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadState {
    pub loading_status: LoadingStatus,
    pub error: Option<String>,
}

impl LoadState {
    pub fn start(&mut self) {
        self.loading_status = LoadingStatus::Loading;
    }

    /// Marks the fetch as loaded and clears any previous error.
    pub fn succeed(&mut self) {
        self.loading_status = LoadingStatus::Loaded;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading_status = LoadingStatus::Error;
        self.error = Some(message.into());
    }
}

/// Current wall-clock time in whole seconds since the Unix epoch.
#[must_use]
pub fn now_seconds() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_state_lifecycle() {
        let mut load = LoadState::default();
        assert_eq!(load.loading_status, LoadingStatus::NotLoaded);

        load.start();
        assert!(load.loading_status.is_loading());

        load.fail("boom");
        assert_eq!(load.loading_status, LoadingStatus::Error);
        assert_eq!(load.error.as_deref(), Some("boom"));

        load.start();
        load.succeed();
        assert_eq!(load.loading_status, LoadingStatus::Loaded);
        assert!(load.error.is_none());
    }
}
