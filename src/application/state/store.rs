use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use super::{
    AccountState, ChannelsByUserState, ClanMembersMetaState, ClanMembersState, FriendsState,
};

#[derive(Default)]
struct AppStoreInner {
    channels_by_user: RwLock<ChannelsByUserState>,
    clan_members: RwLock<ClanMembersState>,
    clan_members_meta: RwLock<ClanMembersMetaState>,
    friends: RwLock<FriendsState>,
    account: RwLock<AccountState>,
}

/// Shared handle to every entity store.
///
/// Each store has its own lock, so writes to one never wait on another.
/// Read guards must be dropped before awaiting; mutations go through the
/// `update_*` closures, which cannot span an await point.
#[derive(Clone, Default)]
pub struct AppStore {
    inner: Arc<AppStoreInner>,
}

impl AppStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channels_by_user(&self) -> RwLockReadGuard<'_, ChannelsByUserState> {
        self.inner.channels_by_user.read()
    }

    pub fn update_channels_by_user<R>(&self, f: impl FnOnce(&mut ChannelsByUserState) -> R) -> R {
        f(&mut *self.inner.channels_by_user.write())
    }

    pub fn clan_members(&self) -> RwLockReadGuard<'_, ClanMembersState> {
        self.inner.clan_members.read()
    }

    pub fn update_clan_members<R>(&self, f: impl FnOnce(&mut ClanMembersState) -> R) -> R {
        f(&mut *self.inner.clan_members.write())
    }

    pub fn clan_members_meta(&self) -> RwLockReadGuard<'_, ClanMembersMetaState> {
        self.inner.clan_members_meta.read()
    }

    pub fn update_clan_members_meta<R>(
        &self,
        f: impl FnOnce(&mut ClanMembersMetaState) -> R,
    ) -> R {
        f(&mut *self.inner.clan_members_meta.write())
    }

    pub fn friends(&self) -> RwLockReadGuard<'_, FriendsState> {
        self.inner.friends.read()
    }

    pub fn update_friends<R>(&self, f: impl FnOnce(&mut FriendsState) -> R) -> R {
        f(&mut *self.inner.friends.write())
    }

    pub fn account(&self) -> RwLockReadGuard<'_, AccountState> {
        self.inner.account.read()
    }

    pub fn update_account<R>(&self, f: impl FnOnce(&mut AccountState) -> R) -> R {
        f(&mut *self.inner.account.write())
    }
}

impl std::fmt::Debug for AppStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStore")
            .field("channels_by_user", &self.channels_by_user().channels.len())
            .field("clan_members", &self.clan_members().members.len())
            .field("friends", &self.friends().friends.len())
            .finish_non_exhaustive()
    }
}
