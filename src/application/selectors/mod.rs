//! Derived views over the entity stores.
//!
//! The per-domain modules hold pure functions of store state. [`Selectors`]
//! wraps the costlier ones in revision-keyed memos so repeated reads of an
//! unchanged store hand back the same `Arc`.

mod channels;
mod clan_members;
mod friends;

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

pub use channels::{
    ChannelSummary, select_all_channels_by_user, select_all_info_channels,
    select_gmeet_voice_channels,
};
pub use clan_members::{
    PresencePartition, select_all_user_clans, select_clan_member_with_status_ids,
    select_member_by_google_id, select_member_by_user_id, select_member_by_username,
    select_members_by_user_ids, select_members_count,
};
pub use friends::{
    select_all_friends, select_blocked_users, select_blocked_users_for_message,
    select_current_tab_status, select_friend_by_id, select_friend_status, select_sent_status,
};

use crate::application::state::AppStore;
use crate::domain::entities::{ChannelMembership, ClanMember, Friend, UserId};

/// Default number of parameter values a [`KeyedMemo`] remembers.
pub const DEFAULT_KEYED_CAPACITY: usize = 64;

/// Remembers the last computed value and the inputs it came from.
pub struct Memo<K, V> {
    last: Mutex<Option<(K, Arc<V>)>>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            last: Mutex::new(None),
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value if `key` matches the last call, otherwise
    /// computes and caches a new one.
    pub fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> Arc<V> {
        let mut last = self.last.lock();
        if let Some((cached_key, value)) = last.as_ref()
            && *cached_key == key
        {
            return Arc::clone(value);
        }
        let value = Arc::new(compute());
        *last = Some((key, Arc::clone(&value)));
        value
    }
}

/// Memo for parameterised selectors: one entry per recent key, least
/// recently used evicted first.
pub struct KeyedMemo<K: Hash + Eq, V> {
    entries: Mutex<LruCache<K, Arc<V>>>,
}

impl<K: Hash + Eq, V> KeyedMemo<K, V> {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(cap)),
        }
    }

    pub fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> Arc<V> {
        let mut entries = self.entries.lock();
        if let Some(value) = entries.get(&key) {
            return Arc::clone(value);
        }
        let value = Arc::new(compute());
        entries.put(key, Arc::clone(&value));
        value
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Memoized selectors bound to a store.
///
/// Keys are store revisions, so a memo is invalidated by any effective
/// mutation of the stores it reads and by nothing else.
pub struct Selectors {
    store: AppStore,
    presence: Memo<(u64, u64, u64), PresencePartition>,
    channel_summaries: Memo<u64, Vec<ChannelSummary>>,
    gmeet_voice: Memo<u64, Vec<Arc<ChannelMembership>>>,
    blocked_users: Memo<(u64, u64), Vec<Arc<Friend>>>,
    blocked_for_message: Memo<u64, Vec<Arc<Friend>>>,
    member_by_username: KeyedMemo<(u64, String), Option<Arc<ClanMember>>>,
    friend_by_id: KeyedMemo<(u64, UserId), Option<Arc<Friend>>>,
}

impl Selectors {
    #[must_use]
    pub fn new(store: AppStore) -> Self {
        Self {
            store,
            presence: Memo::new(),
            channel_summaries: Memo::new(),
            gmeet_voice: Memo::new(),
            blocked_users: Memo::new(),
            blocked_for_message: Memo::new(),
            member_by_username: KeyedMemo::new(DEFAULT_KEYED_CAPACITY),
            friend_by_id: KeyedMemo::new(DEFAULT_KEYED_CAPACITY),
        }
    }

    #[must_use]
    pub fn store(&self) -> &AppStore {
        &self.store
    }

    pub fn clan_member_with_status_ids(&self) -> Arc<PresencePartition> {
        let members = self.store.clan_members();
        let metas = self.store.clan_members_meta();
        let account = self.store.account();
        let key = (
            members.members.revision(),
            metas.metas.revision(),
            account.revision(),
        );
        self.presence.get_or_compute(key, || {
            select_clan_member_with_status_ids(&members, &metas, &account)
        })
    }

    pub fn all_info_channels(&self) -> Arc<Vec<ChannelSummary>> {
        let channels = self.store.channels_by_user();
        self.channel_summaries
            .get_or_compute(channels.channels.revision(), || {
                select_all_info_channels(&channels)
            })
    }

    pub fn gmeet_voice_channels(&self) -> Arc<Vec<Arc<ChannelMembership>>> {
        let channels = self.store.channels_by_user();
        self.gmeet_voice
            .get_or_compute(channels.channels.revision(), || {
                select_gmeet_voice_channels(&channels)
            })
    }

    pub fn blocked_users(&self) -> Arc<Vec<Arc<Friend>>> {
        let friends = self.store.friends();
        let account = self.store.account();
        let key = (friends.friends.revision(), account.revision());
        self.blocked_users.get_or_compute(key, || {
            select_blocked_users(&friends, account.user_id())
        })
    }

    pub fn blocked_users_for_message(&self) -> Arc<Vec<Arc<Friend>>> {
        let friends = self.store.friends();
        self.blocked_for_message
            .get_or_compute(friends.friends.revision(), || {
                select_blocked_users_for_message(&friends)
            })
    }

    pub fn member_by_username(&self, username: &str) -> Option<Arc<ClanMember>> {
        let members = self.store.clan_members();
        let key = (members.members.revision(), username.to_string());
        let found = self
            .member_by_username
            .get_or_compute(key, || select_member_by_username(&members, username));
        Option::clone(&found)
    }

    pub fn friend_by_id(&self, user_id: &UserId) -> Option<Arc<Friend>> {
        let friends = self.store.friends();
        let key = (friends.friends.revision(), user_id.clone());
        let found = self
            .friend_by_id
            .get_or_compute(key, || select_friend_by_id(&friends, user_id));
        Option::clone(&found)
    }
}

impl std::fmt::Debug for Selectors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selectors").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FriendState, MemberMeta, UserProfile};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_memo_recomputes_only_on_key_change() {
        let memo: Memo<u64, usize> = Memo::new();
        let calls = AtomicUsize::new(0);
        let compute = || calls.fetch_add(1, Ordering::SeqCst);

        let a = memo.get_or_compute(1, compute);
        let b = memo.get_or_compute(1, compute);
        assert!(Arc::ptr_eq(&a, &b));
        memo.get_or_compute(2, compute);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_keyed_memo_evicts_least_recent() {
        let memo: KeyedMemo<&str, usize> = KeyedMemo::new(2);
        memo.get_or_compute("a", || 1);
        memo.get_or_compute("b", || 2);
        memo.get_or_compute("c", || 3);
        assert_eq!(memo.len(), 2);
        assert_eq!(*memo.get_or_compute("a", || 10), 10);
        assert_eq!(*memo.get_or_compute("c", || 30), 3);
    }

    #[test]
    fn test_presence_memo_follows_store_revisions() {
        let store = AppStore::new();
        let selectors = Selectors::new(store.clone());
        store.update_clan_members(|s| {
            s.set_all(vec![ClanMember::new(UserProfile::new("A", "bob"))]);
        });

        let first = selectors.clan_member_with_status_ids();
        let again = selectors.clan_member_with_status_ids();
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(first.offline, vec![UserId::from("A")]);

        store.update_clan_members_meta(|s| s.update_bulk_metadata(vec![MemberMeta::new("A", true)]));
        let after = selectors.clan_member_with_status_ids();
        assert!(!Arc::ptr_eq(&first, &after));
        assert_eq!(after.online, vec![UserId::from("A")]);
    }

    #[test]
    fn test_noop_mutation_keeps_memo() {
        let store = AppStore::new();
        let selectors = Selectors::new(store.clone());
        store.update_friends(|s| {
            s.set_all(vec![Friend::new(UserProfile::new("Y", "y"), "X", FriendState::Blocked)]);
        });
        store.update_account(|a| a.set_account(UserProfile::new("X", "x")));

        let first = selectors.blocked_users();
        assert_eq!(first.len(), 1);
        store.update_friends(|s| s.update_friend_state(&UserId::from("Y"), FriendState::Blocked, None));
        assert!(Arc::ptr_eq(&first, &selectors.blocked_users()));

        assert!(selectors.friend_by_id(&UserId::from("X")).is_some());
        assert!(selectors.member_by_username("nobody").is_none());
        assert_eq!(selectors.blocked_users_for_message().len(), 1);
    }
}
