//! Fetch caches in front of the remote chat API.

mod memoize;

use std::time::Duration;

pub use memoize::{CachePolicy, KeyNormalizer, Memoized};

use crate::application::context::SessionContext;
use crate::application::dto::map_clan_users;
use crate::domain::entities::{ClanId, ClanMember, FriendState};
use crate::domain::ports::{ApiChannelDescList, ApiFriendList};

/// Page size used when listing relationships.
pub const DEFAULT_FRIEND_LIMIT: u32 = 1000;

/// Time-to-live of each cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    pub channels_by_user: Duration,
    pub clan_users: Duration,
    pub friends: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            channels_by_user: Duration::from_secs(60 * 60),
            clan_users: Duration::from_secs(15 * 60),
            friends: Duration::from_secs(60 * 60),
        }
    }
}

/// Arguments of a relationship listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendListQuery {
    /// `None` lists every state.
    pub state: Option<FriendState>,
    pub limit: u32,
    pub cursor: String,
}

impl FriendListQuery {
    /// First page of all relationships.
    #[must_use]
    pub fn all(limit: u32) -> Self {
        Self {
            state: None,
            limit,
            cursor: String::new(),
        }
    }
}

fn channels_key(ctx: &SessionContext, _: &()) -> String {
    ctx.username().to_string()
}

fn clan_users_key(ctx: &SessionContext, clan_id: &ClanId) -> String {
    format!("{clan_id}{}", ctx.username())
}

fn friends_key(ctx: &SessionContext, query: &FriendListQuery) -> String {
    let state = query.state.map_or(-1, |s| i64::from(s.code()));
    format!("{state}{}{}{}", query.limit, query.cursor, ctx.username())
}

/// The process-wide set of fetch caches.
///
/// Built once at startup and shared by the use cases; nothing else touches
/// the underlying maps.
pub struct FetchCaches {
    pub channels_by_user: Memoized<(), ApiChannelDescList>,
    pub clan_users: Memoized<ClanId, Vec<ClanMember>>,
    pub friends: Memoized<FriendListQuery, ApiFriendList>,
}

impl FetchCaches {
    #[must_use]
    pub fn new(ttls: CacheTtls) -> Self {
        Self {
            channels_by_user: Memoized::new(
                "channels_by_user",
                CachePolicy::new(ttls.channels_by_user, channels_key),
                |ctx: SessionContext, ()| async move {
                    ctx.client.list_channels_by_user(&ctx.session).await
                },
            ),
            clan_users: Memoized::new(
                "clan_users",
                CachePolicy::new(ttls.clan_users, clan_users_key),
                |ctx: SessionContext, clan_id: ClanId| async move {
                    let response = ctx.client.list_clan_users(&ctx.session, &clan_id).await?;
                    Ok(map_clan_users(response))
                },
            ),
            friends: Memoized::new(
                "friends",
                CachePolicy::new(ttls.friends, friends_key),
                |ctx: SessionContext, query: FriendListQuery| async move {
                    ctx.client
                        .list_friends(&ctx.session, query.state, query.limit, &query.cursor)
                        .await
                },
            ),
        }
    }

    /// Drops every cached result, e.g. on logout.
    pub fn clear(&self) {
        self.channels_by_user.clear();
        self.clan_users.clear();
        self.friends.clear();
    }
}

impl Default for FetchCaches {
    fn default() -> Self {
        Self::new(CacheTtls::default())
    }
}
