use serde::{Deserialize, Serialize};

use super::{ClanId, RoleSet, UserId, UserProfile};

/// A user's membership in a clan, keyed by user id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClanMember {
    pub id: UserId,
    pub user: UserProfile,
    #[serde(default)]
    pub clan_id: Option<ClanId>,
    /// Per-clan nickname override.
    #[serde(default)]
    pub clan_nick: Option<String>,
    /// Per-clan avatar override.
    #[serde(default)]
    pub clan_avatar: Option<String>,
    #[serde(default)]
    pub role_id: RoleSet,
}

impl ClanMember {
    #[must_use]
    pub fn new(user: UserProfile) -> Self {
        Self {
            id: user.id.clone(),
            user,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn in_clan(mut self, clan_id: impl Into<ClanId>) -> Self {
        self.clan_id = Some(clan_id.into());
        self
    }

    #[must_use]
    pub fn with_clan_nick(mut self, nick: impl Into<String>) -> Self {
        self.clan_nick = Some(nick.into());
        self
    }

    /// Best available name: clan nickname, then display name, then username.
    #[must_use]
    pub fn best_name(&self) -> &str {
        self.clan_nick
            .as_deref()
            .filter(|nick| !nick.is_empty())
            .unwrap_or_else(|| self.user.display_name())
    }
}
