//! Presence metadata tracked separately from membership records.

use serde::{Deserialize, Serialize};

use super::{UserId, UserStatus};

/// Presence snapshot for a single user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemberMeta {
    pub id: UserId,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub is_mobile: bool,
    /// Custom status text.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub user_status: Option<UserStatus>,
}

impl MemberMeta {
    #[must_use]
    pub fn new(id: impl Into<UserId>, online: bool) -> Self {
        Self {
            id: id.into(),
            online,
            ..Self::default()
        }
    }
}

/// Presence change pushed by the realtime layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub user_id: UserId,
    pub online: bool,
    pub is_mobile: bool,
}

impl StatusUpdate {
    #[must_use]
    pub fn new(user_id: impl Into<UserId>, online: bool, is_mobile: bool) -> Self {
        Self {
            user_id: user_id.into(),
            online,
            is_mobile,
        }
    }
}
