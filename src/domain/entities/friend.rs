//! Friend relationship entity.

use serde::{Deserialize, Serialize};

use super::{UserId, UserProfile};

/// Relationship state between the local user and a counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum FriendState {
    /// Accepted friend.
    Friend = 0,
    /// Request sent, waiting for the other side.
    OutgoingPending = 1,
    /// Request received, waiting for us.
    IncomingPending = 2,
    Blocked = 3,
    /// Code this client does not recognize.
    Unknown = -1,
}

impl From<i64> for FriendState {
    fn from(value: i64) -> Self {
        match value {
            0 => Self::Friend,
            1 => Self::OutgoingPending,
            2 => Self::IncomingPending,
            3 => Self::Blocked,
            _ => Self::Unknown,
        }
    }
}

impl FriendState {
    #[must_use]
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }

    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::OutgoingPending | Self::IncomingPending)
    }

    /// Wire code, as used in list filters.
    #[must_use]
    pub const fn code(self) -> i8 {
        self as i8
    }
}

/// Composite key `"{user_id}_{source_id}"`.
///
/// The same pair of users can have one record per direction while a request
/// or a block is pending, so the counterpart id alone is not unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FriendKey(String);

impl FriendKey {
    #[must_use]
    pub fn new(user_id: &UserId, source_id: &UserId) -> Self {
        Self(format!("{user_id}_{source_id}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FriendKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single relationship record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub key: FriendKey,
    /// Counterpart user.
    pub user: UserProfile,
    /// User who initiated the relationship.
    pub source_id: UserId,
    pub state: FriendState,
}

impl Friend {
    #[must_use]
    pub fn new(user: UserProfile, source_id: impl Into<UserId>, state: FriendState) -> Self {
        let source_id = source_id.into();
        Self {
            key: FriendKey::new(&user.id, &source_id),
            user,
            source_id,
            state,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }

    /// True if `user_id` is either side of the relationship.
    #[must_use]
    pub fn involves(&self, user_id: &UserId) -> bool {
        &self.user.id == user_id || &self.source_id == user_id
    }

    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        self.state.is_blocked()
    }
}
