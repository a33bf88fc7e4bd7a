//! Channel membership entity.

use serde::{Deserialize, Serialize};

/// Unique identifier for a channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub String);

impl ChannelId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ChannelId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Unique identifier for a clan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClanId(pub String);

impl ClanId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClanId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ClanId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Channel type as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ChannelType {
    /// Unknown or missing type.
    #[default]
    Unknown = 0,
    /// Clan text channel.
    Channel = 1,
    /// Group direct message.
    Group = 2,
    /// One-to-one direct message.
    Dm = 3,
    /// Voice room backed by an external meeting.
    GmeetVoice = 4,
    /// Forum channel.
    Forum = 5,
    /// Streaming channel.
    Streaming = 6,
    /// Thread.
    Thread = 7,
    /// Embedded application channel.
    App = 8,
    /// Announcement channel.
    Announcement = 9,
    /// Native voice channel.
    Voice = 10,
}

impl From<i64> for ChannelType {
    fn from(value: i64) -> Self {
        match value {
            1 => Self::Channel,
            2 => Self::Group,
            3 => Self::Dm,
            4 => Self::GmeetVoice,
            5 => Self::Forum,
            6 => Self::Streaming,
            7 => Self::Thread,
            8 => Self::App,
            9 => Self::Announcement,
            10 => Self::Voice,
            _ => Self::Unknown,
        }
    }
}

impl ChannelType {
    /// Returns true for direct and group messages, which have no clan.
    #[must_use]
    pub const fn is_direct(self) -> bool {
        matches!(self, Self::Dm | Self::Group)
    }
}

/// Position of a message in a channel: its id and when it happened.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MessageMarker {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub timestamp_seconds: Option<i64>,
}

impl MessageMarker {
    #[must_use]
    pub fn new(id: Option<String>, timestamp_seconds: Option<i64>) -> Self {
        Self {
            id,
            timestamp_seconds,
        }
    }

    /// Marker carrying only a timestamp.
    #[must_use]
    pub const fn at(timestamp_seconds: i64) -> Self {
        Self {
            id: None,
            timestamp_seconds: Some(timestamp_seconds),
        }
    }
}

/// A channel the local user belongs to, with its unread bookkeeping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChannelMembership {
    /// Entity key; equals `channel_id`.
    pub id: ChannelId,
    pub channel_id: ChannelId,
    #[serde(default)]
    pub channel_label: String,
    #[serde(default)]
    pub channel_private: bool,
    #[serde(default)]
    pub clan_id: Option<ClanId>,
    #[serde(default)]
    pub clan_name: Option<String>,
    #[serde(default)]
    pub channel_type: ChannelType,
    #[serde(default)]
    pub parent_id: Option<ChannelId>,
    #[serde(default)]
    pub meeting_code: Option<String>,
    /// 1 while a meeting is attached to the channel, 0 otherwise.
    #[serde(default)]
    pub status: u8,
    #[serde(default)]
    pub count_mess_unread: Option<u32>,
    #[serde(default)]
    pub last_sent_message: Option<MessageMarker>,
    #[serde(default)]
    pub last_seen_message: Option<MessageMarker>,
}

impl ChannelMembership {
    #[must_use]
    pub fn new(channel_id: impl Into<ChannelId>, channel_label: impl Into<String>) -> Self {
        let channel_id = channel_id.into();
        Self {
            id: channel_id.clone(),
            channel_id,
            channel_label: channel_label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn in_clan(mut self, clan_id: impl Into<ClanId>) -> Self {
        self.clan_id = Some(clan_id.into());
        self
    }

    #[must_use]
    pub const fn with_type(mut self, channel_type: ChannelType) -> Self {
        self.channel_type = channel_type;
        self
    }

    #[must_use]
    pub const fn with_unread(mut self, count: u32) -> Self {
        self.count_mess_unread = Some(count);
        self
    }

    #[must_use]
    pub fn with_last_sent(mut self, marker: MessageMarker) -> Self {
        self.last_sent_message = Some(marker);
        self
    }

    #[must_use]
    pub fn belongs_to(&self, clan_id: &ClanId) -> bool {
        self.clan_id.as_ref() == Some(clan_id)
    }

    /// Unread count, treating a missing counter as zero.
    #[must_use]
    pub fn unread(&self) -> u32 {
        self.count_mess_unread.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_type_from_code() {
        assert_eq!(ChannelType::from(1), ChannelType::Channel);
        assert_eq!(ChannelType::from(4), ChannelType::GmeetVoice);
        assert_eq!(ChannelType::from(99), ChannelType::Unknown);
        assert!(ChannelType::Dm.is_direct());
        assert!(!ChannelType::Channel.is_direct());
    }

    #[test]
    fn test_new_membership_is_keyed_by_channel() {
        let channel = ChannelMembership::new("c1", "general").in_clan("k1");
        assert_eq!(channel.id, channel.channel_id);
        assert!(channel.belongs_to(&ClanId::from("k1")));
        assert_eq!(channel.unread(), 0);
    }
}
