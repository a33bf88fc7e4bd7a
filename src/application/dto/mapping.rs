//! Response mapping.
//!
//! Payloads from the remote API are loosely typed. These functions are the
//! only place that defaults missing fields; an absent list maps to an empty
//! one rather than an error.

use crate::domain::entities::{
    ChannelId, ChannelMembership, ChannelType, ClanId, ClanMember, Friend, FriendState,
    MemberMeta, MessageMarker, RoleId, UserId, UserMetadata, UserProfile,
};
use crate::domain::ports::{
    ApiChannelDescList, ApiChannelDescription, ApiClanUser, ApiClanUserList, ApiFriend,
    ApiFriendList, ApiMessageMarker, ApiUser,
};

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn map_marker(marker: ApiMessageMarker) -> MessageMarker {
    MessageMarker::new(non_empty(marker.id), marker.timestamp_seconds)
}

#[must_use]
pub fn map_user(user: ApiUser) -> UserProfile {
    UserProfile {
        id: UserId::from(user.id.unwrap_or_default()),
        username: user.username.unwrap_or_default(),
        display_name: non_empty(user.display_name),
        avatar_url: non_empty(user.avatar_url),
        google_id: non_empty(user.google_id),
        online: user.online.unwrap_or(false),
        is_mobile: user.is_mobile.unwrap_or(false),
        metadata: user
            .metadata
            .as_ref()
            .map(UserMetadata::from_json)
            .unwrap_or_default(),
    }
}

/// Maps a channel description. The entity key is the channel id, empty if
/// the backend left it out.
#[must_use]
pub fn map_channel(channel: ApiChannelDescription) -> ChannelMembership {
    let channel_id = ChannelId::from(channel.channel_id.unwrap_or_default());
    let meeting_code = non_empty(channel.meeting_code);
    ChannelMembership {
        id: channel_id.clone(),
        channel_id,
        channel_label: channel.channel_label.unwrap_or_default(),
        channel_private: channel.channel_private.is_some_and(|p| p != 0),
        clan_id: non_empty(channel.clan_id).map(ClanId::from),
        clan_name: non_empty(channel.clan_name),
        channel_type: channel.channel_type.map(ChannelType::from).unwrap_or_default(),
        parent_id: non_empty(channel.parent_id)
            .filter(|p| p != "0")
            .map(ChannelId::from),
        status: u8::from(meeting_code.is_some()),
        meeting_code,
        count_mess_unread: channel
            .count_mess_unread
            .map(|c| u32::try_from(c.max(0)).unwrap_or(u32::MAX)),
        last_sent_message: channel.last_sent_message.map(map_marker),
        last_seen_message: channel.last_seen_message.map(map_marker),
    }
}

#[must_use]
pub fn map_channels(response: ApiChannelDescList) -> Vec<ChannelMembership> {
    response
        .channeldesc
        .unwrap_or_default()
        .into_iter()
        .map(map_channel)
        .collect()
}

/// Maps a clan user. Records without a user id cannot be keyed and are dropped.
#[must_use]
pub fn map_clan_user(clan_user: ApiClanUser) -> Option<ClanMember> {
    let user = map_user(clan_user.user?);
    if user.id.is_empty() {
        return None;
    }
    Some(ClanMember {
        id: user.id.clone(),
        user,
        clan_id: non_empty(clan_user.clan_id).map(ClanId::from),
        clan_nick: non_empty(clan_user.clan_nick),
        clan_avatar: non_empty(clan_user.clan_avatar),
        role_id: clan_user
            .role_id
            .unwrap_or_default()
            .into_iter()
            .filter(|r| !r.is_empty())
            .map(RoleId::from)
            .collect(),
    })
}

#[must_use]
pub fn map_clan_users(response: ApiClanUserList) -> Vec<ClanMember> {
    response
        .clan_users
        .unwrap_or_default()
        .into_iter()
        .filter_map(map_clan_user)
        .collect()
}

/// Maps a relationship. Records without a counterpart id are dropped since
/// their composite key would collide.
#[must_use]
pub fn map_friend(friend: ApiFriend) -> Option<Friend> {
    let user = map_user(friend.user?);
    if user.id.is_empty() {
        return None;
    }
    let state = friend.state.map_or(FriendState::Friend, FriendState::from);
    Some(Friend::new(user, friend.source_id.unwrap_or_default(), state))
}

#[must_use]
pub fn map_friends(response: ApiFriendList) -> Vec<Friend> {
    response
        .friends
        .unwrap_or_default()
        .into_iter()
        .filter_map(map_friend)
        .collect()
}

/// Presence metadata carried inside a member record.
#[must_use]
pub fn extract_meta(member: &ClanMember) -> MemberMeta {
    MemberMeta {
        id: member.id.clone(),
        online: member.user.online,
        is_mobile: member.user.is_mobile,
        status: member.user.metadata.status.clone(),
        user_status: member.user.metadata.user_status.clone(),
    }
}
