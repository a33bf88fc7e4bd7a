//! Wire payloads returned by the remote chat API.
//!
//! Every field is optional: the backend omits empty values, so nothing here
//! can be trusted to be present. Conversion into domain entities happens in
//! `application::dto::mapping`.

use serde::{Deserialize, Serialize};

use crate::domain::entities::UserId;
use crate::domain::serde_utils::{lenient_list, opt_string_or_int};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiMessageMarker {
    #[serde(default, deserialize_with = "opt_string_or_int::deserialize")]
    pub id: Option<String>,
    #[serde(default)]
    pub timestamp_seconds: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiChannelDescription {
    #[serde(default, deserialize_with = "opt_string_or_int::deserialize")]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub channel_label: Option<String>,
    #[serde(default)]
    pub channel_private: Option<i64>,
    #[serde(default, deserialize_with = "opt_string_or_int::deserialize")]
    pub clan_id: Option<String>,
    #[serde(default)]
    pub clan_name: Option<String>,
    #[serde(default, rename = "type")]
    pub channel_type: Option<i64>,
    #[serde(default, deserialize_with = "opt_string_or_int::deserialize")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub meeting_code: Option<String>,
    #[serde(default)]
    pub count_mess_unread: Option<i64>,
    #[serde(default)]
    pub last_sent_message: Option<ApiMessageMarker>,
    #[serde(default)]
    pub last_seen_message: Option<ApiMessageMarker>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiChannelDescList {
    #[serde(default, deserialize_with = "lenient_list::deserialize")]
    pub channeldesc: Option<Vec<ApiChannelDescription>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiUser {
    #[serde(default, deserialize_with = "opt_string_or_int::deserialize")]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub google_id: Option<String>,
    #[serde(default)]
    pub online: Option<bool>,
    #[serde(default)]
    pub is_mobile: Option<bool>,
    /// Either a JSON object or a string holding JSON.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiClanUser {
    #[serde(default)]
    pub user: Option<ApiUser>,
    #[serde(default, deserialize_with = "opt_string_or_int::deserialize")]
    pub clan_id: Option<String>,
    #[serde(default)]
    pub clan_nick: Option<String>,
    #[serde(default)]
    pub clan_avatar: Option<String>,
    #[serde(default)]
    pub role_id: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiClanUserList {
    #[serde(default, deserialize_with = "lenient_list::deserialize")]
    pub clan_users: Option<Vec<ApiClanUser>>,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiFriend {
    #[serde(default)]
    pub user: Option<ApiUser>,
    #[serde(default)]
    pub state: Option<i64>,
    #[serde(default, deserialize_with = "opt_string_or_int::deserialize")]
    pub source_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiFriendList {
    #[serde(default, deserialize_with = "lenient_list::deserialize")]
    pub friends: Option<Vec<ApiFriend>>,
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Targets of a friend add/delete/block request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FriendTargets {
    pub ids: Vec<UserId>,
    pub usernames: Vec<String>,
}

impl FriendTargets {
    #[must_use]
    pub fn by_ids(ids: impl IntoIterator<Item = impl Into<UserId>>) -> Self {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            usernames: Vec::new(),
        }
    }

    #[must_use]
    pub fn by_usernames(usernames: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            ids: Vec::new(),
            usernames: usernames.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.usernames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_desc_tolerates_missing_fields() {
        let list: ApiChannelDescList =
            serde_json::from_str(r#"{"channeldesc":[{"channel_id":"1","type":4}]}"#).unwrap();
        let channels = list.channeldesc.unwrap();
        assert_eq!(channels[0].channel_id.as_deref(), Some("1"));
        assert_eq!(channels[0].channel_type, Some(4));
        assert!(channels[0].clan_id.is_none());
    }

    #[test]
    fn test_wrong_shaped_listing_decodes_empty() {
        let list: ApiChannelDescList =
            serde_json::from_str(r#"{"channeldesc":{"oops":1}}"#).unwrap();
        assert!(list.channeldesc.is_none());
        let list: ApiFriendList =
            serde_json::from_str(r#"{"friends":[{"state":"x"},{"state":1}]}"#).unwrap();
        assert_eq!(list.friends.unwrap().len(), 1);
    }

    #[test]
    fn test_empty_object_decodes() {
        let list: ApiFriendList = serde_json::from_str("{}").unwrap();
        assert!(list.friends.is_none());
    }

    #[test]
    fn test_targets_empty() {
        assert!(FriendTargets::default().is_empty());
        assert!(!FriendTargets::by_usernames(["bob"]).is_empty());
    }
}
