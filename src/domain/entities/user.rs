//! Chat user entity.

use serde::{Deserialize, Serialize};

/// Unique identifier for a chat user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for UserId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Presence mode a user picked for themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Normal presence, driven by connection state.
    #[default]
    Online,
    /// Idle.
    Idle,
    /// Do not disturb.
    #[serde(alias = "dnd")]
    DoNotDisturb,
    /// Connected but shown as offline to everyone else.
    Invisible,
    /// Any value this client does not know about.
    #[serde(other)]
    Other,
}

impl UserStatus {
    /// Parses the wire representation. Matching is case-insensitive.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "online" => Self::Online,
            "idle" => Self::Idle,
            "dnd" | "donotdisturb" | "do not disturb" => Self::DoNotDisturb,
            "invisible" => Self::Invisible,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn is_invisible(&self) -> bool {
        matches!(self, Self::Invisible)
    }
}

/// Free-form profile metadata attached to a user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    /// Custom status text.
    #[serde(default)]
    pub status: Option<String>,
    /// Presence mode.
    #[serde(default)]
    pub user_status: Option<UserStatus>,
}

impl UserMetadata {
    /// Builds metadata from the backend's loosely typed value.
    ///
    /// The backend sends either a JSON object or a string containing JSON.
    /// Anything unparseable yields empty metadata.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(raw) => serde_json::from_str::<serde_json::Value>(raw)
                .map(|parsed| Self::from_object(&parsed))
                .unwrap_or_default(),
            other => Self::from_object(other),
        }
    }

    fn from_object(value: &serde_json::Value) -> Self {
        let status = value
            .get("status")
            .and_then(serde_json::Value::as_str)
            .map(String::from);
        let user_status = value
            .get("user_status")
            .and_then(serde_json::Value::as_str)
            .map(UserStatus::parse);
        Self {
            status,
            user_status,
        }
    }

    /// Returns true if the user chose to appear offline.
    #[must_use]
    pub fn is_invisible(&self) -> bool {
        self.user_status.as_ref().is_some_and(UserStatus::is_invisible)
    }
}

/// Profile of a chat user as embedded in friend and member records.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub google_id: Option<String>,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub is_mobile: bool,
    #[serde(default)]
    pub metadata: UserMetadata,
}

impl UserProfile {
    #[must_use]
    pub fn new(id: impl Into<UserId>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    #[must_use]
    pub const fn with_online(mut self, online: bool) -> Self {
        self.online = online;
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: UserMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Display name if set and non-empty, otherwise the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_id_from_string() {
        let id = UserId::from("12345");
        assert_eq!(id.as_str(), "12345");
        assert_eq!(id.to_string(), "12345");
        assert!(!id.is_empty());
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let user = UserProfile::new("1", "bob");
        assert_eq!(user.display_name(), "bob");

        let user = user.with_display_name("Bobby");
        assert_eq!(user.display_name(), "Bobby");

        let user = UserProfile::new("1", "bob").with_display_name("");
        assert_eq!(user.display_name(), "bob");
    }

    #[test]
    fn test_metadata_from_object() {
        let meta = UserMetadata::from_json(&json!({"status": "brb", "user_status": "Invisible"}));
        assert_eq!(meta.status.as_deref(), Some("brb"));
        assert!(meta.is_invisible());
    }

    #[test]
    fn test_metadata_from_embedded_string() {
        let meta = UserMetadata::from_json(&json!("{\"user_status\":\"idle\"}"));
        assert_eq!(meta.user_status, Some(UserStatus::Idle));
        assert!(!meta.is_invisible());
    }

    #[test]
    fn test_metadata_garbage_is_empty() {
        assert_eq!(UserMetadata::from_json(&json!("not json")), UserMetadata::default());
        assert_eq!(UserMetadata::from_json(&json!(42)), UserMetadata::default());
    }
}
