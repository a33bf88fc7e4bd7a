//! Authenticated session value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::UserId;

/// Bearer token with masking and zeroize-on-drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SessionToken {
    value: String,
}

impl SessionToken {
    /// Creates a token, rejecting empty or whitespace-only input.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return None;
        }
        Some(Self { value })
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        if self.value.len() <= 10 {
            return "*".repeat(self.value.len());
        }

        let visible_prefix = &self.value[..4];
        let visible_suffix = &self.value[self.value.len() - 4..];
        format!("{visible_prefix}...{visible_suffix}")
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("value", &self.masked())
            .finish()
    }
}

/// Session the remote API calls run under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: UserId,
    /// Username of the session owner; part of every cache key.
    pub username: String,
}

impl Session {
    #[must_use]
    pub fn new(token: SessionToken, user_id: impl Into<UserId>, username: impl Into<String>) -> Self {
        Self {
            token,
            user_id: user_id.into(),
            username: username.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token() -> String {
        "eyJhbGciOiJIUzI1NiJ9.payload.signature".to_string()
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(SessionToken::new("   ").is_none());
        assert!(SessionToken::new(make_token()).is_some());
    }

    #[test]
    fn test_token_masking() {
        let token = SessionToken::new(make_token()).unwrap();
        let masked = token.masked();

        assert!(masked.contains("..."));
        assert!(!masked.contains(&make_token()));
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = SessionToken::new(make_token()).unwrap();
        let session = Session::new(token, "1", "alice");
        let debug_output = format!("{session:?}");

        assert!(!debug_output.contains(&make_token()));
        assert!(debug_output.contains("alice"));
    }
}
