use crate::domain::entities::{UserId, UserProfile};

/// Profile of the signed-in user.
#[derive(Debug, Clone, Default)]
pub struct AccountState {
    profile: Option<UserProfile>,
    revision: u64,
}

impl AccountState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_account(&mut self, profile: UserProfile) {
        if self.profile.as_ref() == Some(&profile) {
            return;
        }
        self.profile = Some(profile);
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        if self.profile.take().is_some() {
            self.revision += 1;
        }
    }

    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        self.profile.as_ref().map(|p| &p.id)
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}
