use std::sync::Arc;

use super::{Entity, EntityCollection};
use crate::domain::entities::{MemberMeta, StatusUpdate, UserId, UserStatus};

impl Entity for MemberMeta {
    type Key = UserId;

    fn key(&self) -> UserId {
        self.id.clone()
    }
}

/// Presence metadata, kept apart from membership so presence pushes don't
/// touch member records.
#[derive(Debug, Clone, Default)]
pub struct ClanMembersMetaState {
    pub metas: EntityCollection<MemberMeta>,
}

impl ClanMembersMetaState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, user_id: &UserId) -> Option<Arc<MemberMeta>> {
        self.metas.get(user_id)
    }

    /// Unknown users count as offline.
    #[must_use]
    pub fn is_online(&self, user_id: &UserId) -> bool {
        self.metas.get(user_id).is_some_and(|m| m.online)
    }

    pub fn update_bulk_metadata(&mut self, metas: Vec<MemberMeta>) -> usize {
        self.metas.upsert_many(metas)
    }

    /// Applies presence pushes to users already tracked.
    pub fn set_many_status_user(&mut self, updates: &[StatusUpdate]) -> usize {
        updates
            .iter()
            .filter(|update| {
                self.metas.update_one(&update.user_id, |meta| {
                    meta.online = update.online;
                    meta.is_mobile = update.is_mobile;
                })
            })
            .count()
    }

    pub fn update_user_status(&mut self, user_id: &UserId, user_status: UserStatus) -> bool {
        self.metas
            .update_one(user_id, |meta| meta.user_status = Some(user_status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_updates_only_touch_known_users() {
        let mut state = ClanMembersMetaState::new();
        state.update_bulk_metadata(vec![MemberMeta::new("u1", false), MemberMeta::new("u2", true)]);

        let changed = state.set_many_status_user(&[
            StatusUpdate::new("u1", true, true),
            StatusUpdate::new("u2", true, false),
            StatusUpdate::new("ghost", true, false),
        ]);
        assert_eq!(changed, 1);
        assert!(state.is_online(&UserId::from("u1")));
        assert!(state.get(&UserId::from("u1")).unwrap().is_mobile);
        assert!(!state.is_online(&UserId::from("ghost")));
        assert_eq!(state.metas.len(), 2);
    }

    #[test]
    fn test_update_user_status() {
        let mut state = ClanMembersMetaState::new();
        state.update_bulk_metadata(vec![MemberMeta::new("u1", true)]);

        assert!(state.update_user_status(&UserId::from("u1"), UserStatus::Invisible));
        assert!(!state.update_user_status(&UserId::from("u1"), UserStatus::Invisible));
        assert_eq!(
            state.get(&UserId::from("u1")).unwrap().user_status,
            Some(UserStatus::Invisible)
        );
    }
}
