//! Members of the currently loaded clan.

use std::sync::Arc;

use super::{Entity, EntityCollection, LoadState};
use crate::domain::entities::{ClanId, ClanMember, RoleId, UserId};

impl Entity for ClanMember {
    type Key = UserId;

    fn key(&self) -> UserId {
        self.id.clone()
    }
}

/// A role granted to or revoked from a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub user_id: UserId,
    pub role_id: RoleId,
}

impl RoleAssignment {
    #[must_use]
    pub fn new(user_id: impl Into<UserId>, role_id: impl Into<RoleId>) -> Self {
        Self {
            user_id: user_id.into(),
            role_id: role_id.into(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[derive(Debug, Clone, Default)]
pub struct ClanMembersState {
    pub members: EntityCollection<ClanMember>,
    pub load: LoadState,
}

impl ClanMembersState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, user_id: &UserId) -> Option<Arc<ClanMember>> {
        self.members.get(user_id)
    }

    pub fn set_all(&mut self, members: Vec<ClanMember>) {
        self.members.set_all(members);
    }

    pub fn add(&mut self, member: ClanMember) -> bool {
        self.members.add_one(member)
    }

    pub fn upsert_many(&mut self, members: Vec<ClanMember>) -> usize {
        self.members.upsert_many(members)
    }

    pub fn update_many(&mut self, user_ids: &[UserId], patch: impl FnMut(&mut ClanMember)) -> usize {
        self.members.update_many(user_ids.iter(), patch)
    }

    pub fn remove(&mut self, user_id: &UserId) -> bool {
        self.members.remove_one(user_id).is_some()
    }

    /// Rewrites the per-clan nickname and avatar. Empty values keep what is
    /// stored.
    pub fn update_user_clan(&mut self, user_id: &UserId, clan_nick: &str, clan_avatar: &str) -> bool {
        self.members.update_one(user_id, |member| {
            if let Some(nick) = non_empty(clan_nick) {
                member.clan_nick = Some(nick);
            }
            if let Some(avatar) = non_empty(clan_avatar) {
                member.clan_avatar = Some(avatar);
            }
        })
    }

    /// Same rewrite as [`Self::update_user_clan`] but scoped to one clan and
    /// taking the values as given: an empty value clears the override.
    pub fn update_user_channel(
        &mut self,
        user_id: &UserId,
        clan_id: &ClanId,
        clan_nick: &str,
        clan_avatar: &str,
    ) -> bool {
        let in_clan = self
            .members
            .get(user_id)
            .is_some_and(|m| m.clan_id.as_ref() == Some(clan_id));
        if !in_clan {
            return false;
        }
        self.members.update_one(user_id, |member| {
            member.clan_nick = non_empty(clan_nick);
            member.clan_avatar = non_empty(clan_avatar);
        })
    }

    /// Grants roles. Members not in the store are skipped. Returns how many
    /// members changed.
    pub fn update_many_role_ids(&mut self, assignments: &[RoleAssignment]) -> usize {
        assignments
            .iter()
            .filter(|a| self.add_role_id_user(&a.user_id, a.role_id.clone()))
            .count()
    }

    /// Revokes roles. Members not in the store are skipped.
    pub fn remove_many_role_ids(&mut self, assignments: &[RoleAssignment]) -> usize {
        assignments
            .iter()
            .filter(|a| self.remove_role_id_user(&a.user_id, &a.role_id))
            .count()
    }

    /// Grants a single role. Granting a role the member already has is a
    /// no-op.
    pub fn add_role_id_user(&mut self, user_id: &UserId, role_id: RoleId) -> bool {
        self.members.update_one(user_id, |member| {
            member.role_id.insert(role_id);
        })
    }

    pub fn remove_role_id_user(&mut self, user_id: &UserId, role_id: &RoleId) -> bool {
        self.members.update_one(user_id, |member| {
            member.role_id.remove(role_id);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserProfile;

    fn member(id: &str, username: &str) -> ClanMember {
        ClanMember::new(UserProfile::new(id, username)).in_clan("k1")
    }

    fn state() -> ClanMembersState {
        let mut state = ClanMembersState::new();
        state.set_all(vec![member("u1", "bob"), member("u2", "amy")]);
        state
    }

    fn roles_of(state: &ClanMembersState, id: &str) -> Vec<String> {
        state
            .get(&UserId::from(id))
            .unwrap()
            .role_id
            .iter()
            .map(|r| r.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_adding_role_twice_keeps_one() {
        let mut state = state();
        let u1 = UserId::from("u1");

        assert!(state.add_role_id_user(&u1, RoleId::from("r1")));
        assert!(!state.add_role_id_user(&u1, RoleId::from("r1")));
        assert_eq!(roles_of(&state, "u1"), vec!["r1"]);
    }

    #[test]
    fn test_update_many_role_ids_is_set_union() {
        let mut state = state();
        let changed = state.update_many_role_ids(&[
            RoleAssignment::new("u1", "r1"),
            RoleAssignment::new("u1", "r2"),
            RoleAssignment::new("u1", "r1"),
            RoleAssignment::new("ghost", "r1"),
        ]);
        assert_eq!(changed, 2);
        assert_eq!(roles_of(&state, "u1"), vec!["r1", "r2"]);
        assert!(state.get(&UserId::from("ghost")).is_none());

        let removed = state.remove_many_role_ids(&[
            RoleAssignment::new("u1", "r1"),
            RoleAssignment::new("u2", "r1"),
        ]);
        assert_eq!(removed, 1);
        assert_eq!(roles_of(&state, "u1"), vec!["r2"]);
    }

    #[test]
    fn test_update_user_clan_keeps_current_on_empty() {
        let mut state = state();
        let u1 = UserId::from("u1");

        assert!(state.update_user_clan(&u1, "Captain", "a.png"));
        assert!(!state.update_user_clan(&u1, "", ""));
        assert!(state.update_user_clan(&u1, "", "b.png"));

        let m = state.get(&u1).unwrap();
        assert_eq!(m.clan_nick.as_deref(), Some("Captain"));
        assert_eq!(m.clan_avatar.as_deref(), Some("b.png"));
    }

    #[test]
    fn test_update_user_channel_requires_matching_clan() {
        let mut state = state();
        let u1 = UserId::from("u1");

        assert!(!state.update_user_channel(&u1, &ClanId::from("other"), "Nick", ""));
        assert!(state.update_user_channel(&u1, &ClanId::from("k1"), "Nick", ""));
        let m = state.get(&u1).unwrap();
        assert_eq!(m.clan_nick.as_deref(), Some("Nick"));
        assert!(m.clan_avatar.is_none());
    }

    #[test]
    fn test_basic_mutations() {
        let mut state = state();
        assert!(!state.add(member("u1", "changed")));
        assert_eq!(state.upsert_many(vec![member("u1", "bobby"), member("u3", "cat")]), 2);
        assert_eq!(state.members.len(), 3);

        let updated = state.update_many(&[UserId::from("u1"), UserId::from("u9")], |m| {
            m.clan_nick = Some("x".into());
        });
        assert_eq!(updated, 1);
        assert!(state.remove(&UserId::from("u3")));
        assert!(!state.remove(&UserId::from("u3")));
    }
}
