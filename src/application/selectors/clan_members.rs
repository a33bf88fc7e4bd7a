use std::cmp::Ordering;
use std::sync::Arc;

use serde::Serialize;

use crate::application::state::{AccountState, ClanMembersMetaState, ClanMembersState};
use crate::domain::entities::{ClanMember, UserId};

/// Member ids split by presence, each half sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PresencePartition {
    pub online: Vec<UserId>,
    pub offline: Vec<UserId>,
}

#[must_use]
pub fn select_all_user_clans(state: &ClanMembersState) -> Vec<Arc<ClanMember>> {
    state.members.all()
}

#[must_use]
pub fn select_member_by_user_id(state: &ClanMembersState, user_id: &UserId) -> Option<Arc<ClanMember>> {
    state.members.get(user_id)
}

/// One slot per requested id, `None` where the user is not a member.
#[must_use]
pub fn select_members_by_user_ids(
    state: &ClanMembersState,
    user_ids: &[UserId],
) -> Vec<Option<Arc<ClanMember>>> {
    user_ids.iter().map(|id| state.members.get(id)).collect()
}

#[must_use]
pub fn select_member_by_username(state: &ClanMembersState, username: &str) -> Option<Arc<ClanMember>> {
    state.members.find(|m| m.user.username == username)
}

#[must_use]
pub fn select_member_by_google_id(state: &ClanMembersState, google_id: &str) -> Option<Arc<ClanMember>> {
    state
        .members
        .find(|m| m.user.google_id.as_deref() == Some(google_id))
}

#[must_use]
pub fn select_members_count(state: &ClanMembersState) -> usize {
    state.members.len()
}

struct Row {
    id: UserId,
    name: String,
    online: bool,
}

/// Splits members into online and offline ids.
///
/// Presence comes from `metas`; members without metadata are offline. The
/// local user is forced online unless their status is invisible, in which
/// case they are forced offline. A visible local user missing from the
/// member list is appended. Names compare case-insensitively, clan nickname
/// first, then display name, then username.
#[must_use]
pub fn select_clan_member_with_status_ids(
    members: &ClanMembersState,
    metas: &ClanMembersMetaState,
    account: &AccountState,
) -> PresencePartition {
    let mut rows: Vec<Row> = members
        .members
        .iter()
        .map(|m| Row {
            id: m.id.clone(),
            name: m.best_name().to_lowercase(),
            online: metas.is_online(&m.id),
        })
        .collect();

    if let Some(profile) = account.profile() {
        let visible = !profile.metadata.is_invisible();
        match rows.iter().position(|row| row.id == profile.id) {
            Some(index) => rows[index].online = visible,
            None if visible => rows.push(Row {
                id: profile.id.clone(),
                name: profile.display_name().to_lowercase(),
                online: true,
            }),
            None => {}
        }
    }

    rows.sort_by(|a, b| match (a.online, b.online) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });

    let (online, offline): (Vec<Row>, Vec<Row>) = rows.into_iter().partition(|row| row.online);
    PresencePartition {
        online: online.into_iter().map(|row| row.id).collect(),
        offline: offline.into_iter().map(|row| row.id).collect(),
    }
}
