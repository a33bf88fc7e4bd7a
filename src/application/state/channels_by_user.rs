//! Channels the local user is a member of.

use super::{Entity, EntityCollection, LoadState};
use crate::domain::entities::{ChannelId, ChannelMembership, ClanId, MessageMarker};

impl Entity for ChannelMembership {
    type Key = ChannelId;

    fn key(&self) -> ChannelId {
        self.id.clone()
    }
}

/// Marks a channel as fully read: zero unread, last seen at the last sent
/// message. Falls back to `now` when the last sent message has no time.
fn mark_read(channel: &mut ChannelMembership, now: i64) {
    let last_sent = channel.last_sent_message.clone().unwrap_or_default();
    channel.count_mess_unread = Some(0);
    channel.last_seen_message = Some(MessageMarker::new(
        last_sent.id,
        Some(last_sent.timestamp_seconds.unwrap_or(now)),
    ));
}

#[derive(Debug, Clone, Default)]
pub struct ChannelsByUserState {
    pub channels: EntityCollection<ChannelMembership>,
    pub load: LoadState,
}

impl ChannelsByUserState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, channel_id: &ChannelId) -> Option<std::sync::Arc<ChannelMembership>> {
        self.channels.get(channel_id)
    }

    /// Inserts a channel unless one with the same id is already stored.
    pub fn add(&mut self, channel: ChannelMembership) -> bool {
        self.channels.add_one(channel)
    }

    /// Same as [`Self::add`]; used when a channel is created or joined.
    pub fn add_one_channel(&mut self, channel: ChannelMembership) -> bool {
        self.add(channel)
    }

    pub fn upsert_one(&mut self, channel: ChannelMembership) -> bool {
        self.channels.upsert_one(channel)
    }

    pub fn update(
        &mut self,
        channel_id: &ChannelId,
        patch: impl FnOnce(&mut ChannelMembership),
    ) -> bool {
        self.channels.update_one(channel_id, patch)
    }

    pub fn remove(&mut self, channel_id: &ChannelId) -> bool {
        self.channels.remove_one(channel_id).is_some()
    }

    pub fn remove_all(&mut self) {
        self.channels.remove_all();
    }

    /// Applies a fetched list: replaces everything when `is_clear_channel`,
    /// merges otherwise.
    pub fn apply_fetched(&mut self, channels: Vec<ChannelMembership>, is_clear_channel: bool) {
        if is_clear_channel {
            self.channels.set_all(channels);
        } else {
            self.channels.upsert_many(channels);
        }
    }

    /// Drops every channel of a clan the user left.
    pub fn remove_by_clan_id(&mut self, clan_id: &ClanId) -> usize {
        self.channels.remove_where(|c| c.belongs_to(clan_id))
    }

    /// Replaces the last-sent marker with a bare timestamp.
    pub fn update_last_sent_time(&mut self, channel_id: &ChannelId, now: i64) -> bool {
        self.channels.update_one(channel_id, |c| {
            c.last_sent_message = Some(MessageMarker::at(now));
        })
    }

    /// Replaces the last-seen marker with a bare timestamp.
    pub fn update_last_seen_time(&mut self, channel_id: &ChannelId, now: i64) -> bool {
        self.channels.update_one(channel_id, |c| {
            c.last_seen_message = Some(MessageMarker::at(now));
        })
    }

    /// Clears the unread counter, only if the channel has one.
    pub fn reset_badge_count(&mut self, channel_id: &ChannelId) -> bool {
        self.channels.update_one(channel_id, |c| c.count_mess_unread = None)
    }

    /// Bumps the unread counter by `count`, or forces it to zero when
    /// `is_reset`. A bump that leaves the counter unchanged is skipped.
    /// Whenever the counter lands on zero the channel is marked read.
    pub fn update_channel_badge_count(
        &mut self,
        channel_id: &ChannelId,
        count: u32,
        is_reset: bool,
        now: i64,
    ) -> bool {
        let Some(current) = self.channels.get(channel_id).map(|c| c.count_mess_unread) else {
            return false;
        };
        let next = if is_reset {
            0
        } else {
            current.unwrap_or(0).saturating_add(count)
        };
        if current == Some(next) && !is_reset {
            return false;
        }

        self.channels.update_one(channel_id, |c| {
            if next == 0 {
                mark_read(c, now);
            } else {
                c.count_mess_unread = Some(next);
            }
        })
    }

    /// Marks every listed channel as read. Unknown ids are skipped.
    pub fn mark_as_read_channel(&mut self, channel_ids: &[ChannelId], now: i64) -> usize {
        self.channels
            .update_many(channel_ids.iter(), |c| mark_read(c, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use test_case::test_case;

    const NOW: i64 = 1_700_000_000;

    fn channel(id: &str, unread: Option<u32>) -> ChannelMembership {
        let mut channel = ChannelMembership::new(id, format!("#{id}"))
            .with_last_sent(MessageMarker::new(Some(format!("m-{id}")), Some(NOW - 60)));
        channel.count_mess_unread = unread;
        channel
    }

    fn state_with(channels: Vec<ChannelMembership>) -> ChannelsByUserState {
        let mut state = ChannelsByUserState::new();
        state.apply_fetched(channels, true);
        state
    }

    #[test_case(Some(3), 2, false, Some(5) ; "bump_existing")]
    #[test_case(None, 4, false, Some(4) ; "bump_missing_counts_from_zero")]
    #[test_case(Some(7), 5, true, Some(0) ; "reset_ignores_delta")]
    #[test_case(Some(0), 0, true, Some(0) ; "reset_when_already_zero")]
    fn test_badge_count(start: Option<u32>, delta: u32, reset: bool, expected: Option<u32>) {
        let id = ChannelId::from("c1");
        let mut state = state_with(vec![channel("c1", start)]);
        state.update_channel_badge_count(&id, delta, reset, NOW);
        assert_eq!(state.get(&id).unwrap().count_mess_unread, expected);
    }

    #[test]
    fn test_zero_bump_without_reset_is_noop() {
        let id = ChannelId::from("c1");
        let mut state = state_with(vec![channel("c1", Some(3))]);
        let before = state.get(&id).unwrap();
        let revision = state.channels.revision();

        assert!(!state.update_channel_badge_count(&id, 0, false, NOW));
        assert!(Arc::ptr_eq(&before, &state.get(&id).unwrap()));
        assert_eq!(state.channels.revision(), revision);
    }

    #[test]
    fn test_reset_syncs_last_seen_to_own_last_sent() {
        let mut state = state_with(vec![channel("c1", Some(4)), channel("c2", Some(1))]);
        let id = ChannelId::from("c1");

        assert!(state.update_channel_badge_count(&id, 0, true, NOW));

        let c1 = state.get(&id).unwrap();
        assert_eq!(c1.count_mess_unread, Some(0));
        assert_eq!(c1.last_seen_message, c1.last_sent_message);
        assert_eq!(
            c1.last_seen_message.as_ref().and_then(|m| m.id.as_deref()),
            Some("m-c1")
        );
    }

    #[test]
    fn test_reset_without_last_sent_uses_now() {
        let mut bare = ChannelMembership::new("c1", "general");
        bare.count_mess_unread = Some(2);
        let mut state = state_with(vec![bare]);
        let id = ChannelId::from("c1");

        state.update_channel_badge_count(&id, 0, true, NOW);
        assert_eq!(
            state.get(&id).unwrap().last_seen_message,
            Some(MessageMarker::at(NOW))
        );
    }

    #[test]
    fn test_badge_count_unknown_channel() {
        let mut state = ChannelsByUserState::new();
        assert!(!state.update_channel_badge_count(&ChannelId::from("nope"), 1, false, NOW));
    }

    #[test]
    fn test_reset_badge_count_only_when_set() {
        let mut state = state_with(vec![channel("c1", Some(2)), channel("c2", None)]);
        assert!(state.reset_badge_count(&ChannelId::from("c1")));
        assert!(!state.reset_badge_count(&ChannelId::from("c2")));
        assert_eq!(state.get(&ChannelId::from("c1")).unwrap().count_mess_unread, None);
    }

    #[test]
    fn test_mark_as_read_channel() {
        let mut state = state_with(vec![channel("c1", Some(2)), channel("c2", Some(9))]);
        let ids = [ChannelId::from("c1"), ChannelId::from("c2"), ChannelId::from("c3")];

        assert_eq!(state.mark_as_read_channel(&ids, NOW), 2);
        for channel in state.channels.iter() {
            assert_eq!(channel.count_mess_unread, Some(0));
            assert_eq!(channel.last_seen_message, channel.last_sent_message);
        }
    }

    #[test]
    fn test_remove_by_clan_id() {
        let mut state = state_with(vec![
            channel("c1", None).in_clan("k1"),
            channel("c2", None).in_clan("k2"),
            channel("c3", None).in_clan("k1"),
            channel("dm", None),
        ]);
        assert_eq!(state.remove_by_clan_id(&ClanId::from("k1")), 2);
        let ids: Vec<&str> = state.channels.ids().iter().map(ChannelId::as_str).collect();
        assert_eq!(ids, vec!["c2", "dm"]);
    }

    #[test]
    fn test_apply_fetched_merge_vs_replace() {
        let mut state = state_with(vec![channel("c1", None), channel("c2", None)]);

        state.apply_fetched(vec![channel("c2", Some(1)), channel("c3", None)], false);
        assert_eq!(state.channels.len(), 3);
        assert_eq!(state.get(&ChannelId::from("c2")).unwrap().unread(), 1);

        state.apply_fetched(vec![channel("c3", None)], true);
        assert_eq!(state.channels.len(), 1);
    }

    #[test]
    fn test_last_sent_and_seen_times() {
        let mut state = state_with(vec![channel("c1", None)]);
        let id = ChannelId::from("c1");

        assert!(state.update_last_sent_time(&id, NOW));
        assert!(state.update_last_seen_time(&id, NOW + 1));
        let c1 = state.get(&id).unwrap();
        assert_eq!(c1.last_sent_message, Some(MessageMarker::at(NOW)));
        assert_eq!(c1.last_seen_message, Some(MessageMarker::at(NOW + 1)));

        assert!(!state.update_last_sent_time(&ChannelId::from("zz"), NOW));
    }

    #[test]
    fn test_add_update_remove() {
        let mut state = ChannelsByUserState::new();
        assert!(state.add_one_channel(channel("c1", None)));
        assert!(!state.add(channel("c1", Some(5))));
        assert!(state.upsert_one(channel("c1", Some(5))));
        assert!(state.update(&ChannelId::from("c1"), |c| c.channel_label = "renamed".into()));
        assert_eq!(state.get(&ChannelId::from("c1")).unwrap().channel_label, "renamed");
        assert!(state.remove(&ChannelId::from("c1")));
        state.add(channel("c2", None));
        state.remove_all();
        assert!(state.channels.is_empty());
    }
}
