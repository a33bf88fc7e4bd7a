use std::sync::Arc;

use serde::Serialize;

use crate::application::state::ChannelsByUserState;
use crate::domain::entities::{ChannelId, ChannelMembership, ChannelType, ClanId};

/// The subset of a membership that channel pickers need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelSummary {
    pub id: ChannelId,
    pub channel_id: ChannelId,
    pub channel_label: String,
    pub channel_private: bool,
    pub clan_id: Option<ClanId>,
    pub clan_name: Option<String>,
    pub channel_type: ChannelType,
    pub parent_id: Option<ChannelId>,
    pub meeting_code: Option<String>,
}

impl From<&ChannelMembership> for ChannelSummary {
    fn from(channel: &ChannelMembership) -> Self {
        Self {
            id: channel.id.clone(),
            channel_id: channel.channel_id.clone(),
            channel_label: channel.channel_label.clone(),
            channel_private: channel.channel_private,
            clan_id: channel.clan_id.clone(),
            clan_name: channel.clan_name.clone(),
            channel_type: channel.channel_type,
            parent_id: channel.parent_id.clone(),
            meeting_code: channel.meeting_code.clone(),
        }
    }
}

#[must_use]
pub fn select_all_channels_by_user(state: &ChannelsByUserState) -> Vec<Arc<ChannelMembership>> {
    state.channels.all()
}

#[must_use]
pub fn select_gmeet_voice_channels(state: &ChannelsByUserState) -> Vec<Arc<ChannelMembership>> {
    state
        .channels
        .iter()
        .filter(|c| c.channel_type == ChannelType::GmeetVoice)
        .cloned()
        .collect()
}

#[must_use]
pub fn select_all_info_channels(state: &ChannelsByUserState) -> Vec<ChannelSummary> {
    state
        .channels
        .iter()
        .map(|c| ChannelSummary::from(c.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ChannelsByUserState {
        let mut state = ChannelsByUserState::new();
        state.apply_fetched(
            vec![
                ChannelMembership::new("c1", "general").with_type(ChannelType::Channel),
                ChannelMembership::new("c2", "standup").with_type(ChannelType::GmeetVoice),
            ],
            true,
        );
        state
    }

    #[test]
    fn test_gmeet_voice_filter() {
        let voice = select_gmeet_voice_channels(&state());
        assert_eq!(voice.len(), 1);
        assert_eq!(voice[0].channel_label, "standup");
    }

    #[test]
    fn test_summaries_keep_order() {
        let summaries = select_all_info_channels(&state());
        let labels: Vec<&str> = summaries.iter().map(|s| s.channel_label.as_str()).collect();
        assert_eq!(labels, vec!["general", "standup"]);
        assert_eq!(summaries[1].channel_type, ChannelType::GmeetVoice);
        assert_eq!(select_all_channels_by_user(&state()).len(), 2);
    }
}
