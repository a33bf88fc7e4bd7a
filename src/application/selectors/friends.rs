use std::sync::Arc;

use crate::application::state::{FriendsState, SentStatus};
use crate::domain::entities::{Friend, FriendState, UserId};

#[must_use]
pub fn select_all_friends(state: &FriendsState) -> Vec<Arc<Friend>> {
    state.friends.all()
}

/// State of the relationship whose counterpart is `user_id`.
#[must_use]
pub fn select_friend_status(state: &FriendsState, user_id: &UserId) -> Option<FriendState> {
    state.find_by_user(user_id).map(|f| f.state)
}

/// First relationship with `user_id` on either side.
#[must_use]
pub fn select_friend_by_id(state: &FriendsState, user_id: &UserId) -> Option<Arc<Friend>> {
    state.friends.find(|f| f.involves(user_id))
}

#[must_use]
pub fn select_current_tab_status(state: &FriendsState) -> &str {
    &state.current_tab_status
}

#[must_use]
pub const fn select_sent_status(state: &FriendsState) -> Option<SentStatus> {
    state.sent_status
}

/// Users the local user blocked.
#[must_use]
pub fn select_blocked_users(state: &FriendsState, current_user: Option<&UserId>) -> Vec<Arc<Friend>> {
    let Some(current_user) = current_user else {
        return Vec::new();
    };
    state
        .friends
        .iter()
        .filter(|f| f.is_blocked() && f.user_id() != current_user && &f.source_id == current_user)
        .cloned()
        .collect()
}

/// Every block, whichever side initiated it.
#[must_use]
pub fn select_blocked_users_for_message(state: &FriendsState) -> Vec<Arc<Friend>> {
    state
        .friends
        .iter()
        .filter(|f| f.is_blocked())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserProfile;

    fn state() -> FriendsState {
        let mut state = FriendsState::new();
        state.set_all(vec![
            Friend::new(UserProfile::new("Y", "y"), "X", FriendState::Blocked),
            Friend::new(UserProfile::new("X", "x"), "Y", FriendState::Blocked),
            Friend::new(UserProfile::new("W", "w"), "X", FriendState::Friend),
        ]);
        state
    }

    fn keys(friends: &[Arc<Friend>]) -> Vec<&str> {
        friends.iter().map(|f| f.key.as_str()).collect()
    }

    #[test]
    fn test_blocked_users_only_initiated_by_self() {
        let state = state();
        let x = UserId::from("X");
        assert_eq!(keys(&select_blocked_users(&state, Some(&x))), vec!["Y_X"]);
        assert!(select_blocked_users(&state, None).is_empty());
    }

    #[test]
    fn test_blocked_for_message_both_directions() {
        let state = state();
        assert_eq!(keys(&select_blocked_users_for_message(&state)), vec!["Y_X", "X_Y"]);
    }

    #[test]
    fn test_status_and_lookup() {
        let state = state();
        assert_eq!(select_friend_status(&state, &UserId::from("W")), Some(FriendState::Friend));
        assert_eq!(select_friend_status(&state, &UserId::from("Q")), None);
        assert_eq!(
            select_friend_by_id(&state, &UserId::from("X")).unwrap().key.as_str(),
            "Y_X"
        );
        assert_eq!(select_current_tab_status(&state), "all");
        assert_eq!(select_sent_status(&state), None);
        assert_eq!(select_all_friends(&state).len(), 3);
    }
}
