//! Domain entity definitions.

mod channel;
mod clan_member;
mod friend;
mod member_meta;
mod role;
mod session;
mod user;

pub use channel::{ChannelId, ChannelMembership, ChannelType, ClanId, MessageMarker};
pub use clan_member::ClanMember;
pub use friend::{Friend, FriendKey, FriendState};
pub use member_meta::{MemberMeta, StatusUpdate};
pub use role::{RoleId, RoleSet};
pub use session::{Session, SessionToken};
pub use user::{UserId, UserMetadata, UserProfile, UserStatus};
