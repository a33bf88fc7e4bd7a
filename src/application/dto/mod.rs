//! Boundary conversions between wire payloads and domain entities.

pub mod mapping;

pub use mapping::{
    extract_meta, map_channel, map_channels, map_clan_user, map_clan_users, map_friend,
    map_friends, map_user,
};
