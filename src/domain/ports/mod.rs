mod chat_api_port;
mod notification_port;
pub mod payloads;
mod session_port;

pub use chat_api_port::ChatApiPort;
pub use notification_port::NotificationPort;
pub use payloads::{
    ApiChannelDescList, ApiChannelDescription, ApiClanUser, ApiClanUserList, ApiFriend,
    ApiFriendList, ApiMessageMarker, ApiUser, FriendTargets,
};
pub use session_port::SessionPort;
