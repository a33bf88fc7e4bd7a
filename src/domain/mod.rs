//! Domain layer with core entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Fetch lifecycle status.
pub mod loading;
/// User-visible notifications.
pub mod notification;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;

pub use errors::ApiError;
pub use loading::LoadingStatus;
pub use notification::{Notification, NotificationLevel};
pub use ports::{ChatApiPort, NotificationPort, SessionPort};
