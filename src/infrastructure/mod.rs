//! Adapters for the remote API, configuration and notifications.

/// HTTP chat API client.
pub mod api;
/// Configuration management.
pub mod config;
/// Desktop notifications.
pub mod notifications;
/// Session resolution.
pub mod session;

pub use api::HttpChatClient;
pub use config::{AppConfig, CliArgs, Command, ConfigError, LogLevel, StorageManager};
pub use notifications::{DesktopNotificationService, FanoutNotifier};
pub use session::StaticSessionProvider;
