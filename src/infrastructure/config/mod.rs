//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{
    ApiConfig, AppConfig, CacheConfig, LogLevel, NotificationsConfig, SessionConfig,
};
pub use args::{CliArgs, Command, TargetArgs};
pub use storage::{ConfigError, StorageManager};
