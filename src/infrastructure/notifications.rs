//! Desktop notifications with conditional compilation.

use std::sync::Arc;

use crate::domain::NotificationLevel;
use crate::domain::ports::NotificationPort;

/// Desktop notification service.
#[cfg(feature = "notify")]
mod notify_impl {
    use super::*;
    use notify_rust::Notification;

    #[derive(Debug, Clone, Default)]
    pub struct DesktopNotificationService {
        enabled: bool,
    }

    impl DesktopNotificationService {
        #[must_use]
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        #[must_use]
        pub const fn is_enabled(&self) -> bool {
            self.enabled
        }
    }

    impl NotificationPort for DesktopNotificationService {
        fn send(&self, level: NotificationLevel, title: &str, body: &str) {
            if !self.enabled {
                return;
            }

            let title = match level {
                NotificationLevel::Error => format!("Error: {title}"),
                _ => title.to_string(),
            };
            let body = body.to_string();

            let show = move || {
                if let Err(e) = Notification::new()
                    .summary(&title)
                    .body(&body)
                    .appname("clanchat")
                    .show()
                {
                    tracing::warn!("Failed to show notification: {}", e);
                }
            };
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn_blocking(show);
                }
                Err(_) => show(),
            }
        }
    }
}

/// Stub notification service when notify feature is disabled.
#[cfg(not(feature = "notify"))]
mod stub_impl {
    use super::*;

    #[derive(Debug, Clone, Default)]
    pub struct DesktopNotificationService {
        _enabled: bool,
    }

    impl DesktopNotificationService {
        #[must_use]
        pub fn new(_enabled: bool) -> Self {
            Self { _enabled: false }
        }

        #[must_use]
        pub const fn is_enabled(&self) -> bool {
            false
        }
    }

    impl NotificationPort for DesktopNotificationService {
        fn send(&self, _level: NotificationLevel, _title: &str, _body: &str) {
            // Notifications disabled - do nothing
        }
    }
}

#[cfg(feature = "notify")]
pub use notify_impl::DesktopNotificationService;
#[cfg(not(feature = "notify"))]
pub use stub_impl::DesktopNotificationService;

/// Delivers each notification to every inner port in order.
#[derive(Clone, Default)]
pub struct FanoutNotifier {
    targets: Vec<Arc<dyn NotificationPort>>,
}

impl FanoutNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, target: Arc<dyn NotificationPort>) -> Self {
        self.targets.push(target);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl NotificationPort for FanoutNotifier {
    fn send(&self, level: NotificationLevel, title: &str, body: &str) {
        for target in &self.targets {
            target.send(level, title, body);
        }
    }
}

impl std::fmt::Debug for FanoutNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutNotifier")
            .field("targets", &self.targets.len())
            .finish()
    }
}
