use std::collections::VecDeque;
use std::time::Duration;

use parking_lot::Mutex;

use crate::domain::ports::NotificationPort;
use crate::domain::{Notification, NotificationLevel};

/// Queue of in-app toasts, shown one at a time.
#[derive(Debug)]
pub struct ToastQueue {
    queue: Mutex<VecDeque<Notification>>,
    default_duration: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl ToastQueue {
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            default_duration,
        }
    }

    pub fn notify(
        &self,
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) {
        let notification =
            Notification::new(level, title, message).with_duration(self.default_duration);
        self.queue.lock().push_back(notification);
    }

    pub fn info(&self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Info, title, message);
    }

    pub fn error(&self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Error, title, message);
    }

    /// Starts the clock on the front toast and drops it once expired.
    pub fn tick(&self) {
        let mut queue = self.queue.lock();
        if let Some(front) = queue.front_mut() {
            front.mark_displayed();
            if front.is_expired() {
                queue.pop_front();
                if let Some(next) = queue.front_mut() {
                    next.mark_displayed();
                }
            }
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        self.queue.lock().front().cloned()
    }

    /// Removes and returns every pending toast.
    pub fn drain(&self) -> Vec<Notification> {
        self.queue.lock().drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}

impl NotificationPort for ToastQueue {
    fn send(&self, level: NotificationLevel, title: &str, body: &str) {
        self.notify(level, title, body);
    }
}
