//! Application services.

mod toast_queue;

pub use toast_queue::ToastQueue;
