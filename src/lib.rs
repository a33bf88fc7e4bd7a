//! clanchat-store - client-side state for a clan chat application.
//!
//! Fetches channel memberships, clan members and friend relationships through
//! a memoized remote layer, keeps them in normalized per-domain stores and
//! derives memoized views for rendering.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing caches, stores, selectors and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "clanchat";
