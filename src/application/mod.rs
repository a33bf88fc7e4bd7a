//! Application layer: caches, stores, selectors and the use cases that
//! drive them.

/// Memoized remote fetches.
pub mod cache;
/// Authenticated client plus session.
pub mod context;
/// Wire-to-domain mapping.
pub mod dto;
/// Derived views.
pub mod selectors;
/// Application services.
pub mod services;
/// Entity stores.
pub mod state;
/// Use case implementations.
pub mod use_cases;

pub use cache::{CacheTtls, FetchCaches};
pub use context::SessionContext;
pub use selectors::Selectors;
pub use services::ToastQueue;
pub use state::AppStore;
pub use use_cases::{
    FetchChannelsByUserUseCase, FetchChannelsRequest, FetchClanMembersUseCase, FriendsUseCase,
    UseCaseDeps,
};
