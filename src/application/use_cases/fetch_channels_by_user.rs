use tracing::{debug, info, warn};

use super::UseCaseDeps;
use crate::application::dto::map_channels;
use crate::domain::entities::ChannelMembership;
use crate::domain::errors::ApiError;

/// Options of a channel list fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchChannelsRequest {
    /// Evict the cached response first.
    pub no_cache: bool,
    /// Replace the store instead of merging into it.
    pub is_clear_channel: bool,
}

impl FetchChannelsRequest {
    #[must_use]
    pub const fn forced(mut self) -> Self {
        self.no_cache = true;
        self
    }

    #[must_use]
    pub const fn clearing(mut self) -> Self {
        self.is_clear_channel = true;
        self
    }
}

/// Loads the channels the session user belongs to.
#[derive(Debug, Clone)]
pub struct FetchChannelsByUserUseCase {
    deps: UseCaseDeps,
}

impl FetchChannelsByUserUseCase {
    #[must_use]
    pub const fn new(deps: UseCaseDeps) -> Self {
        Self { deps }
    }

    /// Fetches and stores the channel list. Returns how many channels the
    /// response carried.
    ///
    /// # Errors
    /// Returns the session or remote error. The store keeps its previous
    /// channels and records the message.
    pub async fn execute(&self, request: FetchChannelsRequest) -> Result<usize, ApiError> {
        self.deps
            .store
            .update_channels_by_user(|s| s.load.start());

        match self.fetch(request).await {
            Ok(channels) => {
                let count = channels.len();
                self.deps.store.update_channels_by_user(|s| {
                    s.apply_fetched(channels, request.is_clear_channel);
                    s.load.succeed();
                });
                info!(count, replaced = request.is_clear_channel, "Loaded channels");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load channels");
                self.deps
                    .store
                    .update_channels_by_user(|s| s.load.fail(e.to_string()));
                Err(e)
            }
        }
    }

    async fn fetch(&self, request: FetchChannelsRequest) -> Result<Vec<ChannelMembership>, ApiError> {
        let ctx = self.deps.context().await?;
        let cache = &self.deps.caches.channels_by_user;
        if request.no_cache && cache.invalidate(&ctx, &()) {
            debug!("Evicted cached channel list");
        }
        let response = cache.call(&ctx, ()).await?;
        Ok(map_channels(response))
    }
}
