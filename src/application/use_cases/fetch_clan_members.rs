use tracing::{debug, info, warn};

use super::UseCaseDeps;
use crate::application::dto::extract_meta;
use crate::domain::entities::{ClanId, ClanMember};
use crate::domain::errors::ApiError;

/// Loads the members of a clan and their presence metadata.
#[derive(Debug, Clone)]
pub struct FetchClanMembersUseCase {
    deps: UseCaseDeps,
}

impl FetchClanMembersUseCase {
    #[must_use]
    pub const fn new(deps: UseCaseDeps) -> Self {
        Self { deps }
    }

    /// Replaces the member store with the clan's members and refreshes the
    /// presence store from the same records.
    ///
    /// # Errors
    /// Returns the session or remote error; stored members are left alone.
    pub async fn execute(&self, clan_id: &ClanId, no_cache: bool) -> Result<usize, ApiError> {
        let store = &self.deps.store;
        store.update_clan_members(|s| s.load.start());

        match self.fetch(clan_id, no_cache).await {
            Ok(members) => {
                let count = members.len();
                let metas: Vec<_> = members.iter().map(extract_meta).collect();
                store.update_clan_members(|s| {
                    s.set_all(members);
                    s.load.succeed();
                });
                store.update_clan_members_meta(|s| s.update_bulk_metadata(metas));
                info!(clan_id = %clan_id, count, "Loaded clan members");
                Ok(count)
            }
            Err(e) => {
                warn!(clan_id = %clan_id, error = %e, "Failed to load clan members");
                store.update_clan_members(|s| s.load.fail(e.to_string()));
                Err(e)
            }
        }
    }

    async fn fetch(&self, clan_id: &ClanId, no_cache: bool) -> Result<Vec<ClanMember>, ApiError> {
        let ctx = self.deps.context().await?;
        let cache = &self.deps.caches.clan_users;
        if no_cache && cache.invalidate(&ctx, clan_id) {
            debug!(clan_id = %clan_id, "Evicted cached clan members");
        }
        cache.call(&ctx, clan_id.clone()).await
    }
}
