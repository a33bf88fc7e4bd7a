//! Time-bounded memoization of remote calls.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::application::context::SessionContext;
use crate::domain::errors::ApiError;

/// Derives the cache key for a call from its session and arguments.
pub type KeyNormalizer<A> = fn(&SessionContext, &A) -> String;

type FetchFn<A, V> =
    Arc<dyn Fn(SessionContext, A) -> BoxFuture<'static, Result<V, ApiError>> + Send + Sync>;

/// How long results live and how calls are keyed.
pub struct CachePolicy<A> {
    pub time_to_live: Duration,
    pub normalizer: KeyNormalizer<A>,
}

impl<A> CachePolicy<A> {
    #[must_use]
    pub fn new(time_to_live: Duration, normalizer: KeyNormalizer<A>) -> Self {
        Self {
            time_to_live,
            normalizer,
        }
    }
}

#[derive(Clone)]
struct Resolved<V> {
    value: V,
    resolved_at: Instant,
}

type Pending<V> = Shared<BoxFuture<'static, Result<Resolved<V>, ApiError>>>;

/// One request per key; every caller awaiting it sees the same outcome.
struct Entry<V> {
    generation: u64,
    request: Pending<V>,
}

impl<V: Clone> Entry<V> {
    /// Resolved successfully and older than `ttl`.
    fn is_expired(&self, ttl: Duration) -> bool {
        matches!(self.request.peek(), Some(Ok(r)) if r.resolved_at.elapsed() >= ttl)
    }

    fn has_failed(&self) -> bool {
        matches!(self.request.peek(), Some(Err(_)))
    }
}

struct Slots<V> {
    entries: HashMap<String, Entry<V>>,
    next_generation: u64,
}

/// Wraps an async remote call with a keyed, TTL-bounded result cache.
///
/// Calls sharing a key while a request is outstanding wait on that request
/// instead of issuing their own, and all of them get its result, error
/// included. A failed request is dropped so the next call retries.
/// `invalidate` drops the entry; a request already in flight on it still
/// completes for its own waiters.
pub struct Memoized<A, V> {
    name: &'static str,
    policy: CachePolicy<A>,
    fetch: FetchFn<A, V>,
    slots: Mutex<Slots<V>>,
}

impl<A, V> Memoized<A, V>
where
    A: Send + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Wraps `fetch` under `policy`. `name` only labels log lines.
    pub fn new<F, Fut>(name: &'static str, policy: CachePolicy<A>, fetch: F) -> Self
    where
        F: Fn(SessionContext, A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, ApiError>> + Send + 'static,
    {
        Self {
            name,
            policy,
            fetch: Arc::new(move |ctx, args| fetch(ctx, args).boxed()),
            slots: Mutex::new(Slots {
                entries: HashMap::new(),
                next_generation: 0,
            }),
        }
    }

    /// Cache key for a call.
    #[must_use]
    pub fn key(&self, ctx: &SessionContext, args: &A) -> String {
        (self.policy.normalizer)(ctx, args)
    }

    /// Returns the cached result for these arguments, fetching it if absent
    /// or older than the time-to-live.
    ///
    /// # Errors
    /// Propagates the wrapped call's error to every caller that joined the
    /// request. Errors are never cached.
    pub async fn call(&self, ctx: &SessionContext, args: A) -> Result<V, ApiError> {
        let key = self.key(ctx, &args);
        let (generation, request) = self.request(&key, ctx, args);

        match request.await {
            Ok(resolved) => Ok(resolved.value),
            Err(e) => {
                let mut slots = self.slots.lock();
                if slots
                    .entries
                    .get(&key)
                    .is_some_and(|entry| entry.generation == generation)
                {
                    slots.entries.remove(&key);
                    debug!(cache = self.name, key = %key, error = %e, "Dropped failed request");
                }
                Err(e)
            }
        }
    }

    /// Evicts the entry these arguments map to, regardless of its age.
    /// Returns `true` if an entry was present.
    pub fn invalidate(&self, ctx: &SessionContext, args: &A) -> bool {
        let key = self.key(ctx, args);
        let removed = self.slots.lock().entries.remove(&key).is_some();
        if removed {
            debug!(cache = self.name, key = %key, "Cache entry invalidated");
        }
        removed
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.slots.lock().entries.clear();
    }

    /// Number of keys currently tracked, including in-flight ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Joins the live request for `key` or starts a new one. Expired and
    /// failed entries of every key are swept first.
    fn request(&self, key: &str, ctx: &SessionContext, args: A) -> (u64, Pending<V>) {
        let ttl = self.policy.time_to_live;
        let mut slots = self.slots.lock();

        let before = slots.entries.len();
        slots
            .entries
            .retain(|_, entry| !entry.is_expired(ttl) && !entry.has_failed());
        if slots.entries.len() < before {
            trace!(cache = self.name, swept = before - slots.entries.len(), "Swept stale entries");
        }

        if let Some(entry) = slots.entries.get(key) {
            if entry.request.peek().is_some() {
                trace!(cache = self.name, key, "Cache hit");
            } else {
                trace!(cache = self.name, key, "Joining in-flight request");
            }
            return (entry.generation, entry.request.clone());
        }

        debug!(cache = self.name, key, "Cache miss, calling remote");
        let request = (self.fetch)(ctx.clone(), args)
            .map(|result| {
                result.map(|value| Resolved {
                    value,
                    resolved_at: Instant::now(),
                })
            })
            .boxed()
            .shared();

        let generation = slots.next_generation;
        slots.next_generation += 1;
        slots.entries.insert(
            key.to_string(),
            Entry {
                generation,
                request: request.clone(),
            },
        );
        (generation, request)
    }
}
