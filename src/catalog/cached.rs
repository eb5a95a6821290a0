//! Caching catalog client
//!
//! This module provides the client that resolves series names into episode
//! lists through a catalog source and memoizes the results in memory for
//! the lifetime of the client.

use super::{CatalogError, CatalogSource, RawEpisode};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

/// Eviction policy for the episode cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Entries live as long as the client does
    #[default]
    NeverEvict,
    /// Entries older than the given duration count as a miss and are refetched
    TimeToLive(Duration),
}

impl CachePolicy {
    fn is_fresh(&self, stored_at: Instant) -> bool {
        match self {
            CachePolicy::NeverEvict => true,
            CachePolicy::TimeToLive(ttl) => stored_at.elapsed() < *ttl,
        }
    }
}

/// A cached episode list
#[derive(Debug)]
struct CacheEntry {
    episodes: Arc<Vec<RawEpisode>>,
    stored_at: Instant,
}

/// Catalog client with an in-memory episode cache
///
/// The cache is keyed by the series name exactly as the caller passed it.
/// Two spellings of the same show therefore get two independent entries.
///
/// The cache lock is only held for lookups and inserts, never while talking
/// to the source. Concurrent first-time requests for the same name may both
/// hit the source; whichever finishes last wins the cache slot.
#[derive(Debug)]
pub struct CatalogClient<S>
where
    S: CatalogSource,
{
    /// The underlying catalog source
    source: S,
    /// Eviction policy applied on lookup
    policy: CachePolicy,
    /// Episode lists by literal series name
    cache: Mutex<HashMap<String, CacheEntry>>,
}

impl<S> CatalogClient<S>
where
    S: CatalogSource,
{
    /// Creates a client over the given source that never evicts cache entries
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use random_episode::{CatalogClient, TvMazeSource};
    ///
    /// let client = CatalogClient::new(TvMazeSource::new());
    /// let episodes = client.fetch_episodes("Breaking Bad").unwrap();
    /// println!("{} episodes", episodes.len());
    /// ```
    pub fn new(source: S) -> Self {
        Self::with_policy(source, CachePolicy::default())
    }

    /// Creates a client with an explicit cache policy
    pub fn with_policy(source: S, policy: CachePolicy) -> Self {
        Self {
            source,
            policy,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the underlying catalog source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the active cache policy
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Fetches every episode of a series, consulting the cache first
    ///
    /// On a miss the name is resolved to a show id and the full episode list
    /// is fetched for it. A successful result is cached under `series_name`
    /// verbatim. Failures are never cached and never retried.
    ///
    /// # Errors
    ///
    /// * `CatalogError::NotFound` if the name is blank or the catalog has no match
    /// * `CatalogError::Fetch` if the episode list could not be retrieved
    pub fn fetch_episodes(&self, series_name: &str) -> Result<Arc<Vec<RawEpisode>>, CatalogError> {
        if series_name.trim().is_empty() {
            return Err(CatalogError::NotFound(series_name.to_string()));
        }

        if let Some(episodes) = self.lookup(series_name) {
            debug!("Episode cache hit for '{}'", series_name);
            return Ok(episodes);
        }

        debug!("Episode cache miss for '{}'", series_name);
        let show_id = self.source.find_show(series_name)?;
        let episodes = Arc::new(self.source.fetch_episodes(show_id, series_name)?);

        self.entries().insert(
            series_name.to_string(),
            CacheEntry {
                episodes: Arc::clone(&episodes),
                stored_at: Instant::now(),
            },
        );

        Ok(episodes)
    }

    /// Returns true if a fresh cache entry exists for exactly this name
    pub fn is_cached(&self, series_name: &str) -> bool {
        self.lookup(series_name).is_some()
    }

    /// Number of series names currently held in the cache
    pub fn cached_series_count(&self) -> usize {
        self.entries().len()
    }

    /// Drops every cached episode list
    pub fn clear_cache(&self) {
        self.entries().clear();
    }

    fn lookup(&self, series_name: &str) -> Option<Arc<Vec<RawEpisode>>> {
        self.entries()
            .get(series_name)
            .filter(|entry| self.policy.is_fresh(entry.stored_at))
            .map(|entry| Arc::clone(&entry.episodes))
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // entries are inserted whole, a poisoned map is still consistent
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
