//! Client configuration

use crate::catalog::{CachePolicy, CatalogClient, TVMAZE_BASE_URL, TvMazeSource};

/// Settings for talking to the episode catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Base URL of the TVMaze compatible API
    pub base_url: String,
    /// Eviction policy for fetched episode lists
    pub cache_policy: CachePolicy,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: TVMAZE_BASE_URL.to_string(),
            cache_policy: CachePolicy::NeverEvict,
        }
    }
}

impl CatalogConfig {
    /// Builds a TVMaze backed catalog client from this configuration
    pub fn build_client(&self) -> CatalogClient<TvMazeSource> {
        CatalogClient::with_policy(
            TvMazeSource::with_base_url(&self.base_url),
            self.cache_policy,
        )
    }
}
