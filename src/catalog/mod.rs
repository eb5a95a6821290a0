/// Episode catalog access.
///
/// This module provides the raw episode records as they come from the
/// external catalog service, the trait for catalog sources, and the caching
/// client that resolves series names into their complete episode lists.
mod cached;
mod tvmaze;
mod tvmaze_types;

pub use cached::{CachePolicy, CatalogClient};
pub use tvmaze::{TVMAZE_BASE_URL, TvMazeSource};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while retrieving episodes from the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The series name did not resolve to any show in the catalog
    #[error("Could not find a show matching \"{0}\".")]
    NotFound(String),

    /// The episode list could not be retrieved
    #[error("Failed to fetch episodes for \"{series}\": {reason}")]
    Fetch { series: String, reason: String },
}

/// Identifier of a show within the catalog service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShowId(pub u64);

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single episode exactly as the catalog reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEpisode {
    /// Season number (0 for specials on some shows)
    pub season: u32,
    /// Episode number within the season, absent for some specials
    pub number: Option<u32>,
    /// Episode title
    pub name: Option<String>,
    /// Episode summary, usually HTML
    pub summary: Option<String>,
    /// Average user rating
    pub rating: Option<f64>,
}

/// Trait for catalog services that can resolve shows and list their episodes.
///
/// The two operations are always used in sequence: `find_show` turns a
/// human-readable name into an identifier, `fetch_episodes` lists every
/// episode for that identifier.
pub trait CatalogSource {
    /// Resolves a series name to the best matching show.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the catalog has no match or its
    /// answer cannot be understood.
    fn find_show(&self, series_name: &str) -> Result<ShowId, CatalogError>;

    /// Fetches the complete episode list of a show.
    ///
    /// `series_name` is only used for error reporting.
    fn fetch_episodes(
        &self,
        show_id: ShowId,
        series_name: &str,
    ) -> Result<Vec<RawEpisode>, CatalogError>;
}
