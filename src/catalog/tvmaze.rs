/// TVMaze catalog source implementation.
use super::tvmaze_types::{TvMazeEpisode, TvMazeShow};
use super::{CatalogError, CatalogSource, RawEpisode, ShowId};
use tracing::{debug, warn};

/// Default base URL of the TVMaze API
pub const TVMAZE_BASE_URL: &str = "https://api.tvmaze.com";

/// Catalog source for the TVMaze API.
///
/// Resolves show names through the singlesearch endpoint and lists
/// episodes through /shows/{id}/episodes. No authentication, no retries.
#[derive(Debug, Clone)]
pub struct TvMazeSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl TvMazeSource {
    /// Creates a new TVMaze source talking to the public API.
    pub fn new() -> Self {
        Self::with_base_url(TVMAZE_BASE_URL)
    }

    /// Creates a TVMaze source against a different base URL.
    ///
    /// A trailing slash is ignored.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Converts a TVMaze episode to our raw episode record.
    fn convert_episode(tvmaze_episode: TvMazeEpisode) -> RawEpisode {
        RawEpisode {
            season: tvmaze_episode.season,
            number: tvmaze_episode.number,
            name: tvmaze_episode.name,
            summary: tvmaze_episode.summary,
            rating: tvmaze_episode.rating.and_then(|r| r.average),
        }
    }

    /// Extracts a usable show id from a singlesearch response.
    fn show_id(show: &TvMazeShow) -> Option<ShowId> {
        show.id.filter(|id| *id != 0).map(ShowId)
    }
}

impl Default for TvMazeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogSource for TvMazeSource {
    fn find_show(&self, series_name: &str) -> Result<ShowId, CatalogError> {
        let url = format!("{}/singlesearch/shows", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", series_name)])
            .send()
            .map_err(|e| {
                warn!("TVMaze show search for '{}' failed: {}", series_name, e);
                CatalogError::Fetch {
                    series: series_name.to_string(),
                    reason: e.to_string(),
                }
            })?;

        // singlesearch answers 404 when nothing matches
        if !response.status().is_success() {
            debug!(
                "TVMaze show search for '{}' returned HTTP {}",
                series_name,
                response.status().as_u16()
            );
            return Err(CatalogError::NotFound(series_name.to_string()));
        }

        let show: TvMazeShow = response.json().map_err(|e| {
            warn!("Failed to parse TVMaze show for '{}': {}", series_name, e);
            CatalogError::NotFound(series_name.to_string())
        })?;

        let show_id =
            Self::show_id(&show).ok_or_else(|| CatalogError::NotFound(series_name.to_string()))?;

        debug!(
            "Resolved '{}' to TVMaze show {} ({})",
            series_name,
            show_id,
            show.name.as_deref().unwrap_or("unnamed")
        );

        Ok(show_id)
    }

    fn fetch_episodes(
        &self,
        show_id: ShowId,
        series_name: &str,
    ) -> Result<Vec<RawEpisode>, CatalogError> {
        let url = format!("{}/shows/{}/episodes", self.base_url, show_id);
        let fetch_error = |reason: String| {
            warn!("Fetching episodes for '{}' failed: {}", series_name, reason);
            CatalogError::Fetch {
                series: series_name.to_string(),
                reason,
            }
        };

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| fetch_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fetch_error(format!(
                "HTTP {} {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let episodes: Vec<TvMazeEpisode> = response
            .json()
            .map_err(|e| fetch_error(format!("Failed to parse API response: {}", e)))?;

        debug!(
            "Fetched {} episodes for '{}' (show {})",
            episodes.len(),
            series_name,
            show_id
        );

        Ok(episodes.into_iter().map(Self::convert_episode).collect())
    }
}
