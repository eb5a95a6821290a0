/// TVMaze API response types for deserialization.
///
/// These structures mirror the JSON response format from the TVMaze API.
/// Only the fields we actually read are declared.
use serde::Deserialize;

/// The response from the TVMaze singlesearch endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeShow {
    /// Numeric show id (missing or zero means no usable match)
    pub id: Option<u64>,
    /// The canonical name of the TV show
    pub name: Option<String>,
}

/// A single entry of the /shows/{id}/episodes endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeEpisode {
    /// Season number
    pub season: u32,
    /// Episode number within the season (null for specials)
    pub number: Option<u32>,
    /// Episode title (may be null for episodes without a title)
    pub name: Option<String>,
    /// Episode summary in HTML format (may be null)
    pub summary: Option<String>,
    /// Rating block, `{"average": null}` when unrated
    pub rating: Option<TvMazeRating>,
}

/// Rating block of a TVMaze episode.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeRating {
    pub average: Option<f64>,
}
