//! Random episode selection
//!
//! Narrows a full episode list down to an inclusive season range, draws one
//! episode uniformly at random and normalizes it for display.

use crate::catalog::RawEpisode;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

/// Title used when the catalog has none
pub const UNTITLED: &str = "Untitled";

/// Summary used when the catalog has none
pub const NO_SUMMARY: &str = "No summary available.";

/// Anything between `<` and the next `>`; a dangling `<` runs to the end
static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>?").expect("markup pattern is valid")
});

/// Errors that can occur while selecting an episode
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The season filter left nothing to choose from
    #[error("No episodes found for \"{series}\" between seasons {min_season} and {max_season}.")]
    NoEpisodesInRange {
        series: String,
        min_season: u32,
        max_season: u32,
    },
}

/// A display-ready episode
///
/// Serializes with camelCase keys (`seriesTitle`, `seasonNumber`,
/// `episodeNumber`, `episodeTitle`, `summary`, `rating`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEpisode {
    /// The series name as the user asked for it
    pub series_title: String,
    /// The season number this episode belongs to
    pub season_number: u32,
    /// The episode number within the season, absent for some specials
    pub episode_number: Option<u32>,
    /// The episode title, or "Untitled"
    pub episode_title: String,
    /// Plain-text summary, or "No summary available."
    pub summary: String,
    /// Average rating, if the episode has been rated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// Picks one episode uniformly at random from an inclusive season range
///
/// The bounds are used as given. If `min_season > max_season` no season can
/// satisfy both, so the result is `NoEpisodesInRange`.
///
/// # Arguments
///
/// * `episodes` - The complete episode list of the series
/// * `series_name` - The name the user asked for, used as the series title
/// * `min_season` - Lowest season to consider (inclusive)
/// * `max_season` - Highest season to consider (inclusive)
/// * `rng` - Random source to draw from
///
/// # Examples
///
/// ```
/// use random_episode::{RawEpisode, select_episode};
///
/// let episodes = vec![RawEpisode {
///     season: 2,
///     number: Some(3),
///     name: None,
///     summary: Some("<p>Hi</p>".to_string()),
///     rating: Some(8.7),
/// }];
///
/// let episode = select_episode(&episodes, "Example", 1, 5, &mut rand::thread_rng()).unwrap();
/// assert_eq!(episode.episode_title, "Untitled");
/// assert_eq!(episode.summary, "Hi");
/// ```
pub fn select_episode<R>(
    episodes: &[RawEpisode],
    series_name: &str,
    min_season: u32,
    max_season: u32,
    rng: &mut R,
) -> Result<NormalizedEpisode, SelectionError>
where
    R: Rng + ?Sized,
{
    let candidates: Vec<&RawEpisode> = episodes
        .iter()
        .filter(|episode| min_season <= episode.season && episode.season <= max_season)
        .collect();

    if candidates.is_empty() {
        return Err(SelectionError::NoEpisodesInRange {
            series: series_name.to_string(),
            min_season,
            max_season,
        });
    }

    let chosen = candidates[rng.gen_range(0..candidates.len())];

    Ok(normalize_episode(chosen, series_name))
}

/// Maps a raw catalog record to its display form
pub fn normalize_episode(episode: &RawEpisode, series_name: &str) -> NormalizedEpisode {
    NormalizedEpisode {
        series_title: series_name.to_string(),
        season_number: episode.season,
        episode_number: episode.number,
        episode_title: episode
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNTITLED)
            .to_string(),
        summary: episode
            .summary
            .as_deref()
            .filter(|summary| !summary.is_empty())
            .map(strip_markup)
            .unwrap_or_else(|| NO_SUMMARY.to_string()),
        rating: episode.rating,
    }
}

/// Removes every markup tag from a piece of text
///
/// Text without any `<` is returned unchanged.
pub fn strip_markup(text: &str) -> String {
    MARKUP_TAG.replace_all(text, "").into_owned()
}
