//! Random Episode - Let fate pick what to watch tonight
//!
//! This library fetches the complete episode list of a TV series from the
//! TVMaze catalog, narrows it down to a range of seasons and picks one
//! episode at random. Fetched episode lists are cached per series name for
//! the lifetime of the client.

mod catalog;
mod config;
mod favorites;
mod selector;
mod series;

// Re-export error types
pub use catalog::CatalogError;
pub use favorites::FavoritesError;
pub use selector::SelectionError;

pub use catalog::{
    CachePolicy, CatalogClient, CatalogSource, RawEpisode, ShowId, TVMAZE_BASE_URL, TvMazeSource,
};
pub use config::CatalogConfig;
pub use favorites::{FAVORITES_KEY, FavoritesStore};
pub use selector::{
    NO_SUMMARY, NormalizedEpisode, UNTITLED, normalize_episode, select_episode, strip_markup,
};
pub use series::{KnownSeries, SERIES_LIST, Series, find_series, random_series, search_series};

use rand::Rng;
use thiserror::Error;

/// Progress event emitted while rolling an episode
///
/// These events allow library users to track progress and provide feedback
/// while the catalog is queried.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Looking up the episode list
    FetchingEpisodes { series_name: String, cached: bool },

    /// Episode list available
    EpisodesLoaded { series_name: String, count: usize },

    /// Drawing from the season range
    SelectingEpisode { min_season: u32, max_season: u32 },

    /// An episode has been picked
    EpisodeSelected { episode: NormalizedEpisode },
}

/// Top-level error type for Random Episode operations
#[derive(Debug, Error)]
pub enum RandomEpisodeError {
    /// Error while talking to the catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Error while selecting an episode
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Rolls a random episode of a series within an inclusive season range
///
/// Fetches the episode list through the client (served from its cache when
/// possible), then picks one episode uniformly from seasons
/// `min_season..=max_season`.
///
/// # Arguments
///
/// * `client` - The catalog client to fetch episodes through
/// * `series_name` - The name of the TV series, passed to the catalog as is
/// * `min_season` - Lowest season to consider (inclusive)
/// * `max_season` - Highest season to consider (inclusive)
/// * `rng` - Random source used for the draw
/// * `progress_callback` - Closure called with progress events
///
/// # Examples
///
/// ```no_run
/// use random_episode::{CatalogConfig, ProgressEvent, roll_episode};
///
/// let client = CatalogConfig::default().build_client();
/// let episode = roll_episode(
///     &client,
///     "Breaking Bad",
///     1,
///     5,
///     &mut rand::thread_rng(),
///     |event| {
///         if let ProgressEvent::EpisodesLoaded { count, .. } = event {
///             println!("{} episodes to choose from", count);
///         }
///     },
/// )
/// .unwrap();
///
/// println!("{}", episode.episode_title);
/// ```
pub fn roll_episode<S, R, F>(
    client: &CatalogClient<S>,
    series_name: &str,
    min_season: u32,
    max_season: u32,
    rng: &mut R,
    mut progress_callback: F,
) -> Result<NormalizedEpisode, RandomEpisodeError>
where
    S: CatalogSource,
    R: Rng + ?Sized,
    F: FnMut(ProgressEvent),
{
    progress_callback(ProgressEvent::FetchingEpisodes {
        series_name: series_name.to_string(),
        cached: client.is_cached(series_name),
    });

    let episodes = client.fetch_episodes(series_name)?;

    progress_callback(ProgressEvent::EpisodesLoaded {
        series_name: series_name.to_string(),
        count: episodes.len(),
    });

    progress_callback(ProgressEvent::SelectingEpisode {
        min_season,
        max_season,
    });

    let episode = select_episode(&episodes, series_name, min_season, max_season, rng)?;

    progress_callback(ProgressEvent::EpisodeSelected {
        episode: episode.clone(),
    });

    Ok(episode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::Cell;

    /// Catalog with one show of five seasons, two episodes each
    struct FiveSeasonCatalog {
        searches: Cell<usize>,
    }

    impl CatalogSource for FiveSeasonCatalog {
        fn find_show(&self, series_name: &str) -> Result<ShowId, CatalogError> {
            self.searches.set(self.searches.get() + 1);
            if series_name == "Breaking Bad" {
                Ok(ShowId(169))
            } else {
                Err(CatalogError::NotFound(series_name.to_string()))
            }
        }

        fn fetch_episodes(
            &self,
            _show_id: ShowId,
            _series_name: &str,
        ) -> Result<Vec<RawEpisode>, CatalogError> {
            Ok((1..=5)
                .flat_map(|season| {
                    (1..=2).map(move |number| RawEpisode {
                        season,
                        number: Some(number),
                        name: Some(format!("Episode {}", number)),
                        summary: Some("<p>Something happens.</p>".to_string()),
                        rating: Some(9.0),
                    })
                })
                .collect())
        }
    }

    fn client() -> CatalogClient<FiveSeasonCatalog> {
        CatalogClient::new(FiveSeasonCatalog {
            searches: Cell::new(0),
        })
    }

    #[test]
    fn test_roll_episode_reports_progress() {
        let client = client();
        let mut events = Vec::new();

        let episode = roll_episode(
            &client,
            "Breaking Bad",
            1,
            5,
            &mut StdRng::seed_from_u64(1),
            |event| events.push(event),
        )
        .unwrap();

        assert_eq!(episode.series_title, "Breaking Bad");
        assert!((1..=5).contains(&episode.season_number));
        assert_eq!(episode.summary, "Something happens.");
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            ProgressEvent::FetchingEpisodes {
                series_name: "Breaking Bad".to_string(),
                cached: false,
            }
        );
        assert_eq!(
            events[1],
            ProgressEvent::EpisodesLoaded {
                series_name: "Breaking Bad".to_string(),
                count: 10,
            }
        );
        assert_eq!(
            events[2],
            ProgressEvent::SelectingEpisode {
                min_season: 1,
                max_season: 5,
            }
        );
        assert_eq!(events[3], ProgressEvent::EpisodeSelected { episode });
    }

    #[test]
    fn test_reroll_uses_cache() {
        let client = client();
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..5 {
            roll_episode(&client, "Breaking Bad", 2, 3, &mut rng, |_| {}).unwrap();
        }

        assert_eq!(client.source().searches.get(), 1);

        let mut cached = None;
        roll_episode(&client, "Breaking Bad", 2, 3, &mut rng, |event| {
            if let ProgressEvent::FetchingEpisodes { cached: hit, .. } = event {
                cached = Some(hit);
            }
        })
        .unwrap();
        assert_eq!(cached, Some(true));
    }

    #[test]
    fn test_roll_episode_errors() {
        let client = client();
        let mut rng = StdRng::seed_from_u64(3);

        let err = roll_episode(&client, "Nope", 1, 1, &mut rng, |_| {}).unwrap_err();
        assert!(matches!(
            err,
            RandomEpisodeError::Catalog(CatalogError::NotFound(_))
        ));
        assert_eq!(err.to_string(), "Could not find a show matching \"Nope\".");

        let err = roll_episode(&client, "Breaking Bad", 6, 9, &mut rng, |_| {}).unwrap_err();
        assert!(matches!(
            err,
            RandomEpisodeError::Selection(SelectionError::NoEpisodesInRange { .. })
        ));
    }
}
