//! Static series list
//!
//! The hardcoded set of shows offered for selection, with the number of
//! seasons each one has. Also the record type stored in the favorites list.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// A show that can be rolled: its name and how many seasons it has
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Display name, also used as the catalog query
    pub name: String,
    /// Number of seasons (at least 1)
    pub seasons: u32,
}

impl Series {
    /// Creates a new series reference
    pub fn new(name: impl Into<String>, seasons: u32) -> Self {
        Self {
            name: name.into(),
            seasons,
        }
    }
}

/// Entry of the built-in series list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownSeries {
    pub name: &'static str,
    pub seasons: u32,
}

impl From<&KnownSeries> for Series {
    fn from(known: &KnownSeries) -> Self {
        Series::new(known.name, known.seasons)
    }
}

const fn known(name: &'static str, seasons: u32) -> KnownSeries {
    KnownSeries { name, seasons }
}

/// Every series offered out of the box
pub const SERIES_LIST: &[KnownSeries] = &[
    known("30 Rock", 7),
    known("Arrested Development", 5),
    known("Avatar: The Last Airbender", 3),
    known("Better Call Saul", 6),
    known("Black Mirror", 6),
    known("Breaking Bad", 5),
    known("Brooklyn Nine-Nine", 8),
    known("Community", 6),
    known("Curb Your Enthusiasm", 12),
    known("Doctor Who", 13),
    known("Friends", 10),
    known("Futurama", 11),
    known("Game of Thrones", 8),
    known("House", 8),
    known("How I Met Your Mother", 9),
    known("It's Always Sunny in Philadelphia", 16),
    known("Lost", 6),
    known("Mad Men", 7),
    known("Modern Family", 11),
    known("Parks and Recreation", 7),
    known("Scrubs", 9),
    known("Seinfeld", 9),
    known("Star Trek: The Next Generation", 7),
    known("Stranger Things", 4),
    known("Succession", 4),
    known("The Office", 9),
    known("The Simpsons", 35),
    known("The Sopranos", 6),
    known("The West Wing", 7),
    known("The Wire", 5),
    known("The X-Files", 11),
    known("Twin Peaks", 3),
];

/// Minimum number of characters before a search term matches anything
const MIN_SEARCH_LEN: usize = 2;

/// Finds all series whose name contains `term`, ignoring case
///
/// Terms shorter than two characters (after trimming) match nothing.
pub fn search_series(term: &str) -> Vec<&'static KnownSeries> {
    let needle = term.trim().to_lowercase();
    if needle.chars().count() < MIN_SEARCH_LEN {
        return Vec::new();
    }

    SERIES_LIST
        .iter()
        .filter(|series| series.name.to_lowercase().contains(&needle))
        .collect()
}

/// Looks up a series by its exact name, ignoring case
pub fn find_series(name: &str) -> Option<&'static KnownSeries> {
    let name = name.trim();
    SERIES_LIST
        .iter()
        .find(|series| series.name.eq_ignore_ascii_case(name))
}

/// Picks one series uniformly at random ("surprise me")
pub fn random_series<R>(rng: &mut R) -> &'static KnownSeries
where
    R: Rng + ?Sized,
{
    // the list is a non-empty constant
    SERIES_LIST.choose(rng).unwrap_or(&SERIES_LIST[0])
}
