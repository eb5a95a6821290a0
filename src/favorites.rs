//! Favorites storage module
//!
//! This module persists the user's favorite series as a single JSON blob in
//! the system's standard data directory. The whole list is rewritten on
//! every change.

use crate::series::Series;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed key the favorites blob is stored under
pub const FAVORITES_KEY: &str = "randomEpisode-favorites";

/// Errors that can occur during favorites operations
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// Failed to determine data directory location
    #[error("Failed to determine data directory location")]
    DataDirectoryNotFound,

    /// Failed to create or access the data directory
    #[error("Failed to create data directory at {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read the stored favorites
    #[error("Failed to read favorites file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the favorites
    #[error("Failed to write favorites file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The stored favorites are not valid JSON
    #[error("Failed to parse favorites file {path}: {source}")]
    DeserializationFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Failed to serialize the favorites
    #[error("Failed to serialize favorites: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// The user's list of favorite series, backed by a JSON file
#[derive(Debug)]
pub struct FavoritesStore {
    /// The file the favorites blob lives in
    file_path: PathBuf,
    /// Favorites in insertion order
    favorites: Vec<Series>,
}

impl FavoritesStore {
    /// Opens the favorites in the system's standard data directory
    ///
    /// The directory is created if it doesn't exist. A missing favorites
    /// file is an empty list.
    pub fn open() -> Result<Self, FavoritesError> {
        let proj_dirs = directories::ProjectDirs::from("de", "westhoffswelt", "random-episode")
            .ok_or(FavoritesError::DataDirectoryNotFound)?;

        Self::open_at(proj_dirs.data_dir())
    }

    /// Opens the favorites stored in the given directory
    pub fn open_at(dir: &Path) -> Result<Self, FavoritesError> {
        fs::create_dir_all(dir).map_err(|e| FavoritesError::DirectoryCreationFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let file_path = dir.join(format!("{}.json", sanitize_key(FAVORITES_KEY)));
        let favorites = load(&file_path)?;

        Ok(Self {
            file_path,
            favorites,
        })
    }

    /// Returns the path of the favorites file
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Returns all favorites in the order they were added
    pub fn list(&self) -> &[Series] {
        &self.favorites
    }

    /// Returns true if a favorite with exactly this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.favorites.iter().any(|favorite| favorite.name == name)
    }

    /// Adds a series to the favorites and persists the list
    ///
    /// Returns `false` without touching the file if a favorite with the same
    /// name already exists. The in-memory list only changes once the file
    /// has been written.
    pub fn add(&mut self, series: Series) -> Result<bool, FavoritesError> {
        if self.contains(&series.name) {
            return Ok(false);
        }

        let mut favorites = self.favorites.clone();
        favorites.push(series);
        self.replace(favorites)?;
        Ok(true)
    }

    /// Removes the favorite with the given name and persists the list
    ///
    /// Returns `false` if no such favorite exists.
    pub fn remove(&mut self, name: &str) -> Result<bool, FavoritesError> {
        if !self.contains(name) {
            return Ok(false);
        }

        let favorites = self
            .favorites
            .iter()
            .filter(|favorite| favorite.name != name)
            .cloned()
            .collect();
        self.replace(favorites)?;
        Ok(true)
    }

    /// Writes `favorites` to disk and adopts them on success
    fn replace(&mut self, favorites: Vec<Series>) -> Result<(), FavoritesError> {
        let content = serde_json::to_string_pretty(&favorites)?;

        fs::write(&self.file_path, content).map_err(|e| FavoritesError::WriteFailed {
            path: self.file_path.clone(),
            source: e,
        })?;

        self.favorites = favorites;
        Ok(())
    }
}

fn load(file_path: &Path) -> Result<Vec<Series>, FavoritesError> {
    if !file_path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(file_path).map_err(|e| FavoritesError::ReadFailed {
        path: file_path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| FavoritesError::DeserializationFailed {
        path: file_path.to_path_buf(),
        source: e,
    })
}

/// Sanitizes a key for use as a file name
///
/// Converts to lowercase and replaces all characters that are not
/// a-z, 0-9, or hyphen with underscores.
fn sanitize_key(key: &str) -> String {
    key.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key(FAVORITES_KEY), "randomepisode-favorites");
        assert_eq!(sanitize_key("With Spaces"), "with_spaces");
        assert_eq!(sanitize_key("Special!@#"), "special___");
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FavoritesStore::open_at(dir.path()).unwrap();

        assert!(store.list().is_empty());
        assert!(!store.file_path().exists());
        assert!(
            store
                .file_path()
                .ends_with("randomepisode-favorites.json")
        );
    }

    #[test]
    fn test_add_is_deduplicated_by_name() {
        let dir = TempDir::new().unwrap();
        let mut store = FavoritesStore::open_at(dir.path()).unwrap();

        assert!(store.add(Series::new("Breaking Bad", 5)).unwrap());
        assert!(!store.add(Series::new("Breaking Bad", 5)).unwrap());
        assert!(store.add(Series::new("The Wire", 5)).unwrap());

        assert_eq!(store.list().len(), 2);
        assert!(store.contains("Breaking Bad"));
        assert!(!store.contains("breaking bad"));
    }

    #[test]
    fn test_changes_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = FavoritesStore::open_at(dir.path()).unwrap();
            store.add(Series::new("Lost", 6)).unwrap();
            store.add(Series::new("Friends", 10)).unwrap();
            assert!(store.remove("Lost").unwrap());
            assert!(!store.remove("Lost").unwrap());
        }

        let store = FavoritesStore::open_at(dir.path()).unwrap();
        assert_eq!(store.list(), &[Series::new("Friends", 10)]);
    }

    #[test]
    fn test_blob_format() {
        let dir = TempDir::new().unwrap();
        let mut store = FavoritesStore::open_at(dir.path()).unwrap();
        store.add(Series::new("Seinfeld", 9)).unwrap();

        let content = fs::read_to_string(store.file_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value, serde_json::json!([{"name": "Seinfeld", "seasons": 9}]));
    }

    #[test]
    fn test_failed_add_leaves_list_untouched() {
        let dir = TempDir::new().unwrap();
        let mut store = FavoritesStore::open_at(dir.path()).unwrap();
        fs::create_dir(store.file_path()).unwrap();

        let result = store.add(Series::new("Lost", 6));
        assert!(matches!(result, Err(FavoritesError::WriteFailed { .. })));
        assert!(!store.contains("Lost"));

        fs::remove_dir(store.file_path()).unwrap();
        assert!(store.add(Series::new("Lost", 6)).unwrap());

        let reopened = FavoritesStore::open_at(dir.path()).unwrap();
        assert_eq!(reopened.list(), &[Series::new("Lost", 6)]);
    }

    #[test]
    fn test_failed_remove_keeps_favorite() {
        let dir = TempDir::new().unwrap();
        let mut store = FavoritesStore::open_at(dir.path()).unwrap();
        store.add(Series::new("Scrubs", 9)).unwrap();

        fs::remove_file(store.file_path()).unwrap();
        fs::create_dir(store.file_path()).unwrap();

        let result = store.remove("Scrubs");
        assert!(matches!(result, Err(FavoritesError::WriteFailed { .. })));
        assert!(store.contains("Scrubs"));

        fs::remove_dir(store.file_path()).unwrap();
        assert!(store.remove("Scrubs").unwrap());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("randomepisode-favorites.json"), "not json").unwrap();

        let result = FavoritesStore::open_at(dir.path());
        assert!(matches!(
            result,
            Err(FavoritesError::DeserializationFailed { .. })
        ));
    }
}
