//! This module provides a local cache for profile data
//!
//! The app around this crate remembers the user's display name and avatar between launches,
//! so that a screen has something to show before the first remote round-trip

use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The key the display name is cached under
pub const DISPLAY_NAME_KEY: &str = "displayName";
/// The key the profile image URI is cached under
pub const PROFILE_IMAGE_KEY: &str = "profileImage";

/// A string key-value store backed by a local JSON file
#[derive(Debug, PartialEq)]
pub struct ProfileCache {
    backing_file: PathBuf,
    data: CachedProfile,
}

#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
struct CachedProfile {
    entries: HashMap<String, String>,
}

impl ProfileCache {
    /// Initialize a cache from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let data = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            }
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self {
            backing_file: PathBuf::from(path),
            data,
        })
    }

    /// Initialize a cache with the default contents
    pub fn new(path: &Path) -> Self {
        Self {
            backing_file: PathBuf::from(path),
            data: CachedProfile::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.entries.get(key).map(|value| value.as_str())
    }

    /// Store a value, and persist it right away
    pub fn set<K: ToString, V: ToString>(&mut self, key: K, value: V) {
        self.data.entries.insert(key.to_string(), value.to_string());
        self.save_to_file();
    }

    /// Remove a value, and persist the removal
    pub fn remove(&mut self, key: &str) {
        if self.data.entries.remove(key).is_some() {
            self.save_to_file();
        }
    }

    /// Store the current cache to its backing file
    fn save_to_file(&mut self) {
        let path = &self.backing_file;
        let file = match std::fs::File::create(path) {
            Err(err) => {
                log::warn!("Unable to save file {:?}: {}", path, err);
                return;
            }
            Ok(f) => f,
        };

        if let Err(err) = serde_json::to_writer(file, &self.data) {
            log::warn!("Unable to serialize: {}", err);
            return;
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_profile_cache() {
        let cache_path = std::env::temp_dir().join("corkboard-profile-cache-test.json");

        let mut cache = ProfileCache::new(&cache_path);
        cache.set(DISPLAY_NAME_KEY, "Alice");
        cache.set(PROFILE_IMAGE_KEY, "file:///avatars/alice.png");

        let retrieved_cache = ProfileCache::from_file(&cache_path).unwrap();
        assert_eq!(cache, retrieved_cache);
        assert_eq!(retrieved_cache.get(DISPLAY_NAME_KEY), Some("Alice"));

        cache.remove(PROFILE_IMAGE_KEY);
        let retrieved_cache = ProfileCache::from_file(&cache_path).unwrap();
        assert_eq!(retrieved_cache.get(PROFILE_IMAGE_KEY), None);
    }
}
