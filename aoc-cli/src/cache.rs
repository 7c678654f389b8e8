//! On-disk cache of downloaded puzzle inputs

use crate::error::CacheError;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Inputs stored as `{base_dir}/{user_id}/{year}_day{DD}.txt`
///
/// Files hold the text exactly as downloaded.
pub struct InputCache {
    user_dir: PathBuf,
}

impl InputCache {
    pub fn new(base_dir: PathBuf, user_id: u64) -> Self {
        Self {
            user_dir: base_dir.join(user_id.to_string()),
        }
    }

    pub fn cache_path(&self, year: u16, day: u8) -> PathBuf {
        self.user_dir.join(format!("{year}_day{day:02}.txt"))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.cache_path(year, day).is_file()
    }

    /// Cached input, `None` on a miss
    pub fn get(&self, year: u16, day: u8) -> Result<Option<String>, CacheError> {
        let path = self.cache_path(year, day);
        if !path.is_file() {
            debug!(path = %path.display(), "cache miss");
            return Ok(None);
        }
        debug!(path = %path.display(), "cache hit");
        Ok(Some(fs::read_to_string(&path)?))
    }

    pub fn put(&self, year: u16, day: u8, input: &str) -> Result<(), CacheError> {
        fs::create_dir_all(&self.user_dir).map_err(|e| {
            CacheError::DirCreation(format!("{}: {e}", self.user_dir.display()))
        })?;
        let path = self.cache_path(year, day);
        fs::write(&path, input)?;
        debug!(path = %path.display(), bytes = input.len(), "cached input");
        Ok(())
    }
}
