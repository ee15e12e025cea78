//! Durable local high score storage
//!
//! A small JSON document on disk holding the best score under the
//! `"highScore"` key. Writes go through a temp file and a rename so a crash
//! mid-write never leaves a truncated document behind.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// On-disk document. The field name must stay equal to
/// [`crate::consts::HIGH_SCORE_KEY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    #[serde(rename = "highScore")]
    pub high_score: u64,
}

/// High score file store
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored high score; `None` when nothing has been saved yet
    pub fn load(&self) -> Result<Option<u64>, StorageError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record: HighScoreRecord = serde_json::from_str(&json)?;
        Ok(Some(record.high_score))
    }

    pub fn save(&self, high_score: u64) -> Result<(), StorageError> {
        let json = serde_json::to_string(&HighScoreRecord { high_score })?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        log::info!("High score {} saved to {}", high_score, self.path.display());
        Ok(())
    }
}

/// Unique temp file path, removed on drop even when a test fails
#[cfg(test)]
pub(crate) struct TempPath(PathBuf);

#[cfg(test)]
impl TempPath {
    pub(crate) fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "catch-fall-{}-{}.json",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        Self(path)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
impl Drop for TempPath {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
        let _ = std::fs::remove_file(self.0.with_extension("tmp"));
    }
}
