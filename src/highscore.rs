use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Persistent storage for the best score achieved so far
pub(crate) trait ScoreStore: fmt::Debug {
    /// Fetch the stored high score.  A store that has never been written to
    /// reports zero.
    fn load(&mut self) -> Result<u32, LoadError>;

    /// Replace the stored high score with `score`
    fn save(&mut self, score: u32) -> Result<(), SaveError>;
}

/// A high score kept as a small JSON document on disk
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FileScoreStore {
    /// `None` if no path was configured and the default path could not be
    /// determined
    path: Option<PathBuf>,
}

impl FileScoreStore {
    pub(crate) fn new(path: PathBuf) -> FileScoreStore {
        FileScoreStore { path: Some(path) }
    }

    /// Create a store backed by the file at [`FileScoreStore::default_path()`]
    pub(crate) fn at_default_path() -> FileScoreStore {
        FileScoreStore {
            path: FileScoreStore::default_path(),
        }
    }

    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("arcsnake").join("highscore.json"))
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&mut self) -> Result<u32, LoadError> {
        let path = self.path.as_deref().ok_or_else(LoadError::no_path)?;
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice::<HighScoreFile>(&src)
            .map(|hsf| hsf.high_score)
            .map_err(LoadError::deserialize)
    }

    fn save(&mut self, score: u32) -> Result<(), SaveError> {
        let path = self.path.as_deref().ok_or_else(SaveError::no_path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(&HighScoreFile { high_score: score })
            .map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

/// A high score that only lasts as long as the process, for when saving to
/// disk is disabled
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryScoreStore {
    score: u32,
}

impl ScoreStore for MemoryScoreStore {
    fn load(&mut self) -> Result<u32, LoadError> {
        Ok(self.score)
    }

    fn save(&mut self, score: u32) -> Result<(), SaveError> {
        self.score = score;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct HighScoreFile {
    high_score: u32,
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    pub(crate) fn no_path() -> Self {
        SaveError(SaveErrorSource::NoPath)
    }

    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    pub(crate) fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high score")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high score file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    pub(crate) fn no_path() -> Self {
        LoadError(LoadErrorSource::NoPath)
    }

    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read high score file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high score")]
    Deserialize(#[source] serde_json::Error),
}
