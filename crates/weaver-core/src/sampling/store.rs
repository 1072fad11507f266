use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::history::UsageHistory;

/// Persistence seam for pick history so the picker can run against memory or disk.
pub trait HistoryStore: Send + Sync {
    fn load(&self) -> Result<UsageHistory, HistoryError>;
    fn save(&self, history: &UsageHistory) -> Result<(), HistoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history file {path} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("history file {path} is not valid JSON: {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("history store unavailable: {0}")]
    Unavailable(String),
}

/// JSON document on disk. A missing file reads as empty history.
#[derive(Debug, Clone)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HistoryStore for JsonFileHistoryStore {
    fn load(&self) -> Result<UsageHistory, HistoryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(UsageHistory::default()),
            Err(err) => return Err(self.io_error(err)),
        };

        if raw.trim().is_empty() {
            return Ok(UsageHistory::default());
        }

        serde_json::from_str(&raw).map_err(|source| HistoryError::Format {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes a sibling temp file, syncs it, then renames it over the target.
    fn save(&self, history: &UsageHistory) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let payload = serde_json::to_vec_pretty(history).map_err(|source| HistoryError::Format {
            path: self.path.clone(),
            source,
        })?;

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let mut file = File::create(&tmp_path).map_err(|err| self.io_error(err))?;
        file.write_all(&payload).map_err(|err| self.io_error(err))?;
        file.sync_all().map_err(|err| self.io_error(err))?;
        drop(file);

        fs::rename(&tmp_path, &self.path).map_err(|err| self.io_error(err))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    history: Mutex<UsageHistory>,
}

impl InMemoryHistoryStore {
    pub fn with_history(history: UsageHistory) -> Self {
        Self {
            history: Mutex::new(history),
        }
    }

    pub fn snapshot(&self) -> UsageHistory {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn load(&self) -> Result<UsageHistory, HistoryError> {
        Ok(self.snapshot())
    }

    fn save(&self, history: &UsageHistory) -> Result<(), HistoryError> {
        *self.history.lock().unwrap_or_else(PoisonError::into_inner) = history.clone();
        Ok(())
    }
}
