use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::domain::{JournalEntry, Profile};

/// Storage abstraction so the journal service can be exercised in isolation.
pub trait JournalRepository: Send + Sync {
    fn append(&self, entry: &JournalEntry) -> Result<(), RepositoryError>;
    fn entries(&self) -> Result<Vec<JournalEntry>, RepositoryError>;
    fn load_profile(&self) -> Result<Option<Profile>, RepositoryError>;
    fn save_profile(&self, profile: &Profile) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("journal file {path} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("journal file {path} has a malformed record at line {line}: {source}")]
    Format {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },
}

/// `profile.json` plus an append-only `entries.jsonl` under one data directory.
#[derive(Debug, Clone)]
pub struct FileJournal {
    profile_path: PathBuf,
    entries_path: PathBuf,
}

impl FileJournal {
    pub fn new(profile_path: impl Into<PathBuf>, entries_path: impl Into<PathBuf>) -> Self {
        Self {
            profile_path: profile_path.into(),
            entries_path: entries_path.into(),
        }
    }

    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self::new(data_dir.join("profile.json"), data_dir.join("entries.jsonl"))
    }

    fn ensure_parent(path: &Path) -> Result<(), RepositoryError> {
        match path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            Some(parent) => fs::create_dir_all(parent).map_err(|source| RepositoryError::Io {
                path: parent.to_path_buf(),
                source,
            }),
            None => Ok(()),
        }
    }
}

impl JournalRepository for FileJournal {
    fn append(&self, entry: &JournalEntry) -> Result<(), RepositoryError> {
        Self::ensure_parent(&self.entries_path)?;
        let io_error = |source| RepositoryError::Io {
            path: self.entries_path.clone(),
            source,
        };

        let mut line = serde_json::to_string(entry).map_err(|source| RepositoryError::Format {
            path: self.entries_path.clone(),
            line: 0,
            source,
        })?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.entries_path)
            .map_err(io_error)?;
        file.write_all(line.as_bytes()).map_err(io_error)?;
        file.flush().map_err(io_error)?;
        file.sync_data().map_err(io_error)
    }

    fn entries(&self) -> Result<Vec<JournalEntry>, RepositoryError> {
        let file = match File::open(&self.entries_path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(RepositoryError::Io {
                    path: self.entries_path.clone(),
                    source,
                })
            }
        };

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| RepositoryError::Io {
                path: self.entries_path.clone(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|source| RepositoryError::Format {
                path: self.entries_path.clone(),
                line: index + 1,
                source,
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    fn load_profile(&self) -> Result<Option<Profile>, RepositoryError> {
        let raw = match fs::read_to_string(&self.profile_path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(RepositoryError::Io {
                    path: self.profile_path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| RepositoryError::Format {
                path: self.profile_path.clone(),
                line: source.line(),
                source,
            })
    }

    fn save_profile(&self, profile: &Profile) -> Result<(), RepositoryError> {
        Self::ensure_parent(&self.profile_path)?;
        let payload =
            serde_json::to_string_pretty(profile).map_err(|source| RepositoryError::Format {
                path: self.profile_path.clone(),
                line: 0,
                source,
            })?;
        fs::write(&self.profile_path, payload).map_err(|source| RepositoryError::Io {
            path: self.profile_path.clone(),
            source,
        })
    }
}

#[derive(Debug, Default)]
pub struct InMemoryJournal {
    entries: Mutex<Vec<JournalEntry>>,
    profile: Mutex<Option<Profile>>,
}

impl JournalRepository for InMemoryJournal {
    fn append(&self, entry: &JournalEntry) -> Result<(), RepositoryError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.clone());
        Ok(())
    }

    fn entries(&self) -> Result<Vec<JournalEntry>, RepositoryError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn load_profile(&self) -> Result<Option<Profile>, RepositoryError> {
        Ok(self
            .profile
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save_profile(&self, profile: &Profile) -> Result<(), RepositoryError> {
        *self.profile.lock().unwrap_or_else(PoisonError::into_inner) = Some(profile.clone());
        Ok(())
    }
}
