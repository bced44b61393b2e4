//! Persistence of the technician roster.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::types::Technician;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

/// Storage backend of a [`crate::ScheduleStore`].
///
/// Saves replace the whole roster.
pub trait ScheduleRepository: Send + Sync {
    /// Returns `None` when nothing has been saved yet
    ///
    /// # Errors
    /// Returns `RepositoryError` if stored data cannot be read or decoded.
    fn load(&self) -> Result<Option<Vec<Technician>>, RepositoryError>;

    /// # Errors
    /// Returns `RepositoryError` if the roster cannot be written.
    fn save(&self, technicians: &[Technician]) -> Result<(), RepositoryError>;
}

/// In-memory repository. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    saved:      Arc<Mutex<Option<Vec<Technician>>>>,
    fail_saves: Arc<AtomicBool>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository that already holds `technicians`
    pub fn with_technicians(technicians: Vec<Technician>) -> Self {
        let repository = Self::default();
        if let Ok(mut saved) = repository.saved.lock() {
            *saved = Some(technicians);
        }
        repository
    }

    /// Makes every following save fail until switched off again
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of the last successful save
    pub fn saved(&self) -> Option<Vec<Technician>> {
        self.saved.lock().ok().and_then(|saved| saved.clone())
    }
}

impl ScheduleRepository for MemoryRepository {
    fn load(&self) -> Result<Option<Vec<Technician>>, RepositoryError> {
        let saved = self
            .saved
            .lock()
            .map_err(|_| RepositoryError::Unavailable("memory repository lock poisoned".to_owned()))?;
        Ok(saved.clone())
    }

    fn save(&self, technicians: &[Technician]) -> Result<(), RepositoryError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("saves disabled".to_owned()));
        }
        let mut saved = self
            .saved
            .lock()
            .map_err(|_| RepositoryError::Unavailable("memory repository lock poisoned".to_owned()))?;
        *saved = Some(technicians.to_vec());
        Ok(())
    }
}

/// Stores the roster as pretty-printed JSON in a single file
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

impl ScheduleRepository for JsonFileRepository {
    fn load(&self) -> Result<Option<Vec<Technician>>, RepositoryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved schedule");
                return Ok(None);
            },
            Err(err) => return Err(err.into()),
        };
        let technicians: Vec<Technician> = serde_json::from_str(&raw)?;
        debug!(path = %self.path.display(), technicians = technicians.len(), "loaded schedule");
        Ok(Some(technicians))
    }

    fn save(&self, technicians: &[Technician]) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(technicians)?;
        let staging = self.staging_path();
        fs::write(&staging, json)?;
        fs::rename(&staging, &self.path)?;
        debug!(path = %self.path.display(), technicians = technicians.len(), "saved schedule");
        Ok(())
    }
}
