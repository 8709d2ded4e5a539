use crate::error::StateError;
use crate::selection::{PersistedState, Selection};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Where selections live between runs.
///
/// `load` never fails: a store that cannot produce a selection hands back an
/// empty one and logs why. `save` reports failures and lets the caller decide.
pub trait StateStore {
    fn load(&self) -> Selection;
    fn save(&self, selection: &Selection) -> Result<(), StateError>;
}

/// The JSON state file on disk.
#[derive(Debug, Clone)]
pub struct JsonStateFile {
    path: PathBuf,
    /// Directory that relative entries in the file are resolved against.
    base: PathBuf,
}

impl JsonStateFile {
    pub fn new(path: impl Into<PathBuf>, base: impl Into<PathBuf>) -> Self {
        JsonStateFile {
            path: path.into(),
            base: base.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_load(&self) -> Result<Option<Selection>, StateError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StateError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let state: PersistedState =
            serde_json::from_str(&content).map_err(|source| StateError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(Selection::from_persisted(state, &self.base)))
    }

    fn write_err(&self, source: io::Error) -> StateError {
        StateError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl StateStore for JsonStateFile {
    fn load(&self) -> Selection {
        match self.try_load() {
            Ok(Some(selection)) => {
                debug!(
                    path = %self.path.display(),
                    dirs = selection.dirs.len(),
                    files = selection.files.len(),
                    "loaded saved selection"
                );
                selection
            }
            Ok(None) => {
                debug!(path = %self.path.display(), "no state file yet");
                Selection::default()
            }
            Err(e) => {
                warn!("{e}; starting with an empty selection");
                Selection::default()
            }
        }
    }

    fn save(&self, selection: &Selection) -> Result<(), StateError> {
        let mut json = serde_json::to_string_pretty(&selection.to_persisted())?;
        json.push('\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| self.write_err(e))?;

        // Write beside the target and rename over it, so a crash mid-write
        // leaves the previous state intact.
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.write_err(e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.flush())
            .map_err(|e| self.write_err(e))?;
        tmp.persist(&self.path).map_err(|e| self.write_err(e.error))?;

        debug!(path = %self.path.display(), "saved selection");
        Ok(())
    }
}

/// In-memory store for driving a whole session in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub initial: Selection,
    pub saved: std::cell::RefCell<Option<Selection>>,
}

#[cfg(test)]
impl StateStore for MemoryStore {
    fn load(&self) -> Selection {
        self.initial.clone()
    }

    fn save(&self, selection: &Selection) -> Result<(), StateError> {
        *self.saved.borrow_mut() = Some(selection.clone());
        Ok(())
    }
}
