// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Data file access.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;
use crate::state::ApplicationState;

use super::PersistedState;

/// Result of reading the data file.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The file was read and decoded.
    Loaded(Box<ApplicationState>),
    /// There is no data file yet.
    NotFound,
    /// The file was written by an incompatible schema version.
    Incompatible {
        /// The version tag found, if any.
        found: Option<u64>,
    },
}

/// Reads and writes the data file.
///
/// # Examples
///
/// ```
/// use casectl::persistence::{LoadOutcome, PersistedState, StateStore};
/// use casectl::state::ApplicationState;
/// use casectl::types::Color;
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = StateStore::new(dir.path().join("state.json"));
/// assert!(matches!(store.load().unwrap(), LoadOutcome::NotFound));
///
/// let mut state = ApplicationState::new();
/// state.set_lcd_color(Color::new(0, 0, 255));
/// store.save(&PersistedState::from(&state)).unwrap();
///
/// match store.load().unwrap() {
///     LoadOutcome::Loaded(loaded) => assert_eq!(*loaded, state),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Creates a store for the data file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the data file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Reads the data file.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Io` if the file exists but cannot be read,
    /// and `PersistenceError::Corrupt` if it cannot be decoded.
    pub fn load(&self) -> Result<LoadOutcome, PersistenceError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LoadOutcome::NotFound),
            Err(e) => return Err(self.io_error(e)),
        };

        match PersistedState::decode(&contents) {
            Ok(persisted) => Ok(LoadOutcome::Loaded(Box::new(persisted.into()))),
            Err(PersistenceError::IncompatibleSchema { found, .. }) => {
                Ok(LoadOutcome::Incompatible { found })
            }
            Err(e) => Err(e),
        }
    }

    /// Reads the data file, falling back to the default state.
    ///
    /// Every fallback other than a missing file is logged as a warning and
    /// returned alongside the default state.
    #[must_use]
    pub fn load_or_default(&self) -> (ApplicationState, Option<PersistenceError>) {
        let error = match self.load() {
            Ok(LoadOutcome::Loaded(state)) => {
                tracing::info!(path = %self.path.display(), "Loaded saved state");
                return (*state, None);
            }
            Ok(LoadOutcome::NotFound) => {
                tracing::info!(path = %self.path.display(), "No saved state, using defaults");
                return (ApplicationState::default(), None);
            }
            Ok(LoadOutcome::Incompatible { found }) => PersistenceError::IncompatibleSchema {
                found,
                expected: super::SCHEMA_VERSION,
            },
            Err(e) => e,
        };

        tracing::warn!(
            path = %self.path.display(),
            error = %error,
            "Could not load saved state, using defaults"
        );
        (ApplicationState::default(), Some(error))
    }

    /// Writes `state` to the data file.
    ///
    /// The file is written next to its destination and renamed over it, so
    /// a reader never sees a partial file.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Io` if a directory or file cannot be
    /// written.
    pub fn save(&self, state: &PersistedState) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let contents = state.encode()?;
        let temp = self.temp_path();
        fs::write(&temp, contents).map_err(|e| self.io_error(e))?;
        fs::rename(&temp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), "Saved state");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
