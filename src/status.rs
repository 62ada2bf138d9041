/*
 *  status.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  Persisted last-rendered state, keeps e-ink refreshes to a minimum
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::schedule::DisplayState;

pub const WEEKEND_TOKEN: &str = "weekend";
pub const NOT_WORKING_TOKEN: &str = "not working";
pub const WORKING_TOKEN: &str = "working";

/// Errors reading or writing the status marker.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("status file {} does not exist (create it, or run once with --init-status)", .0.display())]
    Missing(PathBuf),
    #[error("failed to read status file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write status file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// On-disk token for a display state.
pub fn token_for(state: DisplayState) -> &'static str {
    match state {
        DisplayState::Weekend => WEEKEND_TOKEN,
        DisplayState::OffHours => NOT_WORKING_TOKEN,
        DisplayState::Working => WORKING_TOKEN,
    }
}

/// Inverse of [`token_for`]; unknown or empty markers map to `None`.
pub fn state_for(token: &str) -> Option<DisplayState> {
    match token {
        WEEKEND_TOKEN => Some(DisplayState::Weekend),
        NOT_WORKING_TOKEN => Some(DisplayState::OffHours),
        WORKING_TOKEN => Some(DisplayState::Working),
        _ => None,
    }
}

/// Whether a freshly classified state needs drawing.
///
/// Weekend and off-hours screens are static so they are drawn once per
/// span. Working time redraws every run so the phrase can move on.
pub fn should_render(current: DisplayState, last_persisted: &str) -> bool {
    match current {
        DisplayState::Working => true,
        _ => token_for(current) != last_persisted,
    }
}

/// Somewhere to keep the last rendered token between runs.
pub trait StatusStore {
    fn load(&self) -> Result<String, StorageError>;
    fn save(&mut self, token: &str) -> Result<(), StorageError>;
}

/// Plain-text marker file holding a single token.
#[derive(Debug, Clone)]
pub struct FileStatusStore {
    path: PathBuf,
}

impl FileStatusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty marker (and its directory) when none exists yet.
    ///
    /// An empty token matches no state, so the next run always draws.
    pub fn ensure_exists(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            return Ok(());
        }
        let write_err = |source| StorageError::Write { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, "").map_err(write_err)?;
        info!("Created status file {}", self.path.display());
        Ok(())
    }
}

impl StatusStore for FileStatusStore {
    fn load(&self) -> Result<String, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(s) => Ok(s.trim().to_string()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StorageError::Missing(self.path.clone()))
            }
            Err(source) => Err(StorageError::Read { path: self.path.clone(), source }),
        }
    }

    fn save(&mut self, token: &str) -> Result<(), StorageError> {
        fs::write(&self.path, token)
            .map_err(|source| StorageError::Write { path: self.path.clone(), source })
    }
}

/// In-memory store, counts writes so callers can assert on them.
#[derive(Debug, Clone, Default)]
pub struct MemoryStatusStore {
    pub token: Option<String>,
    pub writes: usize,
}

impl MemoryStatusStore {
    pub fn with_token(token: &str) -> Self {
        Self { token: Some(token.to_string()), writes: 0 }
    }
}

impl StatusStore for MemoryStatusStore {
    fn load(&self) -> Result<String, StorageError> {
        self.token
            .clone()
            .ok_or_else(|| StorageError::Missing(PathBuf::from("<memory>")))
    }

    fn save(&mut self, token: &str) -> Result<(), StorageError> {
        self.token = Some(token.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Read-decide-write gate in front of the panel.
///
/// The marker is read once when the gate opens. Runs are one-shot and
/// sequential; a scheduler that overlaps runs must serialise around
/// [`StatusGate::open`] .. [`StatusGate::admit`].
#[derive(Debug)]
pub struct StatusGate<S: StatusStore> {
    store: S,
    last: String,
}

impl<S: StatusStore> StatusGate<S> {
    pub fn open(store: S) -> Result<Self, StorageError> {
        let last = store.load()?;
        debug!("Last rendered status: {:?}", last);
        Ok(Self { store, last })
    }

    pub fn last_token(&self) -> &str {
        &self.last
    }

    pub fn should_render(&self, state: DisplayState) -> bool {
        should_render(state, &self.last)
    }

    /// Decide whether to draw `state`, persisting its token first if so.
    pub fn admit(&mut self, state: DisplayState) -> Result<bool, StorageError> {
        if !self.should_render(state) {
            return Ok(false);
        }
        self.record(state)?;
        Ok(true)
    }

    /// Persist the token for `state` unless it is already stored.
    pub fn record(&mut self, state: DisplayState) -> Result<(), StorageError> {
        let token = token_for(state);
        if self.last != token {
            self.store.save(token)?;
            info!("Status changed {:?} -> {:?}", self.last, token);
            self.last = token.to_string();
        }
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        for state in [DisplayState::Weekend, DisplayState::OffHours, DisplayState::Working] {
            assert_eq!(state_for(token_for(state)), Some(state));
        }
        assert_eq!(token_for(DisplayState::OffHours), "not working");
        assert_eq!(state_for(""), None);
        assert_eq!(state_for("holiday"), None);
    }

    #[test]
    fn test_static_states_render_once() {
        assert!(should_render(DisplayState::Weekend, "working"));
        assert!(!should_render(DisplayState::Weekend, "weekend"));
        assert!(should_render(DisplayState::OffHours, "weekend"));
        assert!(!should_render(DisplayState::OffHours, "not working"));
        assert!(should_render(DisplayState::OffHours, ""));
    }

    #[test]
    fn test_working_always_renders() {
        assert!(should_render(DisplayState::Working, "working"));
        assert!(should_render(DisplayState::Working, "not working"));
    }

    #[test]
    fn test_gate_writes_on_transition_only() {
        let mut gate = StatusGate::open(MemoryStatusStore::with_token("working")).unwrap();

        assert!(gate.admit(DisplayState::OffHours).unwrap());
        assert_eq!(gate.last_token(), "not working");
        assert!(!gate.admit(DisplayState::OffHours).unwrap());

        let store = gate.into_store();
        assert_eq!(store.writes, 1);
        assert_eq!(store.token.as_deref(), Some("not working"));
    }

    #[test]
    fn test_gate_working_writes_on_entry() {
        let mut gate = StatusGate::open(MemoryStatusStore::with_token("not working")).unwrap();
        assert!(gate.admit(DisplayState::Working).unwrap());
        assert!(gate.admit(DisplayState::Working).unwrap());
        assert!(gate.admit(DisplayState::Working).unwrap());

        let store = gate.into_store();
        assert_eq!(store.writes, 1);
        assert_eq!(store.token.as_deref(), Some("working"));
    }

    #[test]
    fn test_gate_missing_marker_fails() {
        let err = StatusGate::open(MemoryStatusStore::default()).unwrap_err();
        assert!(matches!(err, StorageError::Missing(_)));
    }

    #[test]
    fn test_file_store_missing_and_init() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("status");
        let mut store = FileStatusStore::new(&path);

        assert!(matches!(store.load(), Err(StorageError::Missing(_))));

        store.ensure_exists().unwrap();
        assert_eq!(store.load().unwrap(), "");

        store.save("weekend").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "weekend");
        assert_eq!(store.load().unwrap(), "weekend");
    }

    #[test]
    fn test_file_store_trims_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status");
        fs::write(&path, "not working\n").unwrap();
        assert_eq!(FileStatusStore::new(&path).load().unwrap(), "not working");
    }
}
