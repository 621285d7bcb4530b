//! Save files.
//!
//! The whole simulation is stored as one JSON envelope
//! `{version, timestamp, day, characters, logs}`. The same format is used for
//! the automatic snapshot kept in the data directory and for exported files.
//!
//! Reading has two entry points with shared validation:
//! - [`LoadMode::AutoLoad`] demands `characters`, `logs` and a non-zero `day`
//! - [`LoadMode::Import`] demands only `characters`; `day` falls back to 1 and
//!   `logs` to an empty history

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PersistenceError;
use crate::ids::IdGenerator;
use crate::relationship::normalize_relationships;
use crate::types::{Character, LogEntry, LogKind, SimulationState};

pub const SAVE_FORMAT_VERSION: u32 = 1;

/// The persisted snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    /// Capture time, epoch milliseconds
    pub timestamp: i64,
    pub day: u32,
    pub characters: Vec<Character>,
    pub logs: Vec<LogEntry>,
}

impl SaveData {
    pub fn capture(state: &SimulationState) -> Self {
        Self::captured_at(state, Utc::now().timestamp_millis())
    }

    pub fn captured_at(state: &SimulationState, timestamp: i64) -> Self {
        Self {
            version: SAVE_FORMAT_VERSION,
            timestamp,
            day: state.day,
            characters: state.characters.clone(),
            logs: state.logs.clone(),
        }
    }

    pub fn into_state(self) -> SimulationState {
        SimulationState {
            day: self.day,
            characters: self.characters,
            logs: self.logs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    AutoLoad,
    Import,
}

pub fn encode(state: &SimulationState) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(&SaveData::capture(state))?)
}

pub fn decode(text: &str, mode: LoadMode) -> Result<SimulationState, PersistenceError> {
    let value: Value = serde_json::from_str(text)?;
    let envelope = value.as_object().ok_or(PersistenceError::NotAnObject)?;

    check_version(envelope)?;

    let characters = match envelope.get("characters") {
        Some(list @ Value::Array(_)) => list.clone(),
        _ => return Err(PersistenceError::MissingCharacters),
    };

    let logs = match (envelope.get("logs"), mode) {
        (Some(list @ Value::Array(_)), _) => serde_json::from_value(list.clone())?,
        (None | Some(Value::Null), LoadMode::Import) => Vec::new(),
        _ => return Err(PersistenceError::MissingLogs),
    };

    let day = match (stored_day(envelope), mode) {
        (Some(day), _) => day,
        (None, LoadMode::Import) => 1,
        (None, LoadMode::AutoLoad) => return Err(PersistenceError::MissingDay),
    };

    let mut characters: Vec<Character> = serde_json::from_value(characters)?;
    normalize_relationships(&mut characters);

    Ok(SimulationState {
        day,
        characters,
        logs,
    })
}

fn check_version(envelope: &Map<String, Value>) -> Result<(), PersistenceError> {
    match envelope.get("version").and_then(Value::as_u64) {
        Some(found) if found > u64::from(SAVE_FORMAT_VERSION) => {
            Err(PersistenceError::UnsupportedVersion {
                found,
                supported: SAVE_FORMAT_VERSION,
            })
        }
        _ => Ok(()),
    }
}

/// A zero or absent day counts as missing
fn stored_day(envelope: &Map<String, Value>) -> Option<u32> {
    envelope
        .get("day")
        .and_then(Value::as_u64)
        .and_then(|day| u32::try_from(day).ok())
        .filter(|day| *day > 0)
}

/// Decodes a user-supplied file and appends the confirmation entry
pub fn import_state(text: &str, ids: &mut dyn IdGenerator) -> Result<SimulationState, PersistenceError> {
    let mut state = decode(text, LoadMode::Import)?;
    state.logs.push(LogEntry::new(
        ids.next_id(),
        state.day,
        "💾 External save file loaded successfully.",
        LogKind::Routine,
    ));
    Ok(state)
}

/// `office_sim_day_{day}_{YYYY-MM-DD}.json`
pub fn export_file_name(day: u32, date: NaiveDate) -> String {
    format!("office_sim_day_{}_{}.json", day, date.format("%Y-%m-%d"))
}

/// Save files on disk: the autosave slot plus an export directory
#[derive(Debug, Clone)]
pub struct SaveStore {
    autosave_path: PathBuf,
    export_dir: PathBuf,
}

impl SaveStore {
    pub fn new(autosave_path: impl AsRef<Path>, export_dir: impl AsRef<Path>) -> Self {
        Self {
            autosave_path: autosave_path.as_ref().to_path_buf(),
            export_dir: export_dir.as_ref().to_path_buf(),
        }
    }

    pub fn autosave_path(&self) -> &Path {
        &self.autosave_path
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Reads the autosave slot. Failures are reported to the operator log only.
    pub fn load_autosave(&self) -> Option<SimulationState> {
        let text = match fs::read_to_string(&self.autosave_path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No autosave at {:?}", self.autosave_path);
                return None;
            }
            Err(e) => {
                log::warn!("Failed to read autosave {:?}: {}", self.autosave_path, e);
                return None;
            }
        };

        match decode(&text, LoadMode::AutoLoad) {
            Ok(state) => {
                log::info!("💾 Auto-loaded save data (day {})", state.day);
                Some(state)
            }
            Err(e) => {
                log::warn!("Ignoring autosave {:?}: {}", self.autosave_path, e);
                None
            }
        }
    }

    /// Writes the autosave slot through a temporary file and a rename
    pub fn save_autosave(&self, state: &SimulationState) -> Result<(), PersistenceError> {
        if let Some(dir) = self.autosave_path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.autosave_path.with_extension("json.tmp");
        fs::write(&tmp, encode(state)?)?;
        fs::rename(&tmp, &self.autosave_path)?;
        log::debug!("Autosaved day {} to {:?}", state.day, self.autosave_path);
        Ok(())
    }

    /// Writes a dated export file into the export directory and returns its path
    pub fn export(&self, state: &SimulationState) -> Result<PathBuf, PersistenceError> {
        fs::create_dir_all(&self.export_dir)?;
        let path = self
            .export_dir
            .join(export_file_name(state.day, Utc::now().date_naive()));
        fs::write(&path, encode(state)?)?;
        log::info!("📦 Exported day {} to {:?}", state.day, path);
        Ok(path)
    }
}
