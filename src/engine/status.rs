//! The run-status record shared by both delegation front ends: a tiny JSON
//! file overwritten on every state transition and read back verbatim by the
//! status query.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed file name of the status record inside the execution directory.
pub const STATUS_FILE: &str = ".workflow-status.json";

/// Coarse run state of a delegated execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunState {
    Ready,
    Running,
    Finished,
    Error,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RunState::Ready => "READY",
            RunState::Running => "RUNNING",
            RunState::Finished => "FINISHED",
            RunState::Error => "ERROR",
        };
        f.write_str(text)
    }
}

#[derive(Serialize, Deserialize)]
struct StatusRecord {
    state: RunState,
}

/// Handle on the status record of one execution directory.
pub struct WorkflowStatus {
    file_path: PathBuf,
}

impl WorkflowStatus {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            file_path: directory.as_ref().join(STATUS_FILE),
        }
    }

    /// Overwrites the record with the given state.
    pub fn save(&self, state: RunState) -> Result<(), EngineError> {
        let record = StatusRecord { state };
        let json = serde_json::to_string(&record).map_err(|e| EngineError::StatusEncode {
            path: self.file_path.display().to_string(),
            source: e,
        })?;
        fs::write(&self.file_path, json).map_err(|e| EngineError::StatusWrite {
            path: self.file_path.display().to_string(),
            source: e,
        })
    }

    /// Reads the last recorded state.
    pub fn load(&self) -> Result<RunState, EngineError> {
        let content = fs::read_to_string(&self.file_path).map_err(|e| EngineError::StatusRead {
            path: self.file_path.display().to_string(),
            source: e,
        })?;
        let record: StatusRecord =
            serde_json::from_str(&content).map_err(|e| EngineError::StatusParse {
                path: self.file_path.display().to_string(),
                source: e,
            })?;
        Ok(record.state)
    }
}
