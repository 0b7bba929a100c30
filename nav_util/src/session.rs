//! Run archiving: a timestamped session directory for debug artifacts, such
//! as the planner's [`crate`]-external `PlanReport` dumps.
//!
//! Simplified from the rover autonomy stack's `util::session`: that version
//! keeps a background save thread and a process-global epoch so every
//! module in a multi-binary workspace shares one session. The navigation
//! core is a single embedded library, so a session is just a handle the
//! host constructs once and passes in; saves happen synchronously on the
//! calling thread.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use chrono::Local;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// A session directory under which debug artifacts are archived.
#[derive(Debug, Clone)]
pub struct Session {
    pub root: PathBuf,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot create the session directory: {0}")]
    CannotCreateDir(std::io::Error),

    #[error("cannot serialise archived data: {0}")]
    SerialiseError(serde_json::Error),

    #[error("cannot write archived data: {0}")]
    WriteError(std::io::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Session {
    /// Start a new session rooted at `{sessions_dir}/{exec_name}_{timestamp}`.
    pub fn new(exec_name: &str, sessions_dir: &str) -> Result<Self, SessionError> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);

        let mut root = PathBuf::from(sessions_dir);
        root.push(format!("{}_{}", exec_name, timestamp));

        fs::create_dir_all(&root).map_err(SessionError::CannotCreateDir)?;

        Ok(Self { root })
    }

    /// Serialises `data` as pretty JSON to `{root}/{rel_path}`, creating any
    /// intermediate directories.
    pub fn save<T: Serialize>(&self, rel_path: &str, data: &T) -> Result<(), SessionError> {
        let mut path = self.root.clone();
        path.push(rel_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(SessionError::CannotCreateDir)?;
        }

        let json = serde_json::to_string_pretty(data).map_err(SessionError::SerialiseError)?;
        fs::write(path, json).map_err(SessionError::WriteError)
    }
}
