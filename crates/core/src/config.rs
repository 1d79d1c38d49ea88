// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration.
//!
//! Built once at startup and passed by reference to the store and the
//! dispatch loop. An optional `config.toml` in the state directory
//! overrides the defaults:
//!
//! ```toml
//! notes_file = "memory.md"
//! search_limit = 10
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Name of the optional config file inside the state directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_NOTES_FILE: &str = "notes.md";
const DEFAULT_TASKS_DB: &str = "tasks.db";
const DEFAULT_REMINDERS_DB: &str = "reminders.db";
const DEFAULT_SEARCH_LIMIT: usize = 5;
const DEFAULT_REMINDER_MINUTES: i64 = 5;
/// Longest accepted request line (1MB).
const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;

/// Store locations and request budgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding every store file. Never read from `config.toml`.
    #[serde(skip)]
    pub state_dir: PathBuf,
    /// Note log file name, relative to the state directory.
    pub notes_file: String,
    /// Task database file name, relative to the state directory.
    pub tasks_db: String,
    /// Reminder database file name, relative to the state directory.
    pub reminders_db: String,
    /// Maximum matches returned by `search_notes` when the caller gives no limit.
    pub search_limit: usize,
    /// Offset used by `create_reminder` when the caller omits `minutes`.
    pub default_reminder_minutes: i64,
    /// Request lines longer than this are rejected without being parsed.
    pub max_line_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            state_dir: PathBuf::new(),
            notes_file: DEFAULT_NOTES_FILE.to_string(),
            tasks_db: DEFAULT_TASKS_DB.to_string(),
            reminders_db: DEFAULT_REMINDERS_DB.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            default_reminder_minutes: DEFAULT_REMINDER_MINUTES,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

impl Config {
    /// Default configuration rooted at `state_dir`.
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Config {
            state_dir: state_dir.into(),
            ..Default::default()
        }
    }

    /// Load `config.toml` from `state_dir` if present, else use defaults.
    pub fn load(state_dir: &Path) -> Result<Self> {
        let path = state_dir.join(CONFIG_FILE_NAME);
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)?;
            toml::from_str::<Config>(&content)?
        } else {
            Config::default()
        };
        config.state_dir = state_dir.to_path_buf();
        Ok(config)
    }

    pub fn notes_path(&self) -> PathBuf {
        self.state_dir.join(&self.notes_file)
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.state_dir.join(&self.tasks_db)
    }

    pub fn reminders_path(&self) -> PathBuf {
        self.state_dir.join(&self.reminders_db)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
