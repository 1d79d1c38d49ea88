// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for exec-core store operations.

use thiserror::Error;

/// All possible errors that can occur in exec-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("task title must not be empty")]
    EmptyTitle,

    #[error("invalid reminder offset: {0} minutes\n  hint: offset must be zero or a positive number of minutes")]
    InvalidOffset(i64),

    #[error("task not found: {0}")]
    TaskNotFound(i64),

    #[error("reminder not found: {0}")]
    ReminderNotFound(i64),

    #[error("invalid priority: '{0}'\n  hint: valid priorities are: low, medium, high")]
    InvalidPriority(String),

    #[error("invalid status: '{0}'")]
    InvalidStatus(String),

    #[error("invalid status transition: cannot go from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl Error {
    /// Returns true if the error came from the storage medium rather than the caller.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Error::Database(_) | Error::Io(_) | Error::Config(_) | Error::CorruptedData(_)
        )
    }

    /// Returns true if the error names an identifier with no matching row.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::TaskNotFound(_) | Error::ReminderNotFound(_))
    }
}

/// A specialized Result type for exec-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
