// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

use crate::error::{Error, Result};
use crate::reminder::{Reminder, ReminderStatus};

use super::{parse_db, parse_timestamp};

/// SQL schema for the reminder table.
///
/// `trigger_time` is stored as fixed-width RFC 3339 so text order is time order.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS reminders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    trigger_time TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'active',
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_reminders_status ON reminders(status, trigger_time);
"#;

const COLUMNS: &str = "id, title, trigger_time, status, created_at";

/// Reminder table stored in its own SQLite file.
pub struct ReminderTable {
    conn: Connection,
}

impl ReminderTable {
    /// Open the reminder table at the given path, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(ReminderTable {
            conn: super::open_connection(path, SCHEMA)?,
        })
    }

    /// Open an in-memory reminder table (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Ok(ReminderTable {
            conn: super::open_in_memory(SCHEMA)?,
        })
    }

    /// Insert an active reminder and return its identifier.
    pub fn create(
        &self,
        title: &str,
        trigger_time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<i64> {
        if title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }
        let id = self.conn.query_row(
            "INSERT INTO reminders (title, trigger_time, status, created_at)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id",
            params![
                title,
                trigger_time.to_rfc3339_opts(SecondsFormat::Nanos, true),
                ReminderStatus::Active.as_str(),
                now.to_rfc3339(),
            ],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Get a reminder by identifier.
    pub fn get(&self, id: i64) -> Result<Reminder> {
        let reminder = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM reminders WHERE id = ?1"),
                params![id],
                reminder_from_row,
            )
            .optional()?;

        reminder.ok_or(Error::ReminderNotFound(id))
    }

    /// Active reminders, soonest first.
    pub fn list_active(&self) -> Result<Vec<Reminder>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM reminders WHERE status = ?1
             ORDER BY trigger_time ASC, id ASC"
        ))?;

        let reminders = stmt
            .query_map(params![ReminderStatus::Active.as_str()], reminder_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(reminders)
    }

    /// Cancel a reminder that has not fired yet.
    ///
    /// Cancelling twice succeeds; cancelling a fired reminder is an invalid
    /// transition.
    pub fn cancel(&self, id: i64) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE reminders SET status = ?1 WHERE id = ?2 AND status != ?3",
            params![
                ReminderStatus::Cancelled.as_str(),
                id,
                ReminderStatus::Fired.as_str(),
            ],
        )?;
        if affected > 0 {
            return Ok(());
        }

        let current = self.get(id)?;
        Err(Error::InvalidTransition {
            from: current.status.to_string(),
            to: ReminderStatus::Cancelled.to_string(),
        })
    }
}

fn reminder_from_row(row: &Row<'_>) -> std::result::Result<Reminder, rusqlite::Error> {
    let trigger_str: String = row.get(2)?;
    let status_str: String = row.get(3)?;
    let created_str: String = row.get(4)?;

    Ok(Reminder {
        id: row.get(0)?,
        title: row.get(1)?,
        trigger_time: parse_timestamp(&trigger_str, "trigger_time")?,
        status: parse_db(&status_str, "status")?,
        created_at: parse_timestamp(&created_str, "created_at")?,
    })
}

#[cfg(test)]
#[path = "reminders_tests.rs"]
mod tests;
