// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

use crate::error::{Error, Result};
use crate::task::{NewTask, Task, TaskStatus};

use super::{parse_db, parse_timestamp, parse_timestamp_opt};

/// SQL schema for the task table.
///
/// `AUTOINCREMENT` keeps identifiers strictly increasing and never reused,
/// even after the highest row is gone.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL CHECK (length(trim(title)) > 0),
    description TEXT,
    priority TEXT NOT NULL DEFAULT 'medium',
    status TEXT NOT NULL DEFAULT 'pending',
    created_at TEXT NOT NULL,
    completed_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
"#;

const COLUMNS: &str = "id, title, description, priority, status, created_at, completed_at";

/// Task table stored in its own SQLite file.
pub struct TaskTable {
    conn: Connection,
}

impl TaskTable {
    /// Open the task table at the given path, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(TaskTable {
            conn: super::open_connection(path, SCHEMA)?,
        })
    }

    /// Open an in-memory task table (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Ok(TaskTable {
            conn: super::open_in_memory(SCHEMA)?,
        })
    }

    /// Insert a pending task and return its identifier.
    ///
    /// Allocation and insertion are a single statement, so no two creates
    /// can observe the same identifier.
    pub fn create(&self, task: &NewTask, now: DateTime<Utc>) -> Result<i64> {
        task.validate()?;
        let id = self.conn.query_row(
            "INSERT INTO tasks (title, description, priority, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id",
            params![
                task.title,
                task.description,
                task.priority.as_str(),
                TaskStatus::Pending.as_str(),
                now.to_rfc3339(),
            ],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Get a task by identifier.
    pub fn get(&self, id: i64) -> Result<Task> {
        let task = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM tasks WHERE id = ?1"),
                params![id],
                task_from_row,
            )
            .optional()?;

        task.ok_or(Error::TaskNotFound(id))
    }

    /// All pending tasks in creation order.
    pub fn list_pending(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM tasks WHERE status = ?1 ORDER BY id ASC"
        ))?;

        let tasks = stmt
            .query_map(params![TaskStatus::Pending.as_str()], task_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    /// Mark a task completed.
    ///
    /// Completing an already-completed task succeeds and keeps the original
    /// completion time.
    pub fn complete(&self, id: i64, now: DateTime<Utc>) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE tasks SET status = ?1, completed_at = COALESCE(completed_at, ?2)
             WHERE id = ?3",
            params![TaskStatus::Completed.as_str(), now.to_rfc3339(), id],
        )?;

        if affected == 0 {
            return Err(Error::TaskNotFound(id));
        }
        Ok(())
    }
}

fn task_from_row(row: &Row<'_>) -> std::result::Result<Task, rusqlite::Error> {
    let priority_str: String = row.get(3)?;
    let status_str: String = row.get(4)?;
    let created_str: String = row.get(5)?;

    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        priority: parse_db(&priority_str, "priority")?,
        status: parse_db(&status_str, "status")?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        completed_at: parse_timestamp_opt(row.get(6)?, "completed_at")?,
    })
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
