// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The store: sole owner and writer of notes, tasks, and reminders.
//!
//! Each family is backed by its own file under the state directory.

use std::fs;

use crate::clock::{ClockSource, SystemClock};
use crate::config::Config;
use crate::db::{ReminderTable, TaskTable};
use crate::error::Result;
use crate::note::{NoteEntry, NoteLog, NoteMatch};
use crate::reminder::{self, Reminder};
use crate::task::{NewTask, Task};

/// Durable state behind every handler.
pub struct Store {
    notes: NoteLog,
    tasks: TaskTable,
    reminders: ReminderTable,
    clock: Box<dyn ClockSource>,
}

impl Store {
    /// Open every store file named by `config`, using the system clock.
    pub fn open(config: &Config) -> Result<Self> {
        Self::open_with_clock(config, SystemClock)
    }

    /// Open every store file named by `config` with a custom clock.
    pub fn open_with_clock(config: &Config, clock: impl ClockSource + 'static) -> Result<Self> {
        fs::create_dir_all(&config.state_dir)?;

        let store = Store {
            notes: NoteLog::new(config.notes_path()),
            tasks: TaskTable::open(&config.tasks_path())?,
            reminders: ReminderTable::open(&config.reminders_path())?,
            clock: Box::new(clock),
        };
        tracing::info!(state_dir = %config.state_dir.display(), "store opened");
        Ok(store)
    }

    /// The note log backing `append_note` and `search_notes`.
    pub fn note_log(&self) -> &NoteLog {
        &self.notes
    }

    /// Append a timestamped entry to the note log.
    pub fn append_note(&mut self, content: &str) -> Result<()> {
        self.notes.append(content, self.clock.now())
    }

    /// Case-insensitive line search over the note log.
    pub fn search_notes(&self, query: &str, limit: usize) -> Result<Vec<NoteMatch>> {
        self.notes.search(query, limit)
    }

    /// Complete entries recovered from the note log.
    pub fn read_notes(&self) -> Result<Vec<NoteEntry>> {
        self.notes.entries()
    }

    /// Create a pending task and return its identifier.
    pub fn create_task(&mut self, task: &NewTask) -> Result<i64> {
        let id = self.tasks.create(task, self.clock.now())?;
        tracing::debug!(id, priority = %task.priority, "task created");
        Ok(id)
    }

    pub fn get_task(&self, id: i64) -> Result<Task> {
        self.tasks.get(id)
    }

    /// Pending tasks in creation order.
    pub fn list_pending_tasks(&self) -> Result<Vec<Task>> {
        self.tasks.list_pending()
    }

    /// Mark a task completed. Completing twice is not an error.
    pub fn complete_task(&mut self, id: i64) -> Result<()> {
        self.tasks.complete(id, self.clock.now())?;
        tracing::debug!(id, "task completed");
        Ok(())
    }

    /// Create an active reminder triggering `offset_minutes` from now.
    pub fn create_reminder(&mut self, title: &str, offset_minutes: i64) -> Result<Reminder> {
        let now = self.clock.now();
        let trigger = reminder::trigger_time(now, offset_minutes)?;
        let id = self.reminders.create(title, trigger, now)?;
        tracing::debug!(id, trigger = %trigger, "reminder created");
        self.reminders.get(id)
    }

    /// Active reminders, soonest first.
    pub fn list_active_reminders(&self) -> Result<Vec<Reminder>> {
        self.reminders.list_active()
    }

    pub fn cancel_reminder(&mut self, id: i64) -> Result<()> {
        self.reminders.cancel(id)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
