// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! exec-core: persistent state for the execd command daemon.
//!
//! This crate provides the store (an append-only note log plus task and
//! reminder tables), the configuration it is opened with, and the error
//! type every store operation returns.

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod note;
pub mod reminder;
pub mod store;
pub mod task;

pub use clock::{ClockSource, FixedClock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use note::{NoteEntry, NoteLog, NoteMatch};
pub use reminder::{Reminder, ReminderStatus};
pub use store::Store;
pub use task::{NewTask, Priority, Task, TaskStatus};
