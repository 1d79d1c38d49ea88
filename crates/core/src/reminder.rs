// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reminder types: ReminderStatus and Reminder.
//!
//! The store only computes and persists trigger times. Firing a reminder is
//! left to whatever polls the table.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Lifecycle state of a reminder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    /// Waiting for its trigger time.
    #[default]
    Active,
    /// Delivered by a poller.
    Fired,
    /// Withdrawn before firing.
    Cancelled,
}

impl ReminderStatus {
    /// Returns the string representation used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderStatus::Active => "active",
            ReminderStatus::Fired => "fired",
            ReminderStatus::Cancelled => "cancelled",
        }
    }

    /// Returns true if a reminder in this state may be cancelled.
    pub fn can_cancel(&self) -> bool {
        !matches!(self, ReminderStatus::Fired)
    }
}

impl fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReminderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(ReminderStatus::Active),
            "fired" => Ok(ReminderStatus::Fired),
            "cancelled" => Ok(ReminderStatus::Cancelled),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// A persisted reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub title: String,
    /// Creation time plus the requested offset.
    pub trigger_time: DateTime<Utc>,
    pub status: ReminderStatus,
    pub created_at: DateTime<Utc>,
}

/// Computes the trigger time for a reminder created at `now`.
///
/// Fails on negative offsets and on offsets that overflow the calendar.
pub fn trigger_time(now: DateTime<Utc>, offset_minutes: i64) -> Result<DateTime<Utc>> {
    if offset_minutes < 0 {
        return Err(Error::InvalidOffset(offset_minutes));
    }
    Duration::try_minutes(offset_minutes)
        .and_then(|offset| now.checked_add_signed(offset))
        .ok_or(Error::InvalidOffset(offset_minutes))
}

#[cfg(test)]
#[path = "reminder_tests.rs"]
mod tests;
