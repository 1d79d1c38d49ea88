// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wire protocol for the execd command daemon.
//!
//! Requests and responses are single JSON objects, one per line, UTF-8.
//! Every response carries a `success` flag:
//!
//! ```text
//! {"success":true, ...payload fields...}
//! {"success":false,"error":"task not found: 9","kind":"not_found"}
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

mod request;

pub use request::{decode_request, DecodeError, ParamError, Params, Request};

// Re-export entity enums from core (canonical definitions).
pub use exec_core::{NoteMatch, Priority, ReminderStatus};

// ============================================================================
// Errors
// ============================================================================

/// Failure category reported on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The input line was not a valid request.
    DecodeError,
    /// No handler is registered under the method name.
    UnknownMethod,
    /// A parameter was missing or invalid.
    ValidationError,
    /// The request named an identifier that does not exist.
    NotFound,
    /// The storage medium could not be read or written.
    IoFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::DecodeError => "decode_error",
            ErrorKind::UnknownMethod => "unknown_method",
            ErrorKind::ValidationError => "validation_error",
            ErrorKind::NotFound => "not_found",
            ErrorKind::IoFailure => "io_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&exec_core::Error> for ErrorKind {
    fn from(err: &exec_core::Error) -> Self {
        if err.is_storage() {
            ErrorKind::IoFailure
        } else if err.is_not_found() {
            ErrorKind::NotFound
        } else {
            ErrorKind::ValidationError
        }
    }
}

/// A failed request, ready to encode.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn unknown_method(method: &str) -> Self {
        Failure::new(ErrorKind::UnknownMethod, format!("Unknown method: {method}"))
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl From<exec_core::Error> for Failure {
    fn from(err: exec_core::Error) -> Self {
        Failure::new(ErrorKind::from(&err), err.to_string())
    }
}

impl From<ParamError> for Failure {
    fn from(err: ParamError) -> Self {
        Failure::new(ErrorKind::ValidationError, err.to_string())
    }
}

impl From<DecodeError> for Failure {
    fn from(err: DecodeError) -> Self {
        Failure::new(ErrorKind::DecodeError, err.to_string())
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Confirmation carrying a human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub message: String,
}

/// Result of `search_notes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    pub results: Vec<NoteMatch>,
}

/// Result of `create_task`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskCreated {
    pub message: String,
    pub id: i64,
}

/// One row of `list_tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskSummary {
    pub id: i64,
    pub title: String,
    pub priority: Priority,
}

impl From<exec_core::Task> for TaskSummary {
    fn from(task: exec_core::Task) -> Self {
        TaskSummary {
            id: task.id,
            title: task.title,
            priority: task.priority,
        }
    }
}

/// Result of `list_tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskList {
    pub tasks: Vec<TaskSummary>,
}

/// Result of `create_reminder`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReminderCreated {
    pub message: String,
    pub id: i64,
    pub trigger_time: DateTime<Utc>,
}

/// One row of `list_reminders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReminderSummary {
    pub id: i64,
    pub title: String,
    pub trigger_time: DateTime<Utc>,
    pub status: ReminderStatus,
}

impl From<exec_core::Reminder> for ReminderSummary {
    fn from(reminder: exec_core::Reminder) -> Self {
        ReminderSummary {
            id: reminder.id,
            title: reminder.title,
            trigger_time: reminder.trigger_time,
            status: reminder.status,
        }
    }
}

/// Result of `list_reminders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReminderList {
    pub reminders: Vec<ReminderSummary>,
}

/// Operation-specific fields of a successful response.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Payload {
    /// No fields beyond the success flag.
    Ack,
    Message(Message),
    SearchResults(SearchResults),
    TaskCreated(TaskCreated),
    TaskList(TaskList),
    ReminderCreated(ReminderCreated),
    ReminderList(ReminderList),
}

impl Payload {
    pub fn message(message: impl Into<String>) -> Self {
        Payload::Message(Message {
            message: message.into(),
        })
    }
}

// ============================================================================
// Responses
// ============================================================================

/// The uniform response envelope: a success payload or a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Success(Payload),
    Failure(Failure),
}

impl Response {
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }
}

impl From<Result<Payload, Failure>> for Response {
    fn from(result: Result<Payload, Failure>) -> Self {
        match result {
            Ok(payload) => Response::Success(payload),
            Err(failure) => Response::Failure(failure),
        }
    }
}

impl Serialize for Response {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{Error as _, SerializeMap};

        match self {
            Response::Success(payload) => {
                let fields = match serde_json::to_value(payload).map_err(S::Error::custom)? {
                    Value::Object(fields) => fields,
                    Value::Null => Map::new(),
                    other => {
                        return Err(S::Error::custom(format!(
                            "payload must be an object, got {other}"
                        )))
                    }
                };
                let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
                map.serialize_entry("success", &true)?;
                for (name, value) in &fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
            Response::Failure(failure) => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", &failure.message)?;
                map.serialize_entry("kind", &failure.kind)?;
                map.end()
            }
        }
    }
}

/// A decoded response line, as seen by a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    /// Operation-specific fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Reply {
    /// Deserialize one operation-specific field.
    pub fn field<T: serde::de::DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.fields
            .get(name)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Decode one response line.
pub fn decode_reply(line: &str) -> serde_json::Result<Reply> {
    serde_json::from_str(line)
}

/// Newline-delimited message framing.
///
/// Each message is one line of JSON terminated by `\n`. Lines longer than
/// the caller's limit are drained and reported as [`Frame::TooLong`] so the
/// stream stays aligned on the next line.
pub mod framing {
    use std::io::{self, BufRead, Write};

    use serde::Serialize;

    /// One unit read from the input stream.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Frame {
        /// Line contents, without the terminator.
        Line(Vec<u8>),
        /// A line that exceeded the limit; holds its full length.
        TooLong(usize),
    }

    /// Read the next line, or `None` at end of input.
    ///
    /// A final line without a trailing newline is still returned.
    pub fn read_frame<R: BufRead>(reader: &mut R, max_len: usize) -> io::Result<Option<Frame>> {
        let mut buf = Vec::new();
        let cap = u64::try_from(max_len).unwrap_or(u64::MAX).saturating_add(1);
        let n = io::Read::take(&mut *reader, cap).read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Ok(None);
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
            return Ok(Some(Frame::Line(buf)));
        }

        if buf.len() <= max_len {
            return Ok(Some(Frame::Line(buf)));
        }

        let mut total = buf.len();
        loop {
            let chunk = reader.fill_buf()?;
            if chunk.is_empty() {
                break;
            }
            match chunk.iter().position(|&b| b == b'\n') {
                Some(pos) => {
                    total += pos;
                    reader.consume(pos + 1);
                    break;
                }
                None => {
                    let len = chunk.len();
                    total += len;
                    reader.consume(len);
                }
            }
        }
        Ok(Some(Frame::TooLong(total)))
    }

    /// Write one message as a JSON line and flush.
    pub fn write_message<W: Write, T: Serialize>(writer: &mut W, message: &T) -> io::Result<()> {
        let mut json = serde_json::to_vec(message)
            .map_err(|e| io::Error::other(format!("serialize error: {}", e)))?;
        json.push(b'\n');
        writer.write_all(&json)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
