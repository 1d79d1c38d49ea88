// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only markdown note log.
//!
//! Each entry is written as:
//!
//! ```text
//!
//! ## 2026-01-02 03:04:05
//! <content>
//! ---
//! ```
//!
//! Entries are appended under an exclusive file lock and synced before the
//! call returns, so earlier entries survive a crash mid-append. The log is
//! never rewritten or truncated.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Prefix of an entry header line.
pub const ENTRY_HEADER: &str = "## ";
/// Line closing an entry.
pub const ENTRY_FOOTER: &str = "---";
/// Timestamp layout used in entry headers (UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single line of the log matching a search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteMatch {
    /// Name of the log file the line came from.
    pub filename: String,
    /// 1-based physical line number.
    pub line: usize,
    /// The matching line, trimmed.
    pub context: String,
}

/// A complete entry recovered from the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    /// Header timestamp text, as written.
    pub timestamp: String,
    pub content: String,
}

/// Handle on a note log file. The file is created on first append.
#[derive(Debug, Clone)]
pub struct NoteLog {
    path: PathBuf,
}

impl NoteLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        NoteLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name reported in search results.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Appends one entry stamped with `at`.
    pub fn append(&self, content: &str, at: DateTime<Utc>) -> Result<()> {
        let entry = format_entry(content, at);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;
        let written = file.write_all(entry.as_bytes()).and_then(|()| file.sync_all());
        let unlocked = FileExt::unlock(&file);
        written?;
        unlocked?;

        tracing::debug!(path = %self.path.display(), bytes = entry.len(), "note appended");
        Ok(())
    }

    /// Case-insensitive substring search over every physical line.
    ///
    /// Returns at most `limit` matches in file order. A missing log yields
    /// no matches.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<NoteMatch>> {
        let mut matches = Vec::new();
        if limit == 0 {
            return Ok(matches);
        }
        let Some(lines) = self.lines()? else {
            return Ok(matches);
        };

        let needle = query.to_lowercase();
        let filename = self.file_name();
        for (index, line) in lines.enumerate() {
            let line = line?;
            if line.to_lowercase().contains(&needle) {
                matches.push(NoteMatch {
                    filename: filename.clone(),
                    line: index + 1,
                    context: line.trim().to_string(),
                });
                if matches.len() >= limit {
                    break;
                }
            }
        }
        Ok(matches)
    }

    /// Recovers complete entries by scanning for header and footer lines.
    ///
    /// An entry runs from a header to the last footer before the next
    /// header, so content lines equal to the footer are kept. A trailing
    /// entry with no footer yet is skipped.
    pub fn entries(&self) -> Result<Vec<NoteEntry>> {
        let mut entries = Vec::new();
        let Some(lines) = self.lines()? else {
            return Ok(entries);
        };

        let mut current: Option<(String, Vec<String>)> = None;
        for line in lines {
            let line = line?;
            if let Some(timestamp) = parse_header(&line) {
                if let Some(open) = current.take() {
                    entries.extend(close_entry(open));
                }
                current = Some((timestamp.to_string(), Vec::new()));
            } else if let Some((_, body)) = current.as_mut() {
                body.push(line);
            }
        }
        if let Some(open) = current.take() {
            entries.extend(close_entry(open));
        }
        Ok(entries)
    }

    /// Iterates log lines, or returns `None` if the log does not exist yet.
    fn lines(&self) -> Result<Option<LossyLines<BufReader<File>>>> {
        match File::open(&self.path) {
            Ok(file) => Ok(Some(LossyLines {
                reader: BufReader::new(file),
            })),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

/// Formats a single entry, including the leading blank line.
pub fn format_entry(content: &str, at: DateTime<Utc>) -> String {
    format!(
        "\n{ENTRY_HEADER}{}\n{content}\n{ENTRY_FOOTER}\n",
        at.format(TIMESTAMP_FORMAT)
    )
}

/// Returns the timestamp text if the line is an entry header.
fn parse_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(ENTRY_HEADER)?;
    NaiveDateTime::parse_from_str(rest, TIMESTAMP_FORMAT).ok()?;
    Some(rest)
}

fn close_entry((timestamp, mut body): (String, Vec<String>)) -> Option<NoteEntry> {
    let footer = body.iter().rposition(|line| line == ENTRY_FOOTER)?;
    body.truncate(footer);
    Some(NoteEntry {
        timestamp,
        content: body.join("\n"),
    })
}

/// Line iterator that tolerates invalid UTF-8 and strips `\n` / `\r\n`.
struct LossyLines<R> {
    reader: R,
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
#[path = "note_tests.rs"]
mod tests;
