// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variables read by the daemon.

use std::path::PathBuf;

/// Environment variable names.
pub mod names {
    /// Overrides the execd state directory.
    pub const EXECD_STATE_DIR: &str = "EXECD_STATE_DIR";

    /// XDG base directory for state data.
    pub const XDG_STATE_HOME: &str = "XDG_STATE_HOME";

    /// Log filter read by tracing-subscriber.
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Returns the value of `EXECD_STATE_DIR` if set and non-empty.
pub fn state_dir() -> Option<PathBuf> {
    non_empty(names::EXECD_STATE_DIR)
}

/// Returns the value of `XDG_STATE_HOME` if set and non-empty.
pub fn xdg_state_home() -> Option<PathBuf> {
    non_empty(names::XDG_STATE_HOME)
}

fn non_empty(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
