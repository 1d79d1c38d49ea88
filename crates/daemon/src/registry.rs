// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Method registry: the closed set of method names the daemon answers.

use std::collections::BTreeMap;

use exec_core::{Config, Store};
use exec_ipc::{Failure, Params};

use crate::handlers::{self, HandlerResult};

/// Signature shared by every handler.
pub type Handler = fn(&mut Store, &Config, &Params) -> HandlerResult;

/// Every method, in the order it is documented.
const METHODS: &[(&str, Handler)] = &[
    ("take_note", handlers::take_note),
    ("search_notes", handlers::search_notes),
    ("create_task", handlers::create_task),
    ("list_tasks", handlers::list_tasks),
    ("complete_task", handlers::complete_task),
    ("create_reminder", handlers::create_reminder),
    ("list_reminders", handlers::list_reminders),
    ("cancel_reminder", handlers::cancel_reminder),
];

/// Exact, case-sensitive mapping from method name to handler.
pub struct Registry {
    handlers: BTreeMap<&'static str, Handler>,
}

impl Registry {
    /// Build the registry with every built-in method.
    pub fn new() -> Self {
        Registry {
            handlers: METHODS.iter().copied().collect(),
        }
    }

    /// Look up a handler by exact name.
    pub fn lookup(&self, method: &str) -> Result<Handler, Failure> {
        self.handlers
            .get(method)
            .copied()
            .ok_or_else(|| Failure::unknown_method(method))
    }

    /// Registered method names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
