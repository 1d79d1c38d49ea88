// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! execd - local command-dispatch daemon.
//!
//! Reads one JSON request per line on stdin and writes one JSON response
//! per line on stdout. Notes, tasks, and reminders are kept under the state
//! directory (default `~/.local/state/execd/`). Logs go to `execd.log` in
//! the same directory, never to stdout.
//!
//! Usage:
//!   execd [--state-dir <path>]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use exec_core::{Config, Store};

mod dispatch;
mod env;
mod handlers;
mod registry;

use dispatch::Dispatcher;
use registry::Registry;

/// Log filename within the state directory.
const LOG_NAME: &str = "execd.log";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let state_dir = parse_state_dir(&args);

    if let Err(e) = fs::create_dir_all(&state_dir) {
        eprintln!("execd: cannot create {}: {}", state_dir.display(), e);
        return ExitCode::FAILURE;
    }

    setup_logging(&state_dir.join(LOG_NAME));
    tracing::info!("execd starting, state_dir={}", state_dir.display());

    let config = match Config::load(&state_dir) {
        Ok(config) => config,
        Err(e) => return fatal("failed to load config", &e),
    };

    let mut store = match Store::open(&config) {
        Ok(store) => store,
        Err(e) => return fatal("failed to open store", &e),
    };

    let registry = Registry::new();
    tracing::debug!(methods = ?registry.names().collect::<Vec<_>>(), "registry ready");

    let mut reader = io::stdin().lock();
    let mut writer = io::stdout().lock();
    let mut dispatcher = Dispatcher::new(&registry, &mut store, &config);

    match dispatcher.run(&mut reader, &mut writer) {
        Ok(stats) => {
            tracing::info!(
                requests = stats.requests,
                failures = stats.failures,
                "end of input, execd stopped"
            );
            ExitCode::SUCCESS
        }
        Err(e) => fatal("stream failure", &e),
    }
}

fn fatal(context: &str, err: &dyn std::fmt::Display) -> ExitCode {
    tracing::error!("{}: {}", context, err);
    eprintln!("execd: {}: {}", context, err);
    ExitCode::FAILURE
}

fn parse_state_dir(args: &[String]) -> PathBuf {
    if let Some(dir) = args.iter().skip_while(|a| *a != "--state-dir").nth(1) {
        return PathBuf::from(dir);
    }
    if let Some(dir) = env::state_dir() {
        return dir;
    }
    if let Some(dir) = env::xdg_state_home() {
        return dir.join("execd");
    }
    dirs::home_dir()
        .map(|h| h.join(".local/state/execd"))
        .unwrap_or_else(|| PathBuf::from(".local/state/execd"))
}

fn setup_logging(log_path: &Path) {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env(env::names::RUST_LOG).unwrap_or_else(|_| EnvFilter::new("info"));

    // Try to open log file, fall back to stderr
    if let Ok(file) = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
