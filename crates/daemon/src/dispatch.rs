// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The dispatch loop.
//!
//! Reads one request line, writes exactly one response line, flushes, and
//! repeats until end of input. Every per-request failure becomes an error
//! response; only a failure on the streams themselves ends the loop early.

use std::io::{self, BufRead, Write};

use exec_core::{Config, Store};
use exec_ipc::framing::{self, Frame};
use exec_ipc::{decode_request, DecodeError, Failure, Params, Payload, Response};

use crate::registry::Registry;

/// Loop state. `Terminated` is reached only at end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Counters reported when the loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Input lines answered.
    pub requests: u64,
    /// Responses that carried an error.
    pub failures: u64,
}

/// Drives requests from `reader` through the registry to `writer`.
pub struct Dispatcher<'a> {
    registry: &'a Registry,
    store: &'a mut Store,
    config: &'a Config,
    state: LoopState,
    stats: LoopStats,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a Registry, store: &'a mut Store, config: &'a Config) -> Self {
        Dispatcher {
            registry,
            store,
            config,
            state: LoopState::Running,
            stats: LoopStats::default(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[cfg(test)]
    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Run until end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        reader: &mut R,
        writer: &mut W,
    ) -> io::Result<LoopStats> {
        while self.state == LoopState::Running {
            self.step(reader, writer)?;
        }
        Ok(self.stats)
    }

    /// Process at most one line.
    pub fn step<R: BufRead, W: Write>(&mut self, reader: &mut R, writer: &mut W) -> io::Result<()> {
        let Some(frame) = framing::read_frame(reader, self.config.max_line_bytes)? else {
            self.state = LoopState::Terminated;
            return Ok(());
        };

        let response = self.handle_frame(frame);
        self.stats.requests += 1;
        if !response.is_success() {
            self.stats.failures += 1;
        }
        framing::write_message(writer, &response)
    }

    fn handle_frame(&mut self, frame: Frame) -> Response {
        let line = match frame {
            Frame::Line(line) => line,
            Frame::TooLong(len) => {
                let err = DecodeError::TooLong {
                    len,
                    max: self.config.max_line_bytes,
                };
                tracing::warn!("rejected request: {}", err);
                return Response::Failure(err.into());
            }
        };

        let request = match decode_request(&line) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!("failed to decode request: {}", err);
                return Response::Failure(err.into());
            }
        };

        tracing::debug!(method = %request.method, "dispatching");
        Response::from(self.invoke(&request.method, &request.params))
    }

    fn invoke(&mut self, method: &str, params: &Params) -> Result<Payload, Failure> {
        let handler = self.registry.lookup(method).inspect_err(|failure| {
            tracing::warn!(method, "{}", failure);
        })?;
        handler(&mut *self.store, self.config, params).inspect_err(|failure| {
            tracing::warn!(method, "request failed: {}", failure);
        })
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
