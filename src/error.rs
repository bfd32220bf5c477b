// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for `casectl`.
//!
//! This module provides the error hierarchy used across the controller:
//! value validation, command resolution, state persistence, the output
//! transport and the mode scheduler.
//!
//! None of these errors is fatal to a running controller. Command errors are
//! reported to the user, persistence errors are logged and replaced by
//! defaults, and transport errors are logged by the transport task.

use std::path::PathBuf;

use thiserror::Error;

use crate::mode::Channel;

/// The main error type for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A value failed validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A command line could not be resolved or executed.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Console I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when user-supplied arguments cannot be turned into
/// the constrained types the controller works with.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A hex color string could not be parsed.
    #[error("invalid hex color: {0}")]
    InvalidHexColor(String),

    /// A color channel was not an integer in `0..=255`.
    #[error("invalid color channel: {0}")]
    InvalidChannel(String),

    /// A color name is not known.
    #[error("unknown color: {0}")]
    UnknownColor(String),

    /// A color was given with the wrong number of arguments.
    #[error("a color takes 1 or 3 arguments, got {0}")]
    ColorArity(usize),

    /// A mode name is not valid for the channel.
    #[error("unknown {channel} mode: {name}")]
    UnknownMode {
        /// The channel the mode was requested for.
        channel: Channel,
        /// The rejected name.
        name: String,
    },

    /// A number could not be parsed.
    #[error("not a number: {0}")]
    NotANumber(String),

    /// A list index does not exist.
    #[error("index {index} is out of bounds (length {len})")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The length of the list.
        len: usize,
    },

    /// LCD text did not have one entry per display row.
    #[error("LCD text must have {expected} rows, got {actual}")]
    RowCount {
        /// Expected number of rows.
        expected: usize,
        /// The actual number of rows.
        actual: usize,
    },
}

/// Errors produced while resolving or executing a command line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The first token does not name a top-level command.
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    /// The command was resolved but rejected its arguments.
    #[error("malformed arguments for {command}")]
    MalformedArguments {
        /// Full path of the resolved command, e.g. `fade add`.
        command: String,
    },
}

/// Errors related to persisted state.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the data file failed.
    #[error("persistence unavailable at {path}: {source}")]
    Io {
        /// The data file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The data file is not valid for this schema version.
    #[error("corrupt data file: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The data file was written by an incompatible version.
    #[error("incompatible persisted schema (found {found:?}, expected {expected})")]
    IncompatibleSchema {
        /// The version tag found in the file, if any.
        found: Option<u64>,
        /// The version this build understands.
        expected: u32,
    },

    /// The background writer is no longer running.
    #[error("persistence worker stopped")]
    WorkerStopped,
}

/// Errors related to the output transport.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The transport has been closed.
    #[error("transport closed")]
    Closed,
}

/// Errors related to the mode scheduler.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    /// `start` was called on a channel that already has a running driver.
    #[error("{0} driver is already running")]
    AlreadyRunning(Channel),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
