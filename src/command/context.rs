// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Execution context handed to command handlers.

use crate::scheduler::ModeScheduler;
use crate::state::SharedState;

use super::CommandRegistry;

/// Lines printed by commands, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Console {
    lines: Vec<String>,
}

impl Console {
    /// Appends one line.
    pub fn println(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Returns the lines printed so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Removes and returns the lines printed so far.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

/// What a command can reach while it runs.
///
/// Handlers run synchronously on the command loop. They must not hold the
/// state lock while calling into the scheduler, since a restart takes that
/// lock itself.
#[derive(Debug)]
pub struct CommandContext<'a> {
    registry: &'a CommandRegistry,
    state: &'a SharedState,
    scheduler: &'a ModeScheduler,
    console: Console,
    stop_requested: bool,
}

impl<'a> CommandContext<'a> {
    /// Creates a context with an empty console.
    #[must_use]
    pub fn new(
        registry: &'a CommandRegistry,
        state: &'a SharedState,
        scheduler: &'a ModeScheduler,
    ) -> Self {
        Self {
            registry,
            state,
            scheduler,
            console: Console::default(),
            stop_requested: false,
        }
    }

    /// Resolves and runs one input line.
    ///
    /// # Errors
    ///
    /// See [`CommandRegistry::dispatch`].
    pub fn execute(&mut self, line: &str) -> Result<(), crate::error::CommandError> {
        let registry = self.registry;
        registry.dispatch(self, line)
    }

    /// Returns the registry commands were resolved from.
    #[must_use]
    pub fn registry(&self) -> &'a CommandRegistry {
        self.registry
    }

    /// Returns the shared application state.
    #[must_use]
    pub fn state(&self) -> &'a SharedState {
        self.state
    }

    /// Returns the mode scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &'a ModeScheduler {
        self.scheduler
    }

    /// Prints one line to the user.
    pub fn say(&mut self, line: impl Into<String>) {
        self.console.println(line);
    }

    /// Returns the console output.
    #[must_use]
    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Removes and returns the console output.
    pub fn take_output(&mut self) -> Vec<String> {
        self.console.take()
    }

    /// Asks the controller to shut down after this command.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    /// Returns `true` once a command has asked to stop.
    #[must_use]
    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }
}
