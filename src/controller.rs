// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Process lifecycle: startup, the command loop and shutdown.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::command::{CommandContext, CommandRegistry, default_registry};
use crate::config::ControllerConfig;
use crate::error::{CommandError, PersistenceError};
use crate::persistence::{PersistedState, PersistenceWorker, StateStore};
use crate::scheduler::ModeScheduler;
use crate::state::SharedState;
use crate::transport::{self, Transport, TransportHandle};

type BoxedTransport = Box<dyn Transport + Send>;

/// Printed before the first prompt when saved state could not be loaded.
pub const LOAD_FAILED_NOTICE: &str = "Could not load saved data. Maybe it was an older version?";

/// Result of executing one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Lines printed by the command or the dispatcher.
    pub output: Vec<String>,
    /// Whether the line resolved and ran successfully.
    pub result: Result<(), CommandError>,
    /// Whether the command asked the controller to stop.
    pub stop_requested: bool,
}

/// The running controller.
///
/// Owns the shared state, both mode drivers, the transport task and the
/// persistence worker. Created with [`Controller::start`] and torn down with
/// [`Controller::shutdown`], which [`Controller::run`] calls when input ends
/// or `stop` is entered.
///
/// # Examples
///
/// ```no_run
/// use casectl::{Controller, ControllerConfig, TracingTransport};
///
/// #[tokio::main]
/// async fn main() -> std::io::Result<()> {
///     let config = ControllerConfig::new("/dev/ttyUSB0");
///     let transport = TracingTransport::new(config.serial_port());
///     let controller = Controller::start(config, transport);
///
///     let stdin = tokio::io::BufReader::new(tokio::io::stdin());
///     controller.run(stdin, tokio::io::stdout()).await
/// }
/// ```
#[derive(Debug)]
pub struct Controller {
    config: ControllerConfig,
    registry: CommandRegistry,
    state: SharedState,
    scheduler: ModeScheduler,
    transport: TransportHandle<BoxedTransport>,
    persistence: PersistenceWorker,
    load_error: Option<PersistenceError>,
}

impl Controller {
    /// Loads saved state, starts both mode drivers, the transport task and
    /// the persistence worker.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start<T>(config: ControllerConfig, transport: T) -> Self
    where
        T: Transport + Send + 'static,
    {
        let store = StateStore::new(config.data_file());
        let (initial, load_error) = store.load_or_default();
        let state = SharedState::new(initial);

        let scheduler = ModeScheduler::new(state.clone());
        scheduler.start_all();

        let boxed: BoxedTransport = Box::new(transport);
        let transport = transport::spawn(boxed, state.clone(), config.transmit_interval());
        let persistence = PersistenceWorker::spawn(store);

        tracing::info!(
            port = %config.serial_port(),
            data_file = %config.data_file().display(),
            "Controller started"
        );

        Self {
            config,
            registry: default_registry(),
            state,
            scheduler,
            transport,
            persistence,
            load_error,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Returns the shared application state.
    #[must_use]
    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Returns why saved state was replaced by defaults at startup, if it
    /// was. A missing data file is not an error.
    #[must_use]
    pub fn load_error(&self) -> Option<&PersistenceError> {
        self.load_error.as_ref()
    }

    /// Returns the mode scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &ModeScheduler {
        &self.scheduler
    }

    /// Executes one input line and queues a state snapshot if it succeeded.
    pub fn execute_line(&self, line: &str) -> CommandOutcome {
        let mut ctx = CommandContext::new(&self.registry, &self.state, &self.scheduler);
        let result = ctx.execute(line);
        if result.is_ok() && !line.trim().is_empty() {
            self.persist();
        }
        CommandOutcome {
            output: ctx.take_output(),
            result,
            stop_requested: ctx.stop_requested(),
        }
    }

    fn persist(&self) {
        queue_snapshot(&self.state, &self.persistence);
    }

    /// Reads commands from `input` until it ends, `stop` is entered or the
    /// process is interrupted, then shuts down.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails. The
    /// controller is shut down in every case.
    pub async fn run<R, W>(self, input: R, mut output: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let result = self.command_loop(input, &mut output).await;
        self.shutdown().await;
        output.flush().await?;
        result
    }

    async fn command_loop<R, W>(&self, input: R, output: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if self.load_error.is_some() {
            output.write_all(LOAD_FAILED_NOTICE.as_bytes()).await?;
            output.write_all(b"\n").await?;
        }

        let mut lines = input.lines();
        loop {
            output.write_all(self.config.prompt().as_bytes()).await?;
            output.flush().await?;

            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    None
                }
            };
            let Some(line) = line else {
                return Ok(());
            };

            let outcome = self.execute_line(&line);
            for printed in &outcome.output {
                output.write_all(printed.as_bytes()).await?;
                output.write_all(b"\n").await?;
            }
            if outcome.stop_requested {
                return Ok(());
            }
        }
    }

    /// Stops both drivers and the transport, then saves the final state.
    pub async fn shutdown(self) {
        let Self {
            state,
            scheduler,
            transport,
            persistence,
            ..
        } = self;

        scheduler.stop().await;
        transport.terminate().await;
        queue_snapshot(&state, &persistence);
        persistence.shutdown().await;
        tracing::info!("Controller stopped");
    }
}

fn queue_snapshot(state: &SharedState, persistence: &PersistenceWorker) {
    let snapshot = state.read(|s| PersistedState::from(s));
    if let Err(e) = persistence.submit(snapshot) {
        tracing::warn!(error = %e, "Could not queue state for saving");
    }
}
