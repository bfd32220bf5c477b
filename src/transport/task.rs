// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport task.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::TransportError;
use crate::state::{OutputFrame, SharedState};

use super::Transport;

/// Handle to a running transport task.
///
/// Dropping the handle also stops the task.
pub struct TransportHandle<T> {
    terminate: oneshot::Sender<()>,
    handle: JoinHandle<T>,
}

impl<T> std::fmt::Debug for TransportHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportHandle")
            .field("finished", &self.handle.is_finished())
            .finish_non_exhaustive()
    }
}

impl<T> TransportHandle<T> {
    /// Returns `true` if the task has exited on its own.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signals the task to stop and waits for it.
    ///
    /// Returns the transport, or `None` if the task panicked.
    pub async fn terminate(self) -> Option<T> {
        // The task may already have stopped on a closed transport.
        let _ = self.terminate.send(());
        match self.handle.await {
            Ok(transport) => Some(transport),
            Err(e) => {
                tracing::error!(error = %e, "Transport task failed");
                None
            }
        }
    }
}

/// Spawns a task that sends changed output frames every `interval`.
///
/// The first frame is sent immediately.
pub fn spawn<T>(transport: T, state: SharedState, interval: Duration) -> TransportHandle<T>
where
    T: Transport + Send + 'static,
{
    let (terminate, terminated) = oneshot::channel();
    let handle = tokio::spawn(run(transport, state, interval, terminated));
    TransportHandle { terminate, handle }
}

async fn run<T: Transport>(
    mut transport: T,
    state: SharedState,
    interval: Duration,
    mut terminated: oneshot::Receiver<()>,
) -> T {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_sent: Option<OutputFrame> = None;

    tracing::info!(interval_ms = interval.as_millis(), "Transport started");

    loop {
        tokio::select! {
            _ = &mut terminated => break,
            _ = ticker.tick() => {
                let frame = state.snapshot();
                if last_sent.as_ref() == Some(&frame) {
                    continue;
                }
                match transport.send(&frame) {
                    Ok(()) => last_sent = Some(frame),
                    Err(TransportError::Closed) => {
                        tracing::warn!("Transport closed");
                        break;
                    }
                }
            }
        }
    }

    tracing::info!("Transport stopped");
    transport
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use tokio::time::sleep;

    use super::*;
    use crate::mode::{CaseMode, Channel};
    use crate::types::Color;

    const PERIOD: Duration = Duration::from_millis(30);

    #[derive(Default, Clone)]
    struct Recording {
        frames: Arc<Mutex<Vec<OutputFrame>>>,
    }

    impl Transport for Recording {
        fn send(&mut self, frame: &OutputFrame) -> Result<(), TransportError> {
            self.frames.lock().push(frame.clone());
            Ok(())
        }
    }

    struct Unplugged;

    impl Transport for Unplugged {
        fn send(&mut self, _frame: &OutputFrame) -> Result<(), TransportError> {
            Err(TransportError::Closed)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn sends_only_changed_frames() {
        let state = SharedState::default();
        let recording = Recording::default();
        let handle = spawn(recording.clone(), state.clone(), PERIOD);

        sleep(PERIOD * 5).await;
        assert_eq!(recording.frames.lock().len(), 1);

        state.update(|s| {
            s.install_case_mode(CaseMode::Static);
            s.set_case_static_color(Color::new(255, 0, 0));
            s.tick(Channel::Case);
        });
        sleep(PERIOD * 2).await;

        let frames = recording.frames.lock().clone();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].case_color, Color::new(255, 0, 0));

        assert!(handle.terminate().await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn terminate_stops_sending() {
        let state = SharedState::default();
        let recording = Recording::default();
        let handle = spawn(recording.clone(), state.clone(), PERIOD);
        sleep(PERIOD).await;
        handle.terminate().await;

        state.update(|s| {
            s.install_case_mode(CaseMode::Static);
            s.set_case_static_color(Color::new(0, 255, 0));
            s.tick(Channel::Case);
        });
        sleep(PERIOD * 5).await;
        assert_eq!(recording.frames.lock().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_transport_ends_task() {
        let handle = spawn(Unplugged, SharedState::default(), PERIOD);
        sleep(PERIOD).await;
        assert!(handle.is_finished());
        assert!(handle.terminate().await.is_some());
    }
}
