// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Background writer for state snapshots.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::PersistenceError;

use super::{PersistedState, StateStore};

/// Saves snapshots off the command loop.
///
/// Snapshots are queued without blocking. The worker writes only the newest
/// queued snapshot, on the blocking thread pool, so a slow disk never
/// delays commands or ticks. Save failures are logged and otherwise
/// ignored.
#[derive(Debug)]
pub struct PersistenceWorker {
    sender: mpsc::UnboundedSender<PersistedState>,
    handle: JoinHandle<()>,
}

impl PersistenceWorker {
    /// Spawns the worker on the current runtime.
    #[must_use]
    pub fn spawn(store: StateStore) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(store, receiver));
        Self { sender, handle }
    }

    /// Queues a snapshot for saving.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::WorkerStopped` if the worker has exited.
    pub fn submit(&self, snapshot: PersistedState) -> Result<(), PersistenceError> {
        self.sender
            .send(snapshot)
            .map_err(|_| PersistenceError::WorkerStopped)
    }

    /// Writes any queued snapshot and stops the worker.
    pub async fn shutdown(self) {
        drop(self.sender);
        if let Err(e) = self.handle.await {
            tracing::error!(error = %e, "Persistence worker failed");
        }
    }
}

async fn run(store: StateStore, mut receiver: mpsc::UnboundedReceiver<PersistedState>) {
    while let Some(mut latest) = receiver.recv().await {
        while let Ok(newer) = receiver.try_recv() {
            latest = newer;
        }

        let store = store.clone();
        match tokio::task::spawn_blocking(move || store.save(&latest)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "Failed to save state"),
            Err(e) => tracing::error!(error = %e, "State save task failed"),
        }
    }
    tracing::debug!("Persistence worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::LoadOutcome;
    use crate::state::ApplicationState;

    #[tokio::test]
    async fn shutdown_flushes_latest_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));
        let worker = PersistenceWorker::spawn(store.clone());

        let mut state = ApplicationState::new();
        for ticks in [20, 30, 40] {
            state.set_fade_ticks(ticks);
            worker.submit(PersistedState::from(&state)).unwrap();
        }
        worker.shutdown().await;

        let LoadOutcome::Loaded(loaded) = store.load().unwrap() else {
            panic!("state was not saved");
        };
        assert_eq!(loaded.fade_ticks().value(), 40);
    }

    #[tokio::test]
    async fn save_failures_do_not_stop_the_worker() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let worker = PersistenceWorker::spawn(StateStore::new(blocker.join("state.json")));

        worker.submit(PersistedState::default()).unwrap();
        tokio::task::yield_now().await;
        assert!(worker.submit(PersistedState::default()).is_ok());
        worker.shutdown().await;
    }
}
