// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared handle to the application state.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::{ApplicationState, OutputFrame};

/// Cloneable handle to the single [`ApplicationState`].
///
/// The command loop, both scheduler drivers, the transport and the
/// persistence snapshotting all go through this one lock. Ticks compute and
/// store their result while holding it, and readers copy out what they need
/// while holding it, so nobody ever observes a half-applied tick.
///
/// The lock is a `parking_lot::Mutex`; it must never be held across an
/// `.await`.
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Arc<Mutex<ApplicationState>>,
}

impl SharedState {
    /// Wraps a state for sharing.
    #[must_use]
    pub fn new(state: ApplicationState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Locks the state.
    pub fn lock(&self) -> MutexGuard<'_, ApplicationState> {
        self.inner.lock()
    }

    /// Runs `f` with shared access to the state.
    pub fn read<R>(&self, f: impl FnOnce(&ApplicationState) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Runs `f` with exclusive access to the state.
    pub fn update<R>(&self, f: impl FnOnce(&mut ApplicationState) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Copies the latest outputs of both channels.
    #[must_use]
    pub fn snapshot(&self) -> OutputFrame {
        self.inner.lock().outputs().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn clones_share_state() {
        let shared = SharedState::default();
        let other = shared.clone();
        other.update(|state| state.add_fade_color(Color::new(1, 1, 1)));
        assert_eq!(shared.read(|state| state.fade_colors().len()), 1);
    }

    #[test]
    fn snapshot_copies_outputs() {
        let shared = SharedState::default();
        assert_eq!(shared.snapshot(), OutputFrame::default());
    }
}
