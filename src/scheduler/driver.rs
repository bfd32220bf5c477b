// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Driver task for one channel.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::mode::Channel;
use crate::state::SharedState;

/// Ticks `channel` every `period` until the channel's epoch moves past
/// `generation`.
///
/// The first tick fires one period after start; the immediate tick is run
/// by the scheduler before spawning the driver.
pub(super) async fn run(
    state: SharedState,
    channel: Channel,
    epoch: Arc<AtomicU64>,
    generation: u64,
    period: Duration,
) {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let mut guard = state.lock();
        if epoch.load(Ordering::Acquire) != generation {
            tracing::trace!(%channel, generation, "Driver superseded");
            break;
        }
        guard.tick(channel);
        tracing::trace!(%channel, generation, "Tick");
    }
}
