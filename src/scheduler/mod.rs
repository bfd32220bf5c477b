// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic mode drivers.
//!
//! The [`ModeScheduler`] runs one driver task per [`Channel`]. A driver
//! ticks the channel's active mode at the mode's own period and stores the
//! result in the shared [`ApplicationState`](crate::state::ApplicationState).
//!
//! Each channel is a small state machine:
//!
//! ```text
//!            start()              restart(mode)
//! Stopped ────────────▶ Running ◀──────────────┐
//!    ▲                    │  └─────────────────┘
//!    └──── stop() ────────┘
//! ```
//!
//! # Quiescence
//!
//! Every driver carries the epoch it was started in. `restart` and `stop`
//! bump the channel's epoch while holding the state lock, and a driver only
//! writes a tick after checking its epoch under that same lock. A tick that
//! was already running when `restart` was called has therefore finished
//! before the new mode is installed, and any later wake-up of the old
//! driver is discarded. Once `restart` returns, no output can come from the
//! previous mode.

mod driver;

use std::mem;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::error::SchedulerError;
use crate::mode::{CaseMode, Channel, LcdMode};
use crate::state::{ApplicationState, SharedState};

/// Observable state of one channel's driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStatus {
    /// No driver is running.
    Stopped,
    /// A driver ticks the active mode every `period`.
    Running {
        /// Tick period of the running driver.
        period: Duration,
    },
}

#[derive(Debug)]
enum DriverState {
    Stopped,
    Running {
        period: Duration,
        handle: JoinHandle<()>,
    },
}

#[derive(Debug)]
struct ChannelSlot {
    epoch: Arc<AtomicU64>,
    driver: DriverState,
}

impl ChannelSlot {
    fn new() -> Self {
        Self {
            epoch: Arc::new(AtomicU64::new(0)),
            driver: DriverState::Stopped,
        }
    }

    /// Takes the running driver, if any, and aborts it.
    fn take_aborted(&mut self) -> Option<JoinHandle<()>> {
        match mem::replace(&mut self.driver, DriverState::Stopped) {
            DriverState::Running { handle, .. } => {
                handle.abort();
                Some(handle)
            }
            DriverState::Stopped => None,
        }
    }
}

/// Drives the case and LCD modes.
///
/// Must be used from within a Tokio runtime: starting a driver spawns a
/// task.
///
/// # Examples
///
/// ```
/// use casectl::mode::{CaseMode, Channel};
/// use casectl::scheduler::ModeScheduler;
/// use casectl::state::SharedState;
/// use casectl::types::Color;
///
/// #[tokio::main]
/// async fn main() {
///     let state = SharedState::default();
///     state.update(|s| s.set_case_static_color(Color::new(0, 255, 0)));
///
///     let scheduler = ModeScheduler::new(state.clone());
///     scheduler.start(Channel::Case).unwrap();
///
///     // The new mode's first output is visible as soon as restart returns.
///     scheduler.restart_case(CaseMode::Static);
///     assert_eq!(state.snapshot().case_color, Color::new(0, 255, 0));
///
///     scheduler.stop().await;
/// }
/// ```
#[derive(Debug)]
pub struct ModeScheduler {
    state: SharedState,
    case: Mutex<ChannelSlot>,
    lcd: Mutex<ChannelSlot>,
}

impl ModeScheduler {
    /// Creates a scheduler with both channels stopped.
    #[must_use]
    pub fn new(state: SharedState) -> Self {
        Self {
            state,
            case: Mutex::new(ChannelSlot::new()),
            lcd: Mutex::new(ChannelSlot::new()),
        }
    }

    fn slot(&self, channel: Channel) -> &Mutex<ChannelSlot> {
        match channel {
            Channel::Case => &self.case,
            Channel::Lcd => &self.lcd,
        }
    }

    /// Starts ticking the active mode of `channel`.
    ///
    /// The mode is ticked once before this returns, then every period.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::AlreadyRunning` if the channel already has a
    /// driver; use [`restart_case`](Self::restart_case) or
    /// [`restart_lcd`](Self::restart_lcd) to replace it.
    pub fn start(&self, channel: Channel) -> Result<(), SchedulerError> {
        let mut slot = self.slot(channel).lock();
        if matches!(slot.driver, DriverState::Running { .. }) {
            return Err(SchedulerError::AlreadyRunning(channel));
        }
        self.launch(channel, &mut slot, |state| state.tick_period(channel));
        Ok(())
    }

    /// Starts both channels that are not already running.
    pub fn start_all(&self) {
        for channel in Channel::ALL {
            if let Err(e) = self.start(channel) {
                tracing::debug!(error = %e, "Skipping channel start");
            }
        }
    }

    /// Replaces the case mode and restarts its driver.
    pub fn restart_case(&self, mode: CaseMode) {
        let mut slot = self.case.lock();
        self.launch(Channel::Case, &mut slot, |state| {
            state.install_case_mode(mode)
        });
    }

    /// Replaces the LCD mode and restarts its driver.
    pub fn restart_lcd(&self, mode: LcdMode) {
        let mut slot = self.lcd.lock();
        self.launch(Channel::Lcd, &mut slot, |state| state.install_lcd_mode(mode));
    }

    /// Installs a mode through `install`, ticks it once, and replaces the
    /// channel's driver with one for the new epoch.
    fn launch(
        &self,
        channel: Channel,
        slot: &mut ChannelSlot,
        install: impl FnOnce(&mut ApplicationState) -> Duration,
    ) {
        let (epoch, period) = {
            let mut state = self.state.lock();
            let epoch = slot.epoch.fetch_add(1, Ordering::AcqRel) + 1;
            let period = install(&mut *state);
            state.tick(channel);
            (epoch, period)
        };

        if slot.take_aborted().is_some() {
            tracing::debug!(%channel, epoch, "Replaced running driver");
        }

        let handle = tokio::spawn(driver::run(
            self.state.clone(),
            channel,
            Arc::clone(&slot.epoch),
            epoch,
            period,
        ));
        slot.driver = DriverState::Running { period, handle };

        tracing::debug!(%channel, epoch, period_ms = period.as_millis(), "Driver started");
    }

    /// Stops both drivers and waits for their tasks to finish.
    pub async fn stop(&self) {
        let handles: Vec<_> = Channel::ALL
            .into_iter()
            .filter_map(|channel| {
                let mut slot = self.slot(channel).lock();
                {
                    let _state = self.state.lock();
                    slot.epoch.fetch_add(1, Ordering::AcqRel);
                }
                slot.take_aborted()
            })
            .collect();

        for handle in handles {
            if let Err(e) = handle.await
                && !e.is_cancelled()
            {
                tracing::warn!(error = %e, "Mode driver ended abnormally");
            }
        }

        tracing::debug!("Mode drivers stopped");
    }

    /// Returns the driver status of `channel`.
    #[must_use]
    pub fn status(&self, channel: Channel) -> DriverStatus {
        match self.slot(channel).lock().driver {
            DriverState::Stopped => DriverStatus::Stopped,
            DriverState::Running { period, .. } => DriverStatus::Running { period },
        }
    }
}

impl Drop for ModeScheduler {
    fn drop(&mut self) {
        for slot in [&self.case, &self.lcd] {
            slot.lock().take_aborted();
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::sleep;

    use super::*;
    use crate::types::Color;

    const RED: Color = Color::new(255, 0, 0);
    const GREEN: Color = Color::new(0, 255, 0);
    const BLUE: Color = Color::new(0, 0, 255);

    fn fading_state() -> SharedState {
        let state = SharedState::default();
        state.update(|s| {
            s.install_case_mode(CaseMode::fade());
            s.add_fade_color(RED);
            s.add_fade_color(BLUE);
            s.set_fade_ticks(10);
        });
        state
    }

    /// Sleeps past `ticks` tick boundaries, landing between two boundaries.
    async fn pass_ticks(period: Duration, ticks: u32) {
        sleep(period / 2).await;
        for _ in 0..ticks {
            sleep(period).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn start_ticks_immediately_then_periodically() {
        let state = fading_state();
        let scheduler = ModeScheduler::new(state.clone());

        scheduler.start(Channel::Case).unwrap();
        assert_eq!(state.snapshot().case_color, RED);

        pass_ticks(CaseMode::FADE_PERIOD, 5).await;
        assert_eq!(state.snapshot().case_color, Color::new(128, 0, 128));

        scheduler.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn full_cycle_returns_to_first_color() {
        let state = fading_state();
        let scheduler = ModeScheduler::new(state.clone());

        scheduler.start(Channel::Case).unwrap();
        pass_ticks(CaseMode::FADE_PERIOD, 20).await;
        assert_eq!(state.snapshot().case_color, RED);

        scheduler.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn start_twice_is_rejected() {
        let scheduler = ModeScheduler::new(SharedState::default());
        scheduler.start(Channel::Lcd).unwrap();
        assert_eq!(
            scheduler.start(Channel::Lcd),
            Err(SchedulerError::AlreadyRunning(Channel::Lcd))
        );
        scheduler.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn restart_installs_new_mode_before_returning() {
        let state = SharedState::default();
        state.update(|s| {
            s.install_case_mode(CaseMode::Static);
            s.set_case_static_color(GREEN);
        });
        let scheduler = ModeScheduler::new(state.clone());
        scheduler.start(Channel::Case).unwrap();
        assert_eq!(state.snapshot().case_color, GREEN);

        scheduler.restart_case(CaseMode::Off);
        assert_eq!(state.snapshot().case_color, Color::BLACK);
        assert_eq!(state.read(ApplicationState::case_mode), CaseMode::Off);
        assert_eq!(
            scheduler.status(Channel::Case),
            DriverStatus::Running {
                period: CaseMode::OFF_PERIOD
            }
        );

        // The old static driver must never write again.
        for _ in 0..10 {
            sleep(CaseMode::STATIC_PERIOD).await;
            assert_eq!(state.snapshot().case_color, Color::BLACK);
        }

        scheduler.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn restart_from_stopped_starts_driver() {
        let state = fading_state();
        let scheduler = ModeScheduler::new(state.clone());
        assert_eq!(scheduler.status(Channel::Case), DriverStatus::Stopped);

        scheduler.restart_case(CaseMode::fade());
        assert_eq!(state.snapshot().case_color, RED);
        assert!(matches!(
            scheduler.status(Channel::Case),
            DriverStatus::Running { .. }
        ));

        scheduler.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_quiesces_both_channels() {
        let state = SharedState::default();
        state.update(|s| {
            s.install_case_mode(CaseMode::Static);
            s.set_case_static_color(GREEN);
        });
        let scheduler = ModeScheduler::new(state.clone());
        scheduler.start_all();

        scheduler.stop().await;
        assert_eq!(scheduler.status(Channel::Case), DriverStatus::Stopped);
        assert_eq!(scheduler.status(Channel::Lcd), DriverStatus::Stopped);

        state.update(|s| s.set_case_static_color(BLUE));
        sleep(CaseMode::STATIC_PERIOD * 5).await;
        assert_eq!(state.snapshot().case_color, GREEN);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn restart_quiesces_live_drivers_across_threads() {
        let state = fading_state();
        state.update(|s| s.set_case_static_color(GREEN));
        let scheduler = ModeScheduler::new(state.clone());
        scheduler.start_all();

        let contention = {
            let state = state.clone();
            tokio::spawn(async move {
                loop {
                    state.update(|s| s.tick(Channel::Lcd));
                    tokio::task::yield_now().await;
                }
            })
        };

        let mut violations = 0;
        for round in 0..100_u64 {
            scheduler.restart_case(CaseMode::fade());
            sleep(Duration::from_millis(round % 35)).await;

            scheduler.restart_case(CaseMode::Off);
            if state.snapshot().case_color != Color::BLACK {
                violations += 1;
            }

            scheduler.restart_case(CaseMode::Static);
            for _ in 0..3 {
                if state.snapshot().case_color != GREEN {
                    violations += 1;
                }
                sleep(Duration::from_millis(1)).await;
            }
        }

        contention.abort();
        scheduler.stop().await;
        assert_eq!(violations, 0);
        assert_eq!(state.snapshot().case_color, GREEN);
    }

    #[tokio::test(start_paused = true)]
    async fn lcd_driver_writes_color_and_text_together() {
        let state = SharedState::default();
        state.update(|s| {
            s.set_lcd_color(BLUE);
            s.set_lcd_row(0, "hello").unwrap();
        });
        let scheduler = ModeScheduler::new(state.clone());
        scheduler.start(Channel::Lcd).unwrap();
        assert!(state.snapshot().lcd_text.is_blank());

        scheduler.restart_lcd(LcdMode::Static);
        let frame = state.snapshot();
        assert_eq!(frame.lcd_color, BLUE);
        assert_eq!(frame.lcd_text.row(0), Some("hello"));

        scheduler.stop().await;
    }
}
