// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Application state management types.
//!
//! [`ApplicationState`] holds the active modes, their settings, saved fade
//! presets and the latest computed outputs. It is shared between the command
//! loop, the scheduler and the transport through [`SharedState`].
//!
//! # Examples
//!
//! ```
//! use casectl::state::{ApplicationState, SharedState};
//! use casectl::types::Color;
//!
//! let shared = SharedState::new(ApplicationState::new());
//! shared.update(|state| state.set_lcd_color(Color::new(0, 0, 255)));
//!
//! let color = shared.read(|state| state.lcd_settings().color);
//! assert_eq!(color, Color::new(0, 0, 255));
//! ```

mod app_state;
mod output;
mod saved_fades;
mod shared;

pub use app_state::ApplicationState;
pub use output::OutputFrame;
pub use saved_fades::SavedFades;
pub use shared::SharedState;
