// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output modes for the case LEDs and the LCD.
//!
//! A mode is a small strategy value that computes the next output of one
//! [`Channel`] each time the scheduler ticks. Each channel has a closed set
//! of modes:
//!
//! | Channel | Modes |
//! |---------|-------|
//! | [`Channel::Case`] | [`CaseMode::Off`], [`CaseMode::Static`], [`CaseMode::Fade`] |
//! | [`Channel::Lcd`] | [`LcdMode::Off`], [`LcdMode::Static`], [`LcdMode::Clock`] |
//!
//! Modes read their user-configured parameters ([`CaseSettings`],
//! [`LcdSettings`]) on every tick, so editing a fade list or the LCD color
//! takes effect without swapping the mode. Only the fade mode keeps state of
//! its own: its position in the fade cycle.
//!
//! # Examples
//!
//! ```
//! use casectl::mode::{CaseMode, CaseSettings, ColorMode};
//! use casectl::types::Color;
//!
//! let mut settings = CaseSettings::default();
//! settings.fade_colors = vec![Color::new(255, 0, 0)];
//!
//! let mut mode = CaseMode::fade();
//! assert_eq!(mode.compute_color(&settings), Color::new(255, 0, 0));
//! ```

mod big_text;
mod case;
mod lcd;

use std::fmt;
use std::time::Duration;

use crate::types::{Color, LcdText};

pub use big_text::{big_text, render_clock};
pub use case::{CaseMode, CaseSettings, FadeProgress};
pub use lcd::{LcdMode, LcdSettings};

/// One of the two independently driven outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// The case LED strip.
    Case,
    /// The LCD panel (backlight color and text).
    Lcd,
}

impl Channel {
    /// Both channels, in startup order.
    pub const ALL: [Self; 2] = [Self::Case, Self::Lcd];
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Case => write!(f, "case"),
            Self::Lcd => write!(f, "lcd"),
        }
    }
}

/// Capability shared by every mode: compute a color once per tick.
pub trait ColorMode {
    /// User-configured parameters the mode reads on each tick.
    type Settings;

    /// Computes the color for this tick.
    ///
    /// Called exactly once per scheduler tick; stateful modes advance here.
    fn compute_color(&mut self, settings: &Self::Settings) -> Color;

    /// How often the scheduler should tick this mode.
    fn tick_period(&self) -> Duration;

    /// The lowercase name used on the command line and on disk.
    fn name(&self) -> &'static str;
}

/// Modes that also produce LCD text.
pub trait TextMode: ColorMode {
    /// Computes the text buffer for this tick.
    fn compute_text(&mut self, settings: &Self::Settings) -> LcdText;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_display() {
        assert_eq!(Channel::Case.to_string(), "case");
        assert_eq!(Channel::Lcd.to_string(), "lcd");
    }

    #[test]
    fn channel_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Channel::Lcd).unwrap(), "\"lcd\"");
    }
}
