// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LCD modes.

use std::time::Duration;

use crate::error::ValueError;
use crate::types::{Color, LcdText};

use super::{Channel, ColorMode, TextMode, render_clock};

/// User-configured parameters for the LCD.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LcdSettings {
    /// Backlight color for every mode except [`LcdMode::Off`].
    pub color: Color,
    /// Text shown by [`LcdMode::Static`].
    pub text: LcdText,
}

/// Mode for the LCD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LcdMode {
    /// Backlight off, blank screen.
    #[default]
    Off,
    /// The configured color and text rows.
    Static,
    /// The configured color with the local time in large digits.
    Clock,
}

impl LcdMode {
    /// Mode names accepted by [`LcdMode::from_name`].
    pub const NAMES: [&'static str; 3] = ["off", "static", "clock"];

    /// Parses a mode name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownMode` for names other than
    /// `off`, `static` and `clock`.
    pub fn from_name(name: &str) -> Result<Self, ValueError> {
        match name.to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "static" => Ok(Self::Static),
            "clock" => Ok(Self::Clock),
            _ => Err(ValueError::UnknownMode {
                channel: Channel::Lcd,
                name: name.to_string(),
            }),
        }
    }
}

impl ColorMode for LcdMode {
    type Settings = LcdSettings;

    fn compute_color(&mut self, settings: &LcdSettings) -> Color {
        match self {
            Self::Off => Color::BLACK,
            Self::Static | Self::Clock => settings.color,
        }
    }

    fn tick_period(&self) -> Duration {
        match self {
            Self::Off => Duration::from_millis(1000),
            Self::Static => Duration::from_millis(100),
            Self::Clock => Duration::from_millis(250),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Static => "static",
            Self::Clock => "clock",
        }
    }
}

impl TextMode for LcdMode {
    fn compute_text(&mut self, settings: &LcdSettings) -> LcdText {
        match self {
            Self::Off => LcdText::blank(),
            Self::Static => settings.text.clone(),
            Self::Clock => render_clock(chrono::Local::now().naive_local()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> LcdSettings {
        let mut text = LcdText::blank();
        text.set_row(0, "hello").unwrap();
        LcdSettings {
            color: Color::new(0, 128, 255),
            text,
        }
    }

    #[test]
    fn off_is_dark_and_blank() {
        let mut mode = LcdMode::Off;
        assert_eq!(mode.compute_color(&settings()), Color::BLACK);
        assert!(mode.compute_text(&settings()).is_blank());
    }

    #[test]
    fn static_shows_configured_text() {
        let mut mode = LcdMode::Static;
        assert_eq!(mode.compute_color(&settings()), Color::new(0, 128, 255));
        assert_eq!(mode.compute_text(&settings()).row(0), Some("hello"));
    }

    #[test]
    fn clock_uses_lcd_color_and_fills_rows() {
        let mut mode = LcdMode::Clock;
        assert_eq!(mode.compute_color(&settings()), Color::new(0, 128, 255));
        let text = mode.compute_text(&settings());
        assert!(!text.is_blank());
        assert_eq!(text.rows().len(), LcdText::HEIGHT);
    }

    #[test]
    fn from_name() {
        assert_eq!(LcdMode::from_name("CLOCK").unwrap(), LcdMode::Clock);
        let err = LcdMode::from_name("fade").unwrap_err();
        assert_eq!(
            err,
            ValueError::UnknownMode {
                channel: Channel::Lcd,
                name: "fade".to_string()
            }
        );
    }
}
