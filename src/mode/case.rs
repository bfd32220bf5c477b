// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Case LED modes.

use std::time::Duration;

use crate::error::ValueError;
use crate::types::{Color, FadeTicks};

use super::{Channel, ColorMode};

/// User-configured parameters for the case LEDs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseSettings {
    /// Color shown by [`CaseMode::Static`].
    pub static_color: Color,
    /// Colors cycled by [`CaseMode::Fade`], in order.
    pub fade_colors: Vec<Color>,
    /// Ticks per color-to-color transition.
    pub fade_ticks: FadeTicks,
}

/// Position within a fade cycle.
///
/// The position counts ticks since the start of the cycle and wraps at
/// `fade_ticks * fade_colors.len()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FadeProgress {
    position: u64,
}

impl FadeProgress {
    /// Returns the tick position within the current cycle.
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// Computes the color at the current position, then advances by one tick.
    #[allow(clippy::cast_possible_truncation)]
    fn advance(&mut self, settings: &CaseSettings) -> Color {
        let colors = &settings.fade_colors;
        if colors.is_empty() {
            self.position = 0;
            return Color::BLACK;
        }

        let ticks = u64::from(settings.fade_ticks.value());
        let cycle = ticks * colors.len() as u64;
        // The list may have shrunk since the last tick.
        let position = self.position % cycle;
        self.position = (position + 1) % cycle;

        // Safe: segment < colors.len() and step < ticks <= FadeTicks::MAX
        let segment = (position / ticks) as usize;
        let step = (position % ticks) as u32;
        let from = colors[segment];
        let to = colors[(segment + 1) % colors.len()];
        from.lerp(to, step, settings.fade_ticks.value())
    }
}

/// Mode for the case LEDs.
///
/// # Examples
///
/// ```
/// use casectl::mode::{CaseMode, CaseSettings, ColorMode};
/// use casectl::types::{Color, FadeTicks};
///
/// let settings = CaseSettings {
///     static_color: Color::new(0, 0, 0),
///     fade_colors: vec![Color::new(255, 0, 0), Color::new(0, 0, 255)],
///     fade_ticks: FadeTicks::clamped(10),
/// };
///
/// let mut mode = CaseMode::fade();
/// let first = mode.compute_color(&settings);
/// assert_eq!(first, Color::new(255, 0, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseMode {
    /// Always black.
    #[default]
    Off,
    /// The configured static color.
    Static,
    /// Loops through the fade colors.
    Fade(FadeProgress),
}

impl CaseMode {
    /// Mode names accepted by [`CaseMode::from_name`].
    pub const NAMES: [&'static str; 3] = ["off", "static", "fade"];

    /// Tick period of [`CaseMode::Off`].
    pub const OFF_PERIOD: Duration = Duration::from_millis(1000);

    /// Tick period of [`CaseMode::Static`].
    pub const STATIC_PERIOD: Duration = Duration::from_millis(100);

    /// Tick period of [`CaseMode::Fade`].
    pub const FADE_PERIOD: Duration = Duration::from_millis(30);

    /// Creates a fade mode at the start of its cycle.
    #[must_use]
    pub fn fade() -> Self {
        Self::Fade(FadeProgress::default())
    }

    /// Parses a mode name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownMode` for names other than
    /// `off`, `static` and `fade`.
    pub fn from_name(name: &str) -> Result<Self, ValueError> {
        match name.to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "static" => Ok(Self::Static),
            "fade" => Ok(Self::fade()),
            _ => Err(ValueError::UnknownMode {
                channel: Channel::Case,
                name: name.to_string(),
            }),
        }
    }
}

impl ColorMode for CaseMode {
    type Settings = CaseSettings;

    fn compute_color(&mut self, settings: &CaseSettings) -> Color {
        match self {
            Self::Off => Color::BLACK,
            Self::Static => settings.static_color,
            Self::Fade(progress) => progress.advance(settings),
        }
    }

    fn tick_period(&self) -> Duration {
        match self {
            Self::Off => Self::OFF_PERIOD,
            Self::Static => Self::STATIC_PERIOD,
            Self::Fade(_) => Self::FADE_PERIOD,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Static => "static",
            Self::Fade(_) => "fade",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::new(255, 0, 0);
    const BLUE: Color = Color::new(0, 0, 255);

    fn fade_settings(colors: Vec<Color>, ticks: u32) -> CaseSettings {
        CaseSettings {
            static_color: Color::BLACK,
            fade_colors: colors,
            fade_ticks: FadeTicks::clamped(ticks),
        }
    }

    fn run(mode: &mut CaseMode, settings: &CaseSettings, ticks: usize) -> Vec<Color> {
        (0..ticks).map(|_| mode.compute_color(settings)).collect()
    }

    #[test]
    fn off_is_black() {
        let settings = fade_settings(vec![RED], 10);
        assert_eq!(CaseMode::Off.compute_color(&settings), Color::BLACK);
    }

    #[test]
    fn static_uses_configured_color() {
        let mut settings = CaseSettings::default();
        settings.static_color = Color::new(1, 2, 3);
        assert_eq!(CaseMode::Static.compute_color(&settings), Color::new(1, 2, 3));
    }

    #[test]
    fn fade_with_empty_list_is_black() {
        let settings = fade_settings(vec![], 10);
        let mut mode = CaseMode::fade();
        assert!(run(&mut mode, &settings, 5).iter().all(|c| *c == Color::BLACK));
    }

    #[test]
    fn fade_single_color_is_constant() {
        let settings = fade_settings(vec![Color::new(10, 20, 30)], 10);
        let mut mode = CaseMode::fade();
        assert!(
            run(&mut mode, &settings, 45)
                .iter()
                .all(|c| *c == Color::new(10, 20, 30))
        );
    }

    #[test]
    fn fade_halfway_between_two_colors() {
        let settings = fade_settings(vec![RED, BLUE], 20);
        let mut mode = CaseMode::fade();
        let colors = run(&mut mode, &settings, 41);
        assert_eq!(colors[0], RED);
        assert_eq!(colors[10], Color::new(128, 0, 128));
        assert_eq!(colors[20], BLUE);
        assert_eq!(colors[30], Color::new(128, 0, 128));
        assert_eq!(colors[40], RED);
    }

    #[test]
    fn fade_is_periodic() {
        let settings = fade_settings(
            vec![RED, Color::new(0, 255, 0), BLUE, Color::new(30, 60, 90)],
            17,
        );
        let mut mode = CaseMode::fade();
        let cycle = 17 * 4;
        let colors = run(&mut mode, &settings, cycle * 2);
        assert_eq!(colors[..cycle], colors[cycle..]);
    }

    #[test]
    fn fade_progress_wraps_when_list_shrinks() {
        let mut settings = fade_settings(vec![RED, BLUE, Color::new(0, 255, 0)], 10);
        let mut mode = CaseMode::fade();
        run(&mut mode, &settings, 25);

        settings.fade_colors.truncate(1);
        assert_eq!(mode.compute_color(&settings), RED);
        let CaseMode::Fade(progress) = mode else {
            panic!("expected fade mode");
        };
        assert!(progress.position() < 10);
    }

    #[test]
    fn from_name_ignores_case() {
        assert_eq!(CaseMode::from_name("OFF").unwrap(), CaseMode::Off);
        assert_eq!(CaseMode::from_name("Static").unwrap(), CaseMode::Static);
        assert_eq!(CaseMode::from_name("fade").unwrap(), CaseMode::fade());
        assert!(CaseMode::from_name("strobe").is_err());
    }

    #[test]
    fn tick_period_depends_on_mode() {
        assert!(CaseMode::fade().tick_period() < CaseMode::Static.tick_period());
        assert!(CaseMode::Static.tick_period() < CaseMode::Off.tick_period());
    }

    #[test]
    fn names_round_trip() {
        for name in CaseMode::NAMES {
            assert_eq!(CaseMode::from_name(name).unwrap().name(), name);
        }
    }
}
