// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Application state.

use std::time::Duration;

use crate::error::ValueError;
use crate::mode::{
    CaseMode, CaseSettings, Channel, ColorMode, LcdMode, LcdSettings, TextMode,
};
use crate::types::{Color, FadeTicks};

use super::{OutputFrame, SavedFades};

/// Everything the controller knows: active modes, their settings, saved
/// fade presets and the latest computed outputs.
///
/// Commands change settings and presets; scheduler ticks run the active
/// modes and store their results with [`tick`](Self::tick). Active modes are
/// only ever replaced whole, through the
/// [`ModeScheduler`](crate::scheduler::ModeScheduler).
///
/// # Examples
///
/// ```
/// use casectl::mode::Channel;
/// use casectl::state::ApplicationState;
/// use casectl::types::Color;
///
/// let mut state = ApplicationState::new();
/// assert_eq!(state.add_fade_color(Color::new(255, 0, 0)), 0);
/// assert_eq!(state.add_fade_color(Color::new(0, 0, 255)), 1);
///
/// state.set_case_static_color(Color::new(1, 2, 3));
/// state.tick(Channel::Case);
/// // The default case mode is off.
/// assert_eq!(state.outputs().case_color, Color::BLACK);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationState {
    /// Active case LED mode.
    case_mode: CaseMode,
    /// Case LED parameters.
    case: CaseSettings,
    /// Active LCD mode.
    lcd_mode: LcdMode,
    /// LCD parameters.
    lcd: LcdSettings,
    /// Named fade presets.
    saved_fades: SavedFades,
    /// Latest tick results.
    outputs: OutputFrame,
}

impl ApplicationState {
    /// Creates the default state: both channels off, no fade colors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a state from restored parts, with fresh outputs.
    pub(crate) fn from_parts(
        case_mode: CaseMode,
        case: CaseSettings,
        lcd_mode: LcdMode,
        lcd: LcdSettings,
        saved_fades: SavedFades,
    ) -> Self {
        Self {
            case_mode,
            case,
            lcd_mode,
            lcd,
            saved_fades,
            outputs: OutputFrame::default(),
        }
    }

    // ========== Case LEDs ==========

    /// Returns the active case mode.
    #[must_use]
    pub fn case_mode(&self) -> CaseMode {
        self.case_mode
    }

    /// Replaces the active case mode and returns its tick period.
    pub(crate) fn install_case_mode(&mut self, mode: CaseMode) -> Duration {
        self.case_mode = mode;
        mode.tick_period()
    }

    /// Returns the case LED parameters.
    #[must_use]
    pub fn case_settings(&self) -> &CaseSettings {
        &self.case
    }

    /// Sets the color shown by the static case mode.
    pub fn set_case_static_color(&mut self, color: Color) {
        self.case.static_color = color;
    }

    /// Returns the fade colors in order.
    #[must_use]
    pub fn fade_colors(&self) -> &[Color] {
        &self.case.fade_colors
    }

    /// Appends a fade color and returns its index.
    pub fn add_fade_color(&mut self, color: Color) -> usize {
        self.case.fade_colors.push(color);
        self.case.fade_colors.len() - 1
    }

    /// Removes the fade color at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::IndexOutOfBounds` if there is no such color.
    pub fn remove_fade_color(&mut self, index: usize) -> Result<Color, ValueError> {
        let len = self.case.fade_colors.len();
        if index >= len {
            return Err(ValueError::IndexOutOfBounds { index, len });
        }
        Ok(self.case.fade_colors.remove(index))
    }

    /// Removes every fade color. An active fade turns black.
    pub fn clear_fade_colors(&mut self) {
        self.case.fade_colors.clear();
    }

    /// Returns the fade tick count.
    #[must_use]
    pub fn fade_ticks(&self) -> FadeTicks {
        self.case.fade_ticks
    }

    /// Sets the fade tick count, clamping it, and returns the stored value.
    pub fn set_fade_ticks(&mut self, ticks: u32) -> FadeTicks {
        self.case.fade_ticks = FadeTicks::clamped(ticks);
        self.case.fade_ticks
    }

    // ========== Saved Fades ==========

    /// Returns the saved fade presets.
    #[must_use]
    pub fn saved_fades(&self) -> &SavedFades {
        &self.saved_fades
    }

    /// Saves the current fade colors under `name`.
    ///
    /// Returns `true` if an existing preset was overwritten.
    pub fn save_fade(&mut self, name: &str) -> bool {
        self.saved_fades
            .insert(name, self.case.fade_colors.clone())
            .is_some()
    }

    /// Replaces the current fade colors with the preset `name`.
    ///
    /// Returns the number of colors loaded, or `None` if there is no such
    /// preset.
    pub fn load_fade(&mut self, name: &str) -> Option<usize> {
        let colors = self.saved_fades.get(name)?.to_vec();
        self.case.fade_colors = colors;
        Some(self.case.fade_colors.len())
    }

    /// Deletes the preset `name`. Returns `false` if it did not exist.
    pub fn delete_fade(&mut self, name: &str) -> bool {
        self.saved_fades.remove(name).is_some()
    }

    // ========== LCD ==========

    /// Returns the active LCD mode.
    #[must_use]
    pub fn lcd_mode(&self) -> LcdMode {
        self.lcd_mode
    }

    /// Replaces the active LCD mode and returns its tick period.
    pub(crate) fn install_lcd_mode(&mut self, mode: LcdMode) -> Duration {
        self.lcd_mode = mode;
        mode.tick_period()
    }

    /// Returns the LCD parameters.
    #[must_use]
    pub fn lcd_settings(&self) -> &LcdSettings {
        &self.lcd
    }

    /// Sets the LCD backlight color. The LCD mode is left unchanged.
    pub fn set_lcd_color(&mut self, color: Color) {
        self.lcd.color = color;
    }

    /// Sets one row of the static LCD text.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::IndexOutOfBounds` if `row` is not a display row.
    pub fn set_lcd_row(&mut self, row: usize, text: &str) -> Result<(), ValueError> {
        self.lcd.text.set_row(row, text)
    }

    /// Blanks the static LCD text.
    pub fn clear_lcd_text(&mut self) {
        self.lcd.text.clear();
    }

    // ========== Ticks ==========

    /// Runs the active mode of `channel` once and stores its output.
    ///
    /// The LCD color and text are written together.
    pub fn tick(&mut self, channel: Channel) {
        match channel {
            Channel::Case => {
                self.outputs.case_color = self.case_mode.compute_color(&self.case);
            }
            Channel::Lcd => {
                let color = self.lcd_mode.compute_color(&self.lcd);
                let text = self.lcd_mode.compute_text(&self.lcd);
                self.outputs.lcd_color = color;
                self.outputs.lcd_text = text;
            }
        }
    }

    /// Returns the latest computed outputs.
    #[must_use]
    pub fn outputs(&self) -> &OutputFrame {
        &self.outputs
    }

    /// Returns the tick period of the active mode of `channel`.
    #[must_use]
    pub fn tick_period(&self, channel: Channel) -> Duration {
        match channel {
            Channel::Case => self.case_mode.tick_period(),
            Channel::Lcd => self.lcd_mode.tick_period(),
        }
    }
}
