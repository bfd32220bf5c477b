// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Versioned on-disk schema.
//!
//! The data file is a JSON object whose `version` field is checked before
//! anything else is decoded. A file with any other version is never merged
//! into the running state.
//!
//! ```json
//! {
//!   "version": 1,
//!   "case": { "mode": "fade", "static_color": {...}, "fade_colors": [...] },
//!   "lcd": { "mode": "clock", "color": {...}, "text": ["", "", "", ""] },
//!   "saved_fades": { "Police": [...] },
//!   "fade_ticks": 40
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::mode::{CaseMode, CaseSettings, LcdMode, LcdSettings};
use crate::state::{ApplicationState, SavedFades};
use crate::types::{Color, FadeTicks, LcdText};

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

/// Persisted case mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseModeTag {
    /// [`CaseMode::Off`].
    #[default]
    Off,
    /// [`CaseMode::Static`].
    Static,
    /// [`CaseMode::Fade`], restarted from the beginning of its cycle.
    Fade,
}

impl From<CaseMode> for CaseModeTag {
    fn from(mode: CaseMode) -> Self {
        match mode {
            CaseMode::Off => Self::Off,
            CaseMode::Static => Self::Static,
            CaseMode::Fade(_) => Self::Fade,
        }
    }
}

impl From<CaseModeTag> for CaseMode {
    fn from(tag: CaseModeTag) -> Self {
        match tag {
            CaseModeTag::Off => Self::Off,
            CaseModeTag::Static => Self::Static,
            CaseModeTag::Fade => Self::fade(),
        }
    }
}

/// Persisted LCD mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LcdModeTag {
    /// [`LcdMode::Off`].
    #[default]
    Off,
    /// [`LcdMode::Static`].
    Static,
    /// [`LcdMode::Clock`].
    Clock,
}

impl From<LcdMode> for LcdModeTag {
    fn from(mode: LcdMode) -> Self {
        match mode {
            LcdMode::Off => Self::Off,
            LcdMode::Static => Self::Static,
            LcdMode::Clock => Self::Clock,
        }
    }
}

impl From<LcdModeTag> for LcdMode {
    fn from(tag: LcdModeTag) -> Self {
        match tag {
            LcdModeTag::Off => Self::Off,
            LcdModeTag::Static => Self::Static,
            LcdModeTag::Clock => Self::Clock,
        }
    }
}

/// Persisted case LED mode and parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Active mode.
    pub mode: CaseModeTag,
    /// Color of the static mode.
    pub static_color: Color,
    /// Fade colors in order.
    pub fade_colors: Vec<Color>,
}

/// Persisted LCD mode and parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcdRecord {
    /// Active mode.
    pub mode: LcdModeTag,
    /// Backlight color.
    pub color: Color,
    /// Static text rows.
    pub text: LcdText,
}

/// Everything that survives a restart.
///
/// Computed outputs and fade progress are not persisted; they are rebuilt
/// by the first ticks after startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Schema version; always [`SCHEMA_VERSION`] when written.
    pub version: u32,
    /// Case LED record.
    pub case: CaseRecord,
    /// LCD record.
    pub lcd: LcdRecord,
    /// Named fade presets.
    #[serde(default)]
    pub saved_fades: SavedFades,
    /// Ticks per fade transition.
    pub fade_ticks: FadeTicks,
}

impl PersistedState {
    /// Decodes a data file, checking the version tag first.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::IncompatibleSchema` if the version tag is
    /// missing or not [`SCHEMA_VERSION`], and `PersistenceError::Corrupt` if
    /// the contents are not valid JSON for this schema.
    pub fn decode(contents: &str) -> Result<Self, PersistenceError> {
        let value: serde_json::Value = serde_json::from_str(contents)?;
        let found = value.get("version").and_then(serde_json::Value::as_u64);
        if found != Some(u64::from(SCHEMA_VERSION)) {
            return Err(PersistenceError::IncompatibleSchema {
                found,
                expected: SCHEMA_VERSION,
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Encodes as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Corrupt` if serialization fails.
    pub fn encode(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for PersistedState {
    fn default() -> Self {
        Self::from(&ApplicationState::default())
    }
}

impl From<&ApplicationState> for PersistedState {
    fn from(state: &ApplicationState) -> Self {
        let case = state.case_settings();
        let lcd = state.lcd_settings();
        Self {
            version: SCHEMA_VERSION,
            case: CaseRecord {
                mode: state.case_mode().into(),
                static_color: case.static_color,
                fade_colors: case.fade_colors.clone(),
            },
            lcd: LcdRecord {
                mode: state.lcd_mode().into(),
                color: lcd.color,
                text: lcd.text.clone(),
            },
            saved_fades: state.saved_fades().clone(),
            fade_ticks: case.fade_ticks,
        }
    }
}

impl From<PersistedState> for ApplicationState {
    fn from(persisted: PersistedState) -> Self {
        Self::from_parts(
            persisted.case.mode.into(),
            CaseSettings {
                static_color: persisted.case.static_color,
                fade_colors: persisted.case.fade_colors,
                fade_ticks: persisted.fade_ticks,
            },
            persisted.lcd.mode.into(),
            LcdSettings {
                color: persisted.lcd.color,
                text: persisted.lcd.text,
            },
            persisted.saved_fades,
        )
    }
}
