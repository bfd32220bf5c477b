// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fade tick count type for case color fades.
//!
//! The tick count is the number of scheduler ticks a fade spends moving
//! from one color to the next. It is always kept within
//! [`FadeTicks::MIN`]..=[`FadeTicks::MAX`]; values read from disk or typed
//! by the user are clamped rather than rejected.

use std::fmt;

/// Number of ticks per color-to-color fade transition (10-200).
///
/// # Examples
///
/// ```
/// use casectl::types::FadeTicks;
///
/// let ticks = FadeTicks::clamped(50);
/// assert_eq!(ticks.value(), 50);
///
/// assert_eq!(FadeTicks::clamped(1).value(), FadeTicks::MIN);
/// assert_eq!(FadeTicks::clamped(5000).value(), FadeTicks::MAX);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(from = "u32", into = "u32")]
pub struct FadeTicks(u32);

impl FadeTicks {
    /// Minimum tick count (fastest fade).
    pub const MIN: u32 = 10;

    /// Maximum tick count (slowest fade).
    pub const MAX: u32 = 200;

    /// Creates a tick count, clamping to the valid range.
    #[must_use]
    pub const fn clamped(value: u32) -> Self {
        if value < Self::MIN {
            Self(Self::MIN)
        } else if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    /// Returns the tick count.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl Default for FadeTicks {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for FadeTicks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FadeTicks {
    fn from(value: u32) -> Self {
        Self::clamped(value)
    }
}

impl From<FadeTicks> for u32 {
    fn from(ticks: FadeTicks) -> Self {
        ticks.0
    }
}
