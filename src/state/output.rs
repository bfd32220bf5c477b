// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Computed outputs, as read by the transport.

use crate::types::{Color, LcdText};

/// The latest computed outputs of both channels.
///
/// A frame is always copied out of the shared state in one piece, so the
/// LCD color and text in a frame were produced by the same tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputFrame {
    /// Current case LED color.
    pub case_color: Color,
    /// Current LCD backlight color.
    pub lcd_color: Color,
    /// Current LCD text.
    pub lcd_text: LcdText,
}
