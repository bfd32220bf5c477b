// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by modes, commands and persistence.
//!
//! # Types
//!
//! - [`Color`] - 8-bit RGB color, parsed from triples, hex or names
//! - [`FadeTicks`] - Ticks per fade transition (10-200, clamped)
//! - [`LcdText`] - LCD text buffer (20 columns by 4 rows)

mod color;
mod fade_ticks;
mod lcd_text;

pub use color::Color;
pub use fade_ticks::FadeTicks;
pub use lcd_text::LcdText;
