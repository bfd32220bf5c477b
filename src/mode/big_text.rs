// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Three-row "big text" rendering for the LCD clock.
//!
//! Big glyphs are drawn with five custom LCD characters loaded into the
//! display's character RAM (codes `0x00`-`0x04`) plus the built-in full
//! block (`0xFF`):
//!
//! | Code | Shape |
//! |------|-------|
//! | `0x00` | lower half, rounded right |
//! | `0x01` | lower half, rounded left |
//! | `0x02` | lower half |
//! | `0x03` | full, rounded bottom right |
//! | `0x04` | full, rounded bottom left |
//! | `0xFF` | full block |

use chrono::NaiveDateTime;

use crate::types::LcdText;

/// Rows in a big glyph.
const GLYPH_ROWS: usize = 3;

fn glyph(c: char) -> [&'static str; GLYPH_ROWS] {
    match c {
        '0' => ["\u{0}\u{2}\u{1}", "\u{ff} \u{ff}", "\u{3}\u{2}\u{4}"],
        '1' => ["\u{2}\u{1} ", " \u{ff} ", "\u{2}\u{ff}\u{2}"],
        '2' => ["\u{0}\u{2}\u{1}", "\u{0}\u{2}\u{4}", "\u{3}\u{2}\u{2}"],
        '3' => ["\u{0}\u{2}\u{1}", " \u{2}\u{ff}", "\u{2}\u{2}\u{4}"],
        '4' => ["\u{2} \u{2}", "\u{3}\u{2}\u{ff}", "  \u{ff}"],
        '5' => ["\u{2}\u{2}\u{2}", "\u{ff}\u{2}\u{1}", "\u{2}\u{2}\u{4}"],
        '6' => ["\u{0}\u{2}\u{1}", "\u{ff}\u{2}\u{1}", "\u{3}\u{2}\u{4}"],
        '7' => ["\u{2}\u{2}\u{2}", " \u{0}\u{4}", " \u{ff} "],
        '8' => ["\u{0}\u{2}\u{1}", "\u{ff}\u{2}\u{ff}", "\u{3}\u{2}\u{4}"],
        '9' => ["\u{0}\u{2}\u{1}", "\u{3}\u{2}\u{ff}", "  \u{ff}"],
        ':' => ["\u{ff}", " ", "\u{ff}"],
        _ => [" ", " ", " "],
    }
}

/// Renders `text` as three rows of big glyphs separated by one blank column.
///
/// Digits, `:` and spaces have glyphs; any other character renders blank.
///
/// # Examples
///
/// ```
/// use casectl::mode::big_text;
///
/// let rows = big_text("1:2");
/// assert_eq!(rows[1], " \u{ff}    \u{0}\u{2}\u{4}");
/// ```
#[must_use]
pub fn big_text(text: &str) -> [String; GLYPH_ROWS] {
    let mut rows: [String; GLYPH_ROWS] = Default::default();
    for (i, c) in text.chars().enumerate() {
        for (row, part) in rows.iter_mut().zip(glyph(c)) {
            if i > 0 {
                row.push(' ');
            }
            row.push_str(part);
        }
    }
    rows
}

/// Renders the clock screen: `HH:MM` in big glyphs on the first three rows
/// and the date on the last, all centered.
#[must_use]
pub fn render_clock(now: NaiveDateTime) -> LcdText {
    let [top, middle, bottom] = big_text(&now.format("%H:%M").to_string());
    let date = now.format("%a %d %b %Y").to_string();
    LcdText::from([top, middle, bottom, date].map(|row| center(&row)))
}

fn center(row: &str) -> String {
    format!("{row:^width$}", width = LcdText::WIDTH)
}
