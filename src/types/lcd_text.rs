// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed-geometry LCD text buffer.

use std::fmt;

use crate::error::ValueError;

/// Text buffer for the LCD: exactly [`LcdText::HEIGHT`] rows, each at most
/// [`LcdText::WIDTH`] characters.
///
/// Rows longer than the display are truncated when set.
///
/// # Examples
///
/// ```
/// use casectl::types::LcdText;
///
/// let mut text = LcdText::blank();
/// text.set_row(1, "hello").unwrap();
/// assert_eq!(text.row(1), Some("hello"));
/// assert_eq!(text.rows().len(), LcdText::HEIGHT);
/// assert!(text.set_row(LcdText::HEIGHT, "nope").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct LcdText {
    rows: Vec<String>,
}

impl LcdText {
    /// Characters per row.
    pub const WIDTH: usize = 20;

    /// Number of rows.
    pub const HEIGHT: usize = 4;

    /// Creates a buffer with every row empty.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            rows: vec![String::new(); Self::HEIGHT],
        }
    }

    /// Creates a buffer from one string per row.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::RowCount` if `rows` does not have exactly
    /// [`LcdText::HEIGHT`] entries.
    pub fn from_rows(rows: Vec<String>) -> Result<Self, ValueError> {
        if rows.len() != Self::HEIGHT {
            return Err(ValueError::RowCount {
                expected: Self::HEIGHT,
                actual: rows.len(),
            });
        }
        Ok(Self {
            rows: rows.iter().map(|row| truncate(row)).collect(),
        })
    }

    /// Replaces one row.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::IndexOutOfBounds` if `row` is not a display row.
    pub fn set_row(&mut self, row: usize, text: &str) -> Result<(), ValueError> {
        let len = self.rows.len();
        let slot = self
            .rows
            .get_mut(row)
            .ok_or(ValueError::IndexOutOfBounds { index: row, len })?;
        *slot = truncate(text);
        Ok(())
    }

    /// Returns one row, or `None` past the last row.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&str> {
        self.rows.get(row).map(String::as_str)
    }

    /// Returns all rows, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Empties every row.
    pub fn clear(&mut self) {
        self.rows.iter_mut().for_each(String::clear);
    }

    /// Returns `true` if every row is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(String::is_empty)
    }
}

impl Default for LcdText {
    fn default() -> Self {
        Self::blank()
    }
}

impl fmt::Display for LcdText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "|{row:<width$}|", width = Self::WIDTH)?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<String>> for LcdText {
    type Error = ValueError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<[String; LcdText::HEIGHT]> for LcdText {
    fn from(rows: [String; LcdText::HEIGHT]) -> Self {
        Self {
            rows: rows.iter().map(|row| truncate(row)).collect(),
        }
    }
}

impl From<LcdText> for Vec<String> {
    fn from(text: LcdText) -> Self {
        text.rows
    }
}

fn truncate(text: &str) -> String {
    text.chars().take(LcdText::WIDTH).collect()
}
