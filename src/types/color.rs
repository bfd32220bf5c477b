// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type with argument, hex and name parsing.
//!
//! [`Color`] is the value every mode produces: the case LED color and the
//! LCD backlight color are both plain 8-bit RGB triples.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Named colors accepted on the command line.
const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::new(0, 0, 0)),
    ("blue", Color::new(0, 0, 255)),
    ("cyan", Color::new(0, 255, 255)),
    ("darkgray", Color::new(64, 64, 64)),
    ("gray", Color::new(128, 128, 128)),
    ("green", Color::new(0, 255, 0)),
    ("lightgray", Color::new(192, 192, 192)),
    ("magenta", Color::new(255, 0, 255)),
    ("orange", Color::new(255, 200, 0)),
    ("pink", Color::new(255, 175, 175)),
    ("red", Color::new(255, 0, 0)),
    ("white", Color::new(255, 255, 255)),
    ("yellow", Color::new(255, 255, 0)),
];

/// RGB color with 8-bit channels (0-255).
///
/// # Examples
///
/// ```
/// use casectl::types::Color;
///
/// let color = Color::new(255, 128, 0);
/// assert_eq!(color.red(), 255);
/// assert_eq!(color.to_string(), "(255, 128, 0)");
///
/// let red = Color::from_hex("#FF0000").unwrap();
/// assert_eq!(red, Color::named("red").unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Pure black, the output of every "off" mode.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses a color from command arguments.
    ///
    /// Three arguments are read as red, green and blue channels. A single
    /// argument is looked up as a color name first, then parsed as hex.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if the arguments do not describe a color.
    ///
    /// # Examples
    ///
    /// ```
    /// use casectl::types::Color;
    ///
    /// let args = ["0".to_string(), "128".to_string(), "255".to_string()];
    /// assert_eq!(Color::from_args(&args).unwrap(), Color::new(0, 128, 255));
    ///
    /// let args = ["Cyan".to_string()];
    /// assert_eq!(Color::from_args(&args).unwrap(), Color::new(0, 255, 255));
    /// ```
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, ValueError> {
        match args {
            [single] => single.as_ref().parse(),
            [r, g, b] => Ok(Self::new(
                parse_channel(r.as_ref())?,
                parse_channel(g.as_ref())?,
                parse_channel(b.as_ref())?,
            )),
            _ => Err(ValueError::ColorArity(args.len())),
        }
    }

    /// Looks up a named color, ignoring case.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        NAMED_COLORS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, color)| *color)
    }

    /// Parses an RGB color from a hex string.
    ///
    /// Accepts formats: `#RRGGBB`, `RRGGBB`, `0xRRGGBB`, `#RGB`, `RGB`
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if the hex string is invalid.
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        let hex = hex
            .strip_prefix('#')
            .or_else(|| hex.strip_prefix("0x"))
            .unwrap_or(hex);

        if !hex.is_ascii() {
            return Err(ValueError::InvalidHexColor(hex.to_string()));
        }

        match hex.len() {
            3 => {
                // Short format: RGB -> RRGGBB
                let mut channels = [0u8; 3];
                for (channel, c) in channels.iter_mut().zip(hex.chars()) {
                    *channel = parse_hex_char(c)? * 17;
                }
                Ok(Self::new(channels[0], channels[1], channels[2]))
            }
            6 => Ok(Self::new(
                parse_hex_pair(&hex[0..2])?,
                parse_hex_pair(&hex[2..4])?,
                parse_hex_pair(&hex[4..6])?,
            )),
            _ => Err(ValueError::InvalidHexColor(hex.to_string())),
        }
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns the color as a hex string with the hash prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Linearly interpolates from `self` towards `other`.
    ///
    /// The blend position is `step / steps`; each channel is rounded to the
    /// nearest integer. A `steps` of zero returns `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use casectl::types::Color;
    ///
    /// let red = Color::new(255, 0, 0);
    /// let blue = Color::new(0, 0, 255);
    /// assert_eq!(red.lerp(blue, 5, 10), Color::new(128, 0, 128));
    /// assert_eq!(red.lerp(blue, 10, 10), blue);
    /// ```
    #[must_use]
    pub fn lerp(self, other: Self, step: u32, steps: u32) -> Self {
        if steps == 0 {
            return self;
        }
        let step = step.min(steps);
        let mix = |from: u8, to: u8| -> u8 {
            let weighted = u32::from(from) * (steps - step) + u32::from(to) * step;
            // Bounded by 255 since the weights sum to `steps`.
            u8::try_from((weighted + steps / 2) / steps).unwrap_or(u8::MAX)
        };
        Self::new(
            mix(self.red, other.red),
            mix(self.green, other.green),
            mix(self.blue, other.blue),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.red, self.green, self.blue)
    }
}

impl FromStr for Color {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(color) = Self::named(s) {
            return Ok(color);
        }
        Self::from_hex(s).map_err(|_| ValueError::UnknownColor(s.to_string()))
    }
}

fn parse_channel(s: &str) -> Result<u8, ValueError> {
    s.parse()
        .map_err(|_| ValueError::InvalidChannel(s.to_string()))
}

fn parse_hex_char(c: char) -> Result<u8, ValueError> {
    c.to_digit(16)
        .and_then(|d| u8::try_from(d).ok())
        .ok_or_else(|| ValueError::InvalidHexColor(c.to_string()))
}

fn parse_hex_pair(s: &str) -> Result<u8, ValueError> {
    u8::from_str_radix(s, 16).map_err(|_| ValueError::InvalidHexColor(s.to_string()))
}
