// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named fade color presets.

use std::collections::BTreeMap;

use crate::types::Color;

/// Named fade color lists.
///
/// Names are compared without regard to case: `Sunset` and `sunset` refer
/// to the same preset. Each preset keeps the spelling it was last saved
/// under.
///
/// # Examples
///
/// ```
/// use casectl::state::SavedFades;
/// use casectl::types::Color;
///
/// let mut saved = SavedFades::new();
/// saved.insert("Sunset", vec![Color::new(255, 100, 0)]);
/// assert!(saved.get("SUNSET").is_some());
/// assert_eq!(saved.iter().next().map(|(name, _)| name), Some("Sunset"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "BTreeMap<String, Vec<Color>>", into = "BTreeMap<String, Vec<Color>>")]
pub struct SavedFades {
    // Keyed by lowercased name.
    sets: BTreeMap<String, SavedFade>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SavedFade {
    name: String,
    colors: Vec<Color>,
}

impl SavedFades {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a preset, returning the colors it replaced.
    pub fn insert(&mut self, name: &str, colors: Vec<Color>) -> Option<Vec<Color>> {
        let fade = SavedFade {
            name: name.to_string(),
            colors,
        };
        self.sets.insert(lookup_key(name), fade).map(|old| old.colors)
    }

    /// Looks up a preset.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Color]> {
        self.sets
            .get(&lookup_key(name))
            .map(|fade| fade.colors.as_slice())
    }

    /// Removes a preset, returning its colors.
    pub fn remove(&mut self, name: &str) -> Option<Vec<Color>> {
        self.sets.remove(&lookup_key(name)).map(|fade| fade.colors)
    }

    /// Iterates presets in case-insensitive name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Color])> {
        self.sets
            .values()
            .map(|fade| (fade.name.as_str(), fade.colors.as_slice()))
    }

    /// Returns the number of presets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns `true` if there are no presets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl From<BTreeMap<String, Vec<Color>>> for SavedFades {
    fn from(raw: BTreeMap<String, Vec<Color>>) -> Self {
        let mut saved = Self::new();
        // Later duplicates (differing only in case) win.
        for (name, colors) in raw {
            saved.insert(&name, colors);
        }
        saved
    }
}

impl From<SavedFades> for BTreeMap<String, Vec<Color>> {
    fn from(saved: SavedFades) -> Self {
        saved
            .sets
            .into_values()
            .map(|fade| (fade.name, fade.colors))
            .collect()
    }
}

fn lookup_key(name: &str) -> String {
    name.to_lowercase()
}
