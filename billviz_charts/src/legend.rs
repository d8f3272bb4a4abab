// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive legend state.
//!
//! A legend entry supports two gestures:
//! - **toggle** (click the swatch): hide or show one series, and
//! - **solo** (click the label): show only this series, or, if it is already the only visible
//!   one, show everything again.
//!
//! The hidden set is pure view state. It never feeds back into the series data, and it is kept
//! across data refreshes: hidden keys that no longer name a series are simply ignored.

use hashbrown::HashSet;
use peniko::Color;

use crate::palette;

/// The set of hidden series keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegendState {
    hidden: HashSet<String>,
}

impl LegendState {
    /// Create a state with every series visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hides `key` if it is visible, shows it otherwise.
    pub fn toggle(&mut self, key: &str) {
        if !self.hidden.remove(key) {
            self.hidden.insert(key.to_owned());
        }
    }

    /// Shows only `key`; if `key` is already the only visible series, shows all series instead.
    ///
    /// "Only visible" is judged against `series_keys`: the hidden set must be exactly every series
    /// key except `key`. A hidden set carrying stale keys from an earlier series list therefore
    /// does not count, and the call solos `key`.
    pub fn solo(&mut self, key: &str, series_keys: &[String]) {
        if self.is_solo(key, series_keys) {
            self.hidden.clear();
        } else {
            self.hidden = series_keys
                .iter()
                .filter(|k| k.as_str() != key)
                .cloned()
                .collect();
        }
    }

    /// Returns `true` if the hidden set is exactly every series key except `key`.
    pub fn is_solo(&self, key: &str, series_keys: &[String]) -> bool {
        let others: HashSet<&str> = series_keys
            .iter()
            .map(String::as_str)
            .filter(|&k| k != key)
            .collect();
        self.hidden.len() == others.len() && others.iter().all(|k| self.hidden.contains(*k))
    }

    /// Returns `true` if `key` is hidden.
    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden.contains(key)
    }

    /// Returns the visible keys among `series_keys`, in order.
    pub fn visible_keys<'a>(&self, series_keys: &'a [String]) -> Vec<&'a str> {
        series_keys
            .iter()
            .map(String::as_str)
            .filter(|k| !self.is_hidden(k))
            .collect()
    }

    /// Returns `true` if no key is hidden.
    pub fn all_visible(&self) -> bool {
        self.hidden.is_empty()
    }

    /// Iterates over hidden keys in unspecified order.
    pub fn hidden(&self) -> impl Iterator<Item = &str> {
        self.hidden.iter().map(String::as_str)
    }

    /// Shows every series.
    pub fn reset(&mut self) {
        self.hidden.clear();
    }
}

/// A legend row for one series.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// Series key, passed back to [`LegendState::toggle`] / [`LegendState::solo`].
    pub key: String,
    /// Display label.
    pub label: String,
    /// The series fill.
    pub fill: Color,
    /// Whether the series is currently hidden.
    pub hidden: bool,
}

impl LegendItem {
    /// Swatch color: the series fill, or a muted gray while hidden.
    pub fn swatch(&self) -> Color {
        if self.hidden {
            palette::hidden_fill()
        } else {
            self.fill
        }
    }

    /// Hint for the swatch button.
    pub fn toggle_hint(&self) -> &'static str {
        if self.hidden { "Show" } else { "Hide" }
    }
}
