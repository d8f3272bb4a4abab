// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top-N series selection.

use crate::bucket::HourlyBuckets;

/// Default number of dedicated series before the rest are folded into [`OTHERS_KEY`].
pub const DEFAULT_MAX_SERIES: usize = 10;

/// Series key used for the sum of all folded groups.
pub const OTHERS_KEY: &str = "Others";

/// The outcome of ranking group keys by grand total.
///
/// `top` holds the dedicated series in rank order (highest grand total first). `folded` holds
/// every remaining key, also in rank order; when it is non-empty an [`OTHERS_KEY`] series is
/// emitted after the top keys.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesSelection {
    /// Dedicated series keys, highest grand total first.
    pub top: Vec<String>,
    /// Keys folded into the "Others" series.
    pub folded: Vec<String>,
    top_slots: Vec<usize>,
    folded_slots: Vec<usize>,
}

impl SeriesSelection {
    /// Returns `true` if an "Others" series is emitted.
    pub fn has_others(&self) -> bool {
        !self.folded.is_empty()
    }

    /// Returns the emitted series keys: the top keys followed by [`OTHERS_KEY`] when present.
    pub fn series_keys(&self) -> Vec<String> {
        let mut keys = self.top.clone();
        if self.has_others() {
            keys.push(OTHERS_KEY.to_owned());
        }
        keys
    }

    pub(crate) fn top_slots(&self) -> &[usize] {
        &self.top_slots
    }

    pub(crate) fn folded_slots(&self) -> &[usize] {
        &self.folded_slots
    }
}

/// Ranks group keys by their total across all hours and keeps the first `max_series`.
///
/// Ties are broken by first-seen order so repeated runs over the same input register series in the
/// same order. A group whose key happens to be the literal `"Others"` is ranked like any other
/// key.
pub fn select_top_n(buckets: &HourlyBuckets, max_series: usize) -> SeriesSelection {
    let totals = buckets.slot_grand_totals();
    let mut order: Vec<usize> = (0..totals.len()).collect();
    // `sort_by` is stable: equal totals keep first-seen order.
    order.sort_by(|&a, &b| totals[b].total_cmp(&totals[a]));

    let split = max_series.min(order.len());
    let (top_slots, folded_slots) = order.split_at(split);
    let keys = buckets.keys();
    let selection = SeriesSelection {
        top: top_slots.iter().map(|&s| keys[s].clone()).collect(),
        folded: folded_slots.iter().map(|&s| keys[s].clone()).collect(),
        top_slots: top_slots.to_vec(),
        folded_slots: folded_slots.to_vec(),
    };
    tracing::debug!(
        top = selection.top.len(),
        folded = selection.folded.len(),
        "selected series"
    );
    selection
}
