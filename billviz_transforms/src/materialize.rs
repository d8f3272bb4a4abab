// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart row materialization.

use chrono::{DateTime, Utc};
use serde::Serialize;
use smallvec::SmallVec;

use crate::bucket::HourlyBuckets;
use crate::select::{OTHERS_KEY, SeriesSelection};
use crate::zone::BucketZone;

/// Inline capacity for row values: the default top 10 plus "Others".
pub type RowValues = SmallVec<[f64; 11]>;

/// One chart row per hour bucket.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartRow {
    /// Start of the hour.
    pub timestamp: DateTime<Utc>,
    /// Short label for the hour (month, day, hour, minute).
    pub label: String,
    /// Rounded totals aligned with the selection's series keys.
    pub values: RowValues,
}

impl ChartRow {
    /// Returns the value for `key`, given the series keys the row was materialized with.
    pub fn value(&self, series_keys: &[String], key: &str) -> Option<f64> {
        let idx = series_keys.iter().position(|k| k == key)?;
        self.values.get(idx).copied()
    }

    /// Returns the sum of all values in the row.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Rounds to whole cents, half away from zero.
pub fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Emits one row per bucketed hour, ascending by timestamp.
///
/// Hours without events are not synthesized. Each row carries the top keys' totals (zero when a
/// key has no events in that hour) followed by the folded keys' sum when the selection has an
/// "Others" series. Rounding happens here and only here.
pub fn materialize(
    buckets: &HourlyBuckets,
    selection: &SeriesSelection,
    zone: &BucketZone,
    label_format: &str,
) -> Vec<ChartRow> {
    buckets
        .hours()
        .into_iter()
        .map(|hour| {
            let mut values: RowValues = selection
                .top_slots()
                .iter()
                .map(|&slot| round_cents(buckets.slot_total(hour, slot)))
                .collect();
            if selection.has_others() {
                let others: f64 = selection
                    .folded_slots()
                    .iter()
                    .map(|&slot| buckets.slot_total(hour, slot))
                    .sum();
                values.push(round_cents(others));
            }
            ChartRow {
                timestamp: hour,
                label: zone.format(hour, label_format),
                values,
            }
        })
        .collect()
}

/// Pairs each series key with the row's value, in series order.
pub fn row_record(row: &ChartRow, series_keys: &[String]) -> Vec<(String, f64)> {
    series_keys
        .iter()
        .zip(row.values.iter())
        .map(|(k, &v)| (k.clone(), v))
        .collect()
}
