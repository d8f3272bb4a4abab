// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hour bucketing of priced events.

use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use thiserror::Error;

use crate::grouping::Grouping;
use crate::model::Event;
use crate::pricing::PriceTable;
use crate::zone::BucketZone;

/// Errors returned by [`bucket_events`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BucketError {
    /// An event's `SentAt` could not be parsed. The whole batch is rejected.
    #[error("event {event_id} has an unparsable SentAt {value:?}: {source}")]
    InvalidTimestamp {
        /// Id of the offending event.
        event_id: String,
        /// The raw timestamp string.
        value: String,
        /// The underlying parse error.
        source: chrono::ParseError,
    },
}

/// Per-hour, per-group accumulated totals.
///
/// Group keys are stored once, in the order they were first encountered; that order is the
/// tie-breaker used by [`crate::select_top_n`]. Totals are kept unrounded.
#[derive(Clone, Debug, Default)]
pub struct HourlyBuckets {
    keys: Vec<String>,
    slots: HashMap<String, usize>,
    /// Hour start -> totals indexed by key slot. Rows may be shorter than `keys`; missing slots
    /// are zero.
    totals: HashMap<DateTime<Utc>, Vec<f64>>,
}

impl HourlyBuckets {
    /// Create an empty set of buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` to `totals[hour][key]`, registering `key` on first sight.
    pub fn accumulate(&mut self, hour: DateTime<Utc>, key: String, value: f64) {
        let slot = match self.slots.entry(key) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let slot = self.keys.len();
                self.keys.push(e.key().clone());
                e.insert(slot);
                slot
            }
        };
        let row = self.totals.entry(hour).or_default();
        if row.len() <= slot {
            row.resize(slot + 1, 0.0);
        }
        row[slot] += value;
    }

    /// Returns `true` if no event was bucketed.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Returns the number of distinct hours.
    pub fn hour_count(&self) -> usize {
        self.totals.len()
    }

    /// Returns the distinct group keys in first-seen order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns the distinct hours in ascending order.
    pub fn hours(&self) -> Vec<DateTime<Utc>> {
        let mut hours: Vec<_> = self.totals.keys().copied().collect();
        hours.sort_unstable();
        hours
    }

    /// Returns the accumulated total for `key` within `hour` (zero if absent).
    pub fn total(&self, hour: DateTime<Utc>, key: &str) -> f64 {
        self.slots
            .get(key)
            .map_or(0.0, |&slot| self.slot_total(hour, slot))
    }

    /// Returns the sum over all keys within `hour`.
    pub fn hour_total(&self, hour: DateTime<Utc>) -> f64 {
        self.totals
            .get(&hour)
            .map_or(0.0, |row| row.iter().sum())
    }

    /// Returns each key's total across all hours, in first-seen key order.
    pub fn grand_totals(&self) -> Vec<(String, f64)> {
        self.keys
            .iter()
            .cloned()
            .zip(self.slot_grand_totals())
            .collect()
    }

    pub(crate) fn slot_total(&self, hour: DateTime<Utc>, slot: usize) -> f64 {
        self.totals
            .get(&hour)
            .and_then(|row| row.get(slot))
            .copied()
            .unwrap_or(0.0)
    }

    pub(crate) fn slot_grand_totals(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.keys.len()];
        for row in self.totals.values() {
            for (acc, v) in out.iter_mut().zip(row) {
                *acc += *v;
            }
        }
        out
    }
}

/// Groups events into hour buckets and accumulates `amount * price_per_unit` per group key.
///
/// Hours are aligned on `zone`'s wall clock. Unknown SKUs price at zero. If any event has an
/// unparsable timestamp the whole batch is rejected, so totals are never built from a partial
/// input.
pub fn bucket_events(
    events: &[Event],
    prices: &PriceTable,
    grouping: &impl Grouping,
    zone: &BucketZone,
) -> Result<HourlyBuckets, BucketError> {
    let mut buckets = HourlyBuckets::new();
    for event in events {
        let sent_at = event.sent_at().map_err(|source| {
            tracing::warn!(event_id = %event.id, sent_at = %event.sent_at, "rejecting event batch");
            BucketError::InvalidTimestamp {
                event_id: event.id.clone(),
                value: event.sent_at.clone(),
                source,
            }
        })?;
        let hour = zone.hour_start(sent_at);
        buckets.accumulate(hour, grouping.group_key(event), prices.event_total(event));
    }
    tracing::debug!(
        events = events.len(),
        hours = buckets.hour_count(),
        keys = buckets.keys().len(),
        "bucketed events"
    );
    Ok(buckets)
}
