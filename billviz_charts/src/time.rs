// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timestamp formatting for ledger rows and chart extents.

use billviz_transforms::{BucketZone, ChartRow};
use chrono::{DateTime, Utc};

/// Long timestamp format used in the event ledger, e.g. `1 Jan 2024, 10:15:00`.
pub const SENT_AT_FORMAT: &str = "%-d %b %Y, %H:%M:%S";

/// Formats an event's send time for the ledger.
pub fn format_sent_at(at: DateTime<Utc>, zone: &BucketZone) -> String {
    zone.format(at, SENT_AT_FORMAT)
}

/// Returns the first and last bucket timestamps of `rows`, if any.
///
/// Rows are materialized in ascending order, so this is the chart's time extent.
pub fn row_extent(rows: &[ChartRow]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    Some((rows.first()?.timestamp, rows.last()?.timestamp))
}

/// Number of whole hours covered by `rows`, counting both ends.
///
/// This is at least `rows.len()`; the difference is the number of hours without events, which
/// the chart does not synthesize.
pub fn hours_spanned(rows: &[ChartRow]) -> i64 {
    row_extent(rows).map_or(0, |(first, last)| (last - first).num_hours() + 1)
}
