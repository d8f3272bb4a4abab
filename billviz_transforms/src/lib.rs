// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Usage aggregation for billing charts.
//!
//! This crate turns a list of metered usage events and a SKU price table into chart-ready series:
//! - events are priced (`amount * price_per_unit`, unknown SKUs price at zero),
//! - bucketed by hour and grouping key,
//! - ranked so the top N keys get dedicated series and the rest fold into `"Others"`, and
//! - materialized into one rounded row per populated hour.
//!
//! The executor is full-recompute and pure. Callers that want memoization key it on the
//! [`TableStamp`]s of the [`EventTable`] and [`PriceTable`] they feed in.

mod bucket;
mod grouping;
mod ledger;
mod materialize;
mod model;
mod pipeline;
#[cfg(test)]
mod pipeline_tests;
mod pricing;
mod select;
mod table;
mod zone;

pub use bucket::{BucketError, HourlyBuckets, bucket_events};
pub use grouping::{GroupBy, Grouping, LabelResolver, RawLabels, SkuNames};
pub use ledger::{LedgerRow, ledger_rows};
pub use materialize::{ChartRow, RowValues, materialize, round_cents, row_record};
pub use model::{Event, Sku};
pub use pipeline::{DEFAULT_LABEL_FORMAT, Pipeline, SeriesData};
pub use pricing::PriceTable;
pub use select::{DEFAULT_MAX_SERIES, OTHERS_KEY, SeriesSelection, select_top_n};
pub use table::{EventTable, TableStamp};
pub use zone::{BucketZone, ZoneParseError};
