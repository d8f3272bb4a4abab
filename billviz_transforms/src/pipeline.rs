// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full-recompute pipeline: price, bucket, select, materialize.

use serde::Serialize;

use crate::bucket::{BucketError, bucket_events};
use crate::grouping::Grouping;
use crate::materialize::{ChartRow, materialize};
use crate::model::Event;
use crate::pricing::PriceTable;
use crate::select::{DEFAULT_MAX_SERIES, select_top_n};
use crate::zone::BucketZone;

/// Default `chrono` format for row labels, e.g. `Jan 1, 10:00`.
pub const DEFAULT_LABEL_FORMAT: &str = "%b %-d, %H:%M";

/// Chart-ready series data.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SeriesData {
    /// One row per populated hour, ascending.
    pub rows: Vec<ChartRow>,
    /// Series keys in registration order, with `"Others"` last when present.
    pub series_keys: Vec<String>,
    /// Whether the last series key is the synthetic "Others" series.
    pub has_others: bool,
}

impl SeriesData {
    /// Returns `true` if there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the rank of `key` among the series, if it is one.
    pub fn series_index(&self, key: &str) -> Option<usize> {
        self.series_keys.iter().position(|k| k == key)
    }
}

/// Pipeline options.
///
/// Every call to [`Pipeline::execute`] recomputes from scratch; no state is kept between runs.
#[derive(Clone, Debug, PartialEq)]
pub struct Pipeline {
    /// Number of dedicated series before folding into "Others".
    pub max_series: usize,
    /// Zone hours are aligned on.
    pub zone: BucketZone,
    /// `chrono` format string for row labels.
    pub label_format: String,
}

impl Pipeline {
    /// Creates a pipeline with default options.
    pub fn new() -> Self {
        Self {
            max_series: DEFAULT_MAX_SERIES,
            zone: BucketZone::default(),
            label_format: DEFAULT_LABEL_FORMAT.to_owned(),
        }
    }

    /// Sets the number of dedicated series.
    pub fn with_max_series(mut self, max_series: usize) -> Self {
        self.max_series = max_series;
        self
    }

    /// Sets the bucketing zone.
    pub fn with_zone(mut self, zone: BucketZone) -> Self {
        self.zone = zone;
        self
    }

    /// Sets the row label format.
    pub fn with_label_format(mut self, label_format: impl Into<String>) -> Self {
        self.label_format = label_format.into();
        self
    }

    /// Runs the pipeline over `events`.
    pub fn execute(
        &self,
        events: &[Event],
        prices: &PriceTable,
        grouping: &impl Grouping,
    ) -> Result<SeriesData, BucketError> {
        let buckets = bucket_events(events, prices, grouping, &self.zone)?;
        let selection = select_top_n(&buckets, self.max_series);
        let rows = materialize(&buckets, &selection, &self.zone, &self.label_format);
        Ok(SeriesData {
            rows,
            series_keys: selection.series_keys(),
            has_others: selection.has_others(),
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
