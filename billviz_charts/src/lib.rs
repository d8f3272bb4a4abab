// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart view models for billing usage.
//!
//! This crate sits above `billviz_transforms`:
//! - [`EventsChart`] runs the aggregation pipeline for one view, memoized on its input tables.
//! - **Legends** track which series are hidden, independent of the data.
//! - **Palettes** assign each series a stable fill by rank, with a neutral fill for "Others".
//!
//! Drawing is out of scope; a renderer consumes [`ChartModel`] and [`LegendItem`]s.

mod events_chart;
mod legend;
pub mod palette;
mod time;

pub use events_chart::{ChartModel, EventsChart, SeriesSpec};
pub use legend::{LegendItem, LegendState};
pub use time::{SENT_AT_FORMAT, format_sent_at, hours_spanned, row_extent};
