// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spend-over-time stacked bar chart view model.

use billviz_transforms::{
    BucketError, ChartRow, EventTable, Grouping, LabelResolver, OTHERS_KEY, Pipeline, PriceTable,
    RawLabels, SeriesData, TableStamp,
};
use peniko::Color;

use crate::legend::{LegendItem, LegendState};
use crate::palette;

/// One registered series.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesSpec {
    /// Series key, as it appears in [`SeriesData::series_keys`].
    pub key: String,
    /// Display label (the "Others" series is never passed to the label resolver).
    pub label: String,
    /// Fill color.
    pub fill: Color,
    /// Registration rank; also the stacking order.
    pub rank: usize,
}

/// Everything a renderer needs to draw one chart, apart from legend visibility.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartModel {
    /// Chart title.
    pub title: String,
    /// Rows and series keys.
    pub data: SeriesData,
    /// Series in registration order.
    pub series: Vec<SeriesSpec>,
}

impl ChartModel {
    /// Returns `true` if there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Chart rows, ascending by hour.
    pub fn rows(&self) -> &[ChartRow] {
        &self.data.rows
    }

    /// Series keys in registration order.
    pub fn series_keys(&self) -> &[String] {
        &self.data.series_keys
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct InputStamps {
    events: TableStamp,
    prices: TableStamp,
}

/// A stacked bar chart of event spend, grouped by an injected [`Grouping`].
///
/// Series data is memoized on the identity of its inputs: calling [`EventsChart::update`] again
/// with the same (unmodified) tables returns the cached model. Changing the grouping or pipeline
/// options invalidates the cache. Legend visibility is kept across recomputations.
#[derive(Debug)]
pub struct EventsChart<G, L = RawLabels> {
    title: String,
    grouping: G,
    labels: L,
    pipeline: Pipeline,
    legend: LegendState,
    cache: Option<(InputStamps, ChartModel)>,
    recomputes: u64,
}

impl<G: Grouping> EventsChart<G, RawLabels> {
    /// Creates a chart showing raw group keys as labels.
    pub fn new(title: impl Into<String>, grouping: G) -> Self {
        Self {
            title: title.into(),
            grouping,
            labels: RawLabels,
            pipeline: Pipeline::new(),
            legend: LegendState::new(),
            cache: None,
            recomputes: 0,
        }
    }
}

impl<G: Grouping, L: LabelResolver> EventsChart<G, L> {
    /// Replaces the label resolver.
    pub fn with_labels<L2: LabelResolver>(self, labels: L2) -> EventsChart<G, L2> {
        EventsChart {
            title: self.title,
            grouping: self.grouping,
            labels,
            pipeline: self.pipeline,
            legend: self.legend,
            cache: None,
            recomputes: self.recomputes,
        }
    }

    /// Sets pipeline options.
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.set_pipeline(pipeline);
        self
    }

    /// Replaces the grouping and invalidates cached series.
    pub fn set_grouping(&mut self, grouping: G) {
        self.grouping = grouping;
        self.cache = None;
    }

    /// Replaces pipeline options and invalidates cached series.
    pub fn set_pipeline(&mut self, pipeline: Pipeline) {
        self.pipeline = pipeline;
        self.cache = None;
    }

    /// Chart title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Pipeline options in effect.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Number of times series data was actually recomputed.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Brings the model up to date with `events` and `prices`.
    ///
    /// On error nothing is cached and the previous model is dropped, so a renderer never shows
    /// totals built from a rejected batch.
    pub fn update(
        &mut self,
        events: &EventTable,
        prices: &PriceTable,
    ) -> Result<&ChartModel, BucketError> {
        let stamps = InputStamps {
            events: events.stamp(),
            prices: prices.stamp(),
        };
        let model = match self.cache.take() {
            Some((cached, model)) if cached == stamps => model,
            _ => {
                let data = self
                    .pipeline
                    .execute(events.events(), prices, &self.grouping)?;
                self.recomputes += 1;
                tracing::debug!(
                    title = %self.title,
                    rows = data.rows.len(),
                    series = data.series_keys.len(),
                    "recomputed chart series"
                );
                let series = self.series_specs(&data, prices);
                ChartModel {
                    title: self.title.clone(),
                    data,
                    series,
                }
            }
        };
        let (_, model) = self.cache.insert((stamps, model));
        Ok(model)
    }

    fn series_specs(&self, data: &SeriesData, prices: &PriceTable) -> Vec<SeriesSpec> {
        data.series_keys
            .iter()
            .enumerate()
            .map(|(rank, key)| {
                let is_others = data.has_others && rank + 1 == data.series_keys.len();
                SeriesSpec {
                    key: key.clone(),
                    label: if is_others {
                        OTHERS_KEY.to_owned()
                    } else {
                        self.labels.label(key, prices)
                    },
                    fill: if is_others {
                        palette::others_fill()
                    } else {
                        palette::series_fill(rank)
                    },
                    rank,
                }
            })
            .collect()
    }

    /// The last successfully computed model, if any.
    pub fn model(&self) -> Option<&ChartModel> {
        self.cache.as_ref().map(|(_, model)| model)
    }

    /// Current legend state.
    pub fn legend(&self) -> &LegendState {
        &self.legend
    }

    /// Legend rows in series order, reflecting current visibility.
    pub fn legend_items(&self) -> Vec<LegendItem> {
        let Some(model) = self.model() else {
            return Vec::new();
        };
        model
            .series
            .iter()
            .map(|s| LegendItem {
                key: s.key.clone(),
                label: s.label.clone(),
                fill: s.fill,
                hidden: self.legend.is_hidden(&s.key),
            })
            .collect()
    }

    /// Series that are not hidden, in registration order.
    pub fn visible_series(&self) -> Vec<&SeriesSpec> {
        let Some(model) = self.model() else {
            return Vec::new();
        };
        model
            .series
            .iter()
            .filter(|s| !self.legend.is_hidden(&s.key))
            .collect()
    }

    /// Hides or shows one series.
    pub fn toggle(&mut self, key: &str) {
        self.legend.toggle(key);
    }

    /// Shows only `key`, or everything if `key` is already the only visible series.
    pub fn solo(&mut self, key: &str) {
        let keys = self
            .model()
            .map(|m| m.series_keys().to_vec())
            .unwrap_or_default();
        self.legend.solo(key, &keys);
    }
}
