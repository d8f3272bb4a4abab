// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouping and label capabilities injected into the pipeline.
//!
//! The same bucketing pipeline serves several chart views; what differs between them is how an
//! event maps to a series key and how a key is shown to the viewer.

use serde::{Deserialize, Serialize};

use crate::model::Event;
use crate::pricing::PriceTable;

/// Maps an event to the series key it is aggregated under.
pub trait Grouping {
    /// Returns the group key for `event`.
    fn group_key(&self, event: &Event) -> String;
}

/// Built-in grouping dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// Group by [`Event::customer_id`].
    #[default]
    Customer,
    /// Group by [`Event::sku_id`].
    Sku,
}

impl Grouping for GroupBy {
    fn group_key(&self, event: &Event) -> String {
        match self {
            Self::Customer => event.customer_id.clone(),
            Self::Sku => event.sku_id.clone(),
        }
    }
}

impl<F> Grouping for F
where
    F: Fn(&Event) -> String,
{
    fn group_key(&self, event: &Event) -> String {
        self(event)
    }
}

/// Maps a raw series key to its display label.
///
/// The price table the series were computed from is passed along so resolvers can look up SKU
/// records without holding their own copy.
pub trait LabelResolver {
    /// Returns the display label for `key`.
    fn label(&self, key: &str, prices: &PriceTable) -> String;
}

/// Shows keys as-is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawLabels;

impl LabelResolver for RawLabels {
    fn label(&self, key: &str, _prices: &PriceTable) -> String {
        key.to_owned()
    }
}

/// Shows SKU names for SKU-id keys, falling back to the id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SkuNames;

impl LabelResolver for SkuNames {
    fn label(&self, key: &str, prices: &PriceTable) -> String {
        prices.display_name(key)
    }
}

impl<F> LabelResolver for F
where
    F: Fn(&str) -> String,
{
    fn label(&self, key: &str, _prices: &PriceTable) -> String {
        self(key)
    }
}
