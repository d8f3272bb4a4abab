// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SKU price lookup.

use hashbrown::HashMap;

use crate::model::{Event, Sku};
use crate::table::{TableStamp, next_table_id};

/// SKU records keyed by id, used to price events.
///
/// Lookups never fail: an unknown SKU id (deleted SKU, or a table that has not been loaded yet)
/// prices at zero. Like [`crate::EventTable`], the table carries a [`TableStamp`] that changes
/// whenever its contents are replaced.
#[derive(Debug)]
pub struct PriceTable {
    id: u64,
    version: u64,
    skus: HashMap<String, Sku>,
}

impl PriceTable {
    /// Create an empty table at version `1`.
    pub fn new() -> Self {
        Self {
            id: next_table_id(),
            version: 1,
            skus: HashMap::new(),
        }
    }

    /// Builds a table from SKU records. Later records replace earlier ones with the same id.
    pub fn from_skus(skus: impl IntoIterator<Item = Sku>) -> Self {
        let mut table = Self::new();
        table.insert_all(skus);
        table
    }

    fn insert_all(&mut self, skus: impl IntoIterator<Item = Sku>) {
        for sku in skus {
            self.skus.insert(sku.id.clone(), sku);
        }
    }

    /// Replaces all SKU records and bumps the version.
    pub fn replace(&mut self, skus: impl IntoIterator<Item = Sku>) {
        self.skus.clear();
        self.insert_all(skus);
        self.version = self.version.wrapping_add(1);
    }

    /// Returns the current version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns the table id and version.
    pub fn stamp(&self) -> TableStamp {
        TableStamp {
            id: self.id,
            version: self.version,
        }
    }

    /// Returns the number of SKUs.
    pub fn len(&self) -> usize {
        self.skus.len()
    }

    /// Returns `true` if no SKU is known.
    pub fn is_empty(&self) -> bool {
        self.skus.is_empty()
    }

    /// Returns the SKU record for `sku_id`, if present.
    pub fn sku(&self, sku_id: &str) -> Option<&Sku> {
        self.skus.get(sku_id)
    }

    /// Iterates over all SKU records in unspecified order.
    pub fn skus(&self) -> impl Iterator<Item = &Sku> {
        self.skus.values()
    }

    /// Price of one unit of `sku_id`, or `0.0` if the SKU is unknown.
    ///
    /// Revoked SKUs keep their price.
    pub fn price_per_unit(&self, sku_id: &str) -> f64 {
        match self.skus.get(sku_id) {
            Some(sku) => sku.price_per_unit,
            None => {
                tracing::trace!(sku_id, "unknown SKU, pricing at zero");
                0.0
            }
        }
    }

    /// Total price of an event: `amount * price_per_unit`.
    pub fn event_total(&self, event: &Event) -> f64 {
        event.amount * self.price_per_unit(&event.sku_id)
    }

    /// Human-readable name for `sku_id`, falling back to the id itself.
    pub fn display_name(&self, sku_id: &str) -> String {
        self.skus
            .get(sku_id)
            .map_or_else(|| sku_id.to_owned(), |sku| sku.name.clone())
    }
}

impl Clone for PriceTable {
    fn clone(&self) -> Self {
        Self {
            id: next_table_id(),
            version: self.version,
            skus: self.skus.clone(),
        }
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Sku> for PriceTable {
    fn from_iter<I: IntoIterator<Item = Sku>>(iter: I) -> Self {
        Self::from_skus(iter)
    }
}
