// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-event ledger rows shown next to the charts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::bucket::BucketError;
use crate::model::Event;
use crate::pricing::PriceTable;

/// A priced, display-ready event.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LedgerRow {
    /// Event id.
    pub event_id: String,
    /// Customer the event is billed to.
    pub customer_id: String,
    /// SKU name, or the raw SKU id when the SKU is unknown.
    pub sku: String,
    /// Quantity consumed.
    pub amount: f64,
    /// Unit label of the SKU, if any.
    pub unit: Option<String>,
    /// `amount * price_per_unit`, rounded to 6 decimals.
    pub total_price: f64,
    /// Parsed send time.
    pub sent_at: DateTime<Utc>,
    /// The SKU has been revoked; the event was still accepted and priced.
    pub revoked: bool,
}

impl LedgerRow {
    /// Amount with the SKU's unit appended when it has one (e.g. `"3 GB"`).
    pub fn amount_label(&self) -> String {
        match &self.unit {
            Some(unit) => format!("{} {unit}", self.amount),
            None => format!("{}", self.amount),
        }
    }
}

fn round_micros(v: f64) -> f64 {
    (v * 1_000_000.0).round() / 1_000_000.0
}

/// Prices every event and returns rows newest first.
///
/// Events sent at the same instant keep their input order. Like the chart pipeline, an unparsable
/// timestamp rejects the whole batch.
pub fn ledger_rows(events: &[Event], prices: &PriceTable) -> Result<Vec<LedgerRow>, BucketError> {
    let mut rows = events
        .iter()
        .map(|event| {
            let sent_at = event
                .sent_at()
                .map_err(|source| BucketError::InvalidTimestamp {
                    event_id: event.id.clone(),
                    value: event.sent_at.clone(),
                    source,
                })?;
            let sku = prices.sku(&event.sku_id);
            Ok(LedgerRow {
                event_id: event.id.clone(),
                customer_id: event.customer_id.clone(),
                sku: prices.display_name(&event.sku_id),
                amount: event.amount,
                unit: sku.and_then(|s| s.unit.clone()),
                total_price: round_micros(prices.event_total(event)),
                sent_at,
                revoked: sku.is_some_and(|s| s.is_revoked()),
            })
        })
        .collect::<Result<Vec<_>, BucketError>>()?;
    rows.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
    Ok(rows)
}
