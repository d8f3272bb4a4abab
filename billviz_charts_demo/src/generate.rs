// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dummy events for trying out the charts.

use anyhow::{Result, bail};
use billviz_transforms::{Event, Sku};
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use rand::Rng;
use uuid::Uuid;

const CUSTOMERS: usize = 5;
const HOURS_BACK: i64 = 72;

/// Draws `count` events over the non-revoked SKUs, spread over the last three days.
///
/// Events are billed to a handful of fresh customer ids so the chart has a few series to show.
pub(crate) fn dummy_events(
    skus: &[Sku],
    merchant_id: &str,
    count: usize,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<Vec<Event>> {
    let active: Vec<&Sku> = skus.iter().filter(|s| !s.is_revoked()).collect();
    if active.is_empty() {
        bail!("create at least one SKU before generating events");
    }
    let customers: Vec<String> = (0..CUSTOMERS)
        .map(|_| Uuid::new_v4().to_string())
        .collect();

    Ok((0..count)
        .map(|_| {
            let sku = active[rng.gen_range(0..active.len())];
            let hours_back = rng.gen_range(0..HOURS_BACK);
            Event {
                id: Uuid::new_v4().to_string(),
                merchant_id: merchant_id.to_owned(),
                customer_id: customers[rng.gen_range(0..customers.len())].clone(),
                sku_id: sku.id.clone(),
                amount: (rng.r#gen::<f64>() * 10_000.0).round() / 100.0,
                sent_at: (now - TimeDelta::hours(hours_back))
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            }
        })
        .collect())
}
