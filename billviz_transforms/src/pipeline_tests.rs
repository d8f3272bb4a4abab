// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use crate::{
    BucketError, BucketZone, Event, GroupBy, OTHERS_KEY, Pipeline, PriceTable, Sku, bucket_events,
};

fn sku(id: &str, price: f64) -> Sku {
    Sku {
        id: id.into(),
        name: id.to_uppercase(),
        unit: None,
        price_per_unit: price,
        revoked_at: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn event(id: usize, customer: &str, sku: &str, amount: f64, sent_at: &str) -> Event {
    Event {
        id: format!("e{id}"),
        merchant_id: "m".into(),
        customer_id: customer.into(),
        sku_id: sku.into(),
        amount,
        sent_at: sent_at.into(),
    }
}

/// Deterministic pseudo-random events across 15 customers and 6 hours.
fn noisy_events() -> Vec<Event> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    (0..300)
        .map(|i| {
            let customer = format!("cust-{}", next() % 15);
            let sku = ["a", "b", "c", "unknown"][(next() % 4) as usize];
            let amount = f64::from((next() % 10_000) as u32) / 100.0;
            let hour = next() % 6;
            let minute = next() % 60;
            let sent_at = format!("2024-03-10T{:02}:{minute:02}:17.250Z", 8 + hour);
            event(i, &customer, sku, amount, &sent_at)
        })
        .collect()
}

fn noisy_prices() -> PriceTable {
    PriceTable::from_skus([sku("a", 0.013), sku("b", 1.7), sku("c", 0.333)])
}

#[test]
fn concrete_two_sku_scenario() {
    let events = [
        event(1, "c1", "a", 10.0, "2024-01-01T10:15:00Z"),
        event(2, "c1", "a", 5.0, "2024-01-01T10:45:00Z"),
        event(3, "c1", "b", 2.0, "2024-01-01T11:05:00Z"),
    ];
    let prices = PriceTable::from_skus([sku("a", 2.0), sku("b", 3.0)]);

    let data = Pipeline::new()
        .with_max_series(2)
        .execute(&events, &prices, &GroupBy::Sku)
        .unwrap();

    assert_eq!(data.series_keys, ["a", "b"]);
    assert!(!data.has_others);
    assert_eq!(data.rows.len(), 2);
    assert_eq!(
        data.rows[0].timestamp,
        Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
    );
    assert_eq!(data.rows[0].label, "Jan 1, 10:00");
    assert_eq!(data.rows[0].values.as_slice(), [30.0, 0.0]);
    assert_eq!(data.rows[1].label, "Jan 1, 11:00");
    assert_eq!(data.rows[1].values.as_slice(), [0.0, 6.0]);
}

#[test]
fn every_bucket_conserves_its_total() {
    let events = noisy_events();
    let prices = noisy_prices();
    let pipeline = Pipeline::new().with_max_series(4);

    let data = pipeline.execute(&events, &prices, &GroupBy::Customer).unwrap();
    let buckets = bucket_events(&events, &prices, &GroupBy::Customer, &pipeline.zone).unwrap();

    assert!(data.has_others);
    assert_eq!(data.series_keys.len(), 5);
    for row in &data.rows {
        let expected = buckets.hour_total(row.timestamp);
        let tolerance = 0.01 * row.values.len() as f64;
        assert!(
            (row.total() - expected).abs() <= tolerance,
            "row {} sums to {} but bucket total is {expected}",
            row.label,
            row.total()
        );
    }
}

#[test]
fn identical_input_gives_identical_output() {
    let events = noisy_events();
    let prices = noisy_prices();
    let pipeline = Pipeline::new().with_max_series(3);

    let first = pipeline.execute(&events, &prices, &GroupBy::Customer).unwrap();
    let second = pipeline.execute(&events, &prices, &GroupBy::Customer).unwrap();
    assert_eq!(first, second);
}

#[test]
fn one_key_past_the_limit_becomes_others() {
    let prices = PriceTable::from_skus([sku("a", 1.0)]);
    let mut events: Vec<Event> = (0..10)
        .map(|i| {
            let amount = 100.0 - i as f64;
            event(i, &format!("c{i}"), "a", amount, "2024-01-01T10:00:00Z")
        })
        .collect();

    let data = Pipeline::new()
        .execute(&events, &prices, &GroupBy::Customer)
        .unwrap();
    assert_eq!(data.series_keys.len(), 10);
    assert!(!data.series_keys.iter().any(|k| k == OTHERS_KEY));

    events.push(event(10, "c10", "a", 1.25, "2024-01-01T10:30:00Z"));
    let data = Pipeline::new()
        .execute(&events, &prices, &GroupBy::Customer)
        .unwrap();
    assert_eq!(data.series_keys.len(), 11);
    assert_eq!(data.series_keys[10], OTHERS_KEY);
    assert_eq!(data.rows[0].value(&data.series_keys, OTHERS_KEY), Some(1.25));
}

#[test]
fn unknown_sku_never_fails() {
    let events = [event(1, "c1", "nope", 50.0, "2024-01-01T10:00:00Z")];
    let data = Pipeline::new()
        .execute(&events, &PriceTable::new(), &GroupBy::Sku)
        .unwrap();
    assert_eq!(data.series_keys, ["nope"]);
    assert_eq!(data.rows[0].values.as_slice(), [0.0]);
}

#[test]
fn empty_input_is_nothing_to_display() {
    let data = Pipeline::new()
        .execute(&[], &noisy_prices(), &GroupBy::Sku)
        .unwrap();
    assert!(data.is_empty());
    assert!(data.series_keys.is_empty());
}

#[test]
fn bad_timestamp_rejects_the_pass() {
    let mut events = noisy_events();
    events[17].sent_at = "2024-13-45T99:00:00Z".into();
    let err = Pipeline::new()
        .execute(&events, &noisy_prices(), &GroupBy::Sku)
        .unwrap_err();
    assert!(matches!(
        err,
        BucketError::InvalidTimestamp { ref event_id, .. } if event_id == "e17"
    ));
}

#[test]
fn zone_changes_bucket_alignment() {
    let events = [
        event(1, "c1", "a", 1.0, "2024-01-01T10:10:00Z"),
        event(2, "c1", "a", 1.0, "2024-01-01T10:40:00Z"),
    ];
    let prices = PriceTable::from_skus([sku("a", 1.0)]);

    let utc = Pipeline::new()
        .execute(&events, &prices, &GroupBy::Sku)
        .unwrap();
    assert_eq!(utc.rows.len(), 1);

    let india = Pipeline::new()
        .with_zone("+05:30".parse::<BucketZone>().unwrap())
        .with_label_format("%H:%M")
        .execute(&events, &prices, &GroupBy::Sku)
        .unwrap();
    let labels: Vec<&str> = india.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["15:00", "16:00"]);
}

#[test]
fn closure_grouping_feeds_the_same_pipeline() {
    let events = noisy_events();
    let by_sku_family = |e: &Event| {
        if e.sku_id == "unknown" {
            "unpriced".to_owned()
        } else {
            "priced".to_owned()
        }
    };
    let data = Pipeline::new()
        .execute(&events, &noisy_prices(), &by_sku_family)
        .unwrap();
    assert_eq!(data.series_keys.first().map(String::as_str), Some("priced"));
    for row in &data.rows {
        assert_eq!(row.value(&data.series_keys, "unpriced"), Some(0.0));
    }
}
