// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Records supplied by the ingestion and SKU collaborators.
//!
//! Field names on the wire follow the dashboard API (`ID`, `SkuID`, `SentAt`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single metered usage event.
///
/// `sent_at` is kept as the raw string received from the API. It is parsed during bucketing so
/// that a malformed timestamp surfaces as an error instead of a bogus bucket. Only RFC 3339 is
/// accepted: an ISO-8601 time without an offset (`2024-01-01T10:15:00`) is rejected, since its
/// instant would depend on whoever reads it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event identifier.
    #[serde(rename = "ID")]
    pub id: String,
    /// Merchant that recorded the event.
    #[serde(rename = "MerchantID")]
    pub merchant_id: String,
    /// Customer the usage is billed to.
    #[serde(rename = "CustomerID")]
    pub customer_id: String,
    /// SKU the usage is priced against.
    #[serde(rename = "SkuID")]
    pub sku_id: String,
    /// Quantity of units consumed.
    #[serde(rename = "Amount")]
    pub amount: f64,
    /// ISO-8601 timestamp at which the event was sent.
    #[serde(rename = "SentAt")]
    pub sent_at: String,
}

impl Event {
    /// Parses `sent_at` as an RFC 3339 timestamp. The offset (`Z` or `+HH:MM`) is required.
    pub fn sent_at(&self) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(&self.sent_at).map(|t| t.with_timezone(&Utc))
    }
}

/// A priced stock-keeping unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sku {
    /// SKU identifier, referenced by [`Event::sku_id`].
    #[serde(rename = "ID")]
    pub id: String,
    /// Display name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Optional unit label (e.g. `"GB"`).
    #[serde(rename = "Unit", default)]
    pub unit: Option<String>,
    /// Non-negative price for one unit.
    #[serde(rename = "PricePerUnit")]
    pub price_per_unit: f64,
    /// When the SKU was revoked, if it was.
    ///
    /// Revocation does not change pricing of events already recorded against the SKU.
    #[serde(rename = "RevokedAt", default)]
    pub revoked_at: Option<DateTime<Utc>>,
    /// Creation time.
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
}

impl Sku {
    /// Returns `true` if the SKU has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_deserializes_from_api_field_names() {
        let json = r#"{
            "ID": "e1",
            "MerchantID": "m1",
            "CustomerID": "c1",
            "SkuID": "s1",
            "Amount": 2.5,
            "SentAt": "2024-01-01T10:15:00Z"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.sku_id, "s1");
        assert_eq!(event.amount, 2.5);
        assert_eq!(
            event.sent_at().unwrap(),
            "2024-01-01T10:15:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn sent_at_accepts_offsets_and_rejects_garbage() {
        let mut event = Event {
            id: "e1".into(),
            merchant_id: "m1".into(),
            customer_id: "c1".into(),
            sku_id: "s1".into(),
            amount: 1.0,
            sent_at: "2024-01-01T12:15:00+02:00".into(),
        };
        assert_eq!(
            event.sent_at().unwrap(),
            "2024-01-01T10:15:00Z".parse::<DateTime<Utc>>().unwrap()
        );

        event.sent_at = "yesterday".into();
        assert!(event.sent_at().is_err());

        event.sent_at = "2024-01-01T10:15:00".into();
        assert!(event.sent_at().is_err(), "a missing offset must not be guessed");
    }

    #[test]
    fn sku_optional_fields_default_to_none() {
        let json = r#"{
            "ID": "s1",
            "Name": "Storage",
            "PricePerUnit": 0.25,
            "CreatedAt": "2024-01-01T00:00:00Z"
        }"#;
        let sku: Sku = serde_json::from_str(json).unwrap();
        assert_eq!(sku.unit, None);
        assert!(!sku.is_revoked());
    }
}
