// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Payload loading and text/JSON output.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use billviz_charts::{ChartModel, LegendItem, format_sent_at, hours_spanned, palette};
use billviz_transforms::{BucketZone, LedgerRow};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// Reads a JSON array payload.
pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Writes the visible series as a table, followed by the legend.
pub(crate) fn write_chart(
    out: &mut impl Write,
    model: &ChartModel,
    legend: &[LegendItem],
) -> Result<()> {
    writeln!(out, "{}", model.title)?;
    if model.is_empty() {
        writeln!(out, "(no events)")?;
        return Ok(());
    }

    let visible: Vec<usize> = legend
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.hidden)
        .map(|(i, _)| i)
        .collect();

    write!(out, "{:<14}", "hour")?;
    for &i in &visible {
        write!(out, " {:>12}", truncate(&legend[i].label, 12))?;
    }
    writeln!(out, " {:>12}", "total")?;

    for row in model.rows() {
        write!(out, "{:<14}", row.label)?;
        let mut total = 0.0;
        for &i in &visible {
            let v = row.values.get(i).copied().unwrap_or(0.0);
            total += v;
            write!(out, " {v:>12.2}")?;
        }
        writeln!(out, " {total:>12.2}")?;
    }
    writeln!(
        out,
        "{} populated of {} hours",
        model.rows().len(),
        hours_spanned(model.rows())
    )?;

    writeln!(out)?;
    writeln!(out, "legend")?;
    for item in legend {
        let state = if item.hidden { "hidden" } else { "shown" };
        writeln!(
            out,
            "  {} {:<24} {state}",
            palette::to_hex(item.swatch()),
            item.label
        )?;
    }
    Ok(())
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_owned()
    } else {
        let mut t: String = s.chars().take(width - 1).collect();
        t.push('~');
        t
    }
}

/// Chart output as JSON: series metadata plus one record per row.
///
/// Each record carries `timestamp`, `label`, and `values` aligned with `series`. Values are
/// positional because a real group key may itself be `"Others"`.
pub(crate) fn chart_json(model: &ChartModel, legend: &[LegendItem]) -> Value {
    let series: Vec<Value> = legend
        .iter()
        .map(|item| {
            json!({
                "key": item.key,
                "label": item.label,
                "fill": palette::to_hex(item.fill),
                "hidden": item.hidden,
            })
        })
        .collect();
    let rows: Vec<Value> = model
        .rows()
        .iter()
        .map(|row| {
            json!({
                "timestamp": row.timestamp.to_rfc3339(),
                "label": row.label,
                "values": row.values.as_slice(),
            })
        })
        .collect();
    json!({
        "title": model.title,
        "series": series,
        "rows": rows,
    })
}

/// Writes ledger rows as a table.
pub(crate) fn write_ledger(
    out: &mut impl Write,
    rows: &[LedgerRow],
    zone: &BucketZone,
) -> Result<()> {
    writeln!(
        out,
        "{:<24} {:<38} {:<24} {:>12} {:>14}",
        "sent at", "customer", "sku", "amount", "total"
    )?;
    for row in rows {
        let sku = if row.revoked {
            format!("{} (revoked)", row.sku)
        } else {
            row.sku.clone()
        };
        writeln!(
            out,
            "{:<24} {:<38} {:<24} {:>12} {:>14}",
            format_sent_at(row.sent_at, zone),
            row.customer_id,
            sku,
            row.amount_label(),
            row.total_price
        )?;
    }
    Ok(())
}
