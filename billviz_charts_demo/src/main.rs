// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command-line front end for the billing charts.
//!
//! Reads event and SKU payloads in the dashboard's JSON shape, then prints an hourly spend chart,
//! a priced event ledger, or a batch of dummy events to feed back in.

mod cli;
mod generate;
mod report;
mod settings;

use std::io::Write;

use anyhow::{Context, Result};
use billviz_charts::EventsChart;
use billviz_transforms::{Event, EventTable, GroupBy, LabelResolver, PriceTable, Sku, ledger_rows};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{ChartArgs, Cli, Command, GenerateArgs, LedgerArgs};
use crate::settings::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let mut settings = Settings::load(cli.config.as_deref())?;
    match cli.command {
        Command::Chart(args) => {
            settings.merge_chart_args(&args);
            run_chart(&settings, &args)
        }
        Command::Ledger(args) => {
            if let Some(zone) = args.zone {
                settings.zone = zone;
            }
            run_ledger(&settings, &args)
        }
        Command::Generate(args) => run_generate(&args),
    }
}

fn setup_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("billviz=debug")
        } else {
            EnvFilter::new("billviz=info")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Labels that follow the grouping: SKU names for SKU series, raw ids otherwise.
#[derive(Clone, Copy, Debug)]
struct GroupLabels(GroupBy);

impl LabelResolver for GroupLabels {
    fn label(&self, key: &str, prices: &PriceTable) -> String {
        match self.0 {
            GroupBy::Customer => key.to_owned(),
            GroupBy::Sku => prices.display_name(key),
        }
    }
}

fn load_inputs(input: &cli::InputArgs) -> Result<(EventTable, PriceTable)> {
    let events: Vec<Event> = report::load_json(&input.events)?;
    let skus: Vec<Sku> = report::load_json(&input.skus)?;
    tracing::info!(events = events.len(), skus = skus.len(), "loaded payloads");
    Ok((EventTable::new(events), PriceTable::from_skus(skus)))
}

fn run_chart(settings: &Settings, args: &ChartArgs) -> Result<()> {
    let (events, prices) = load_inputs(&args.input)?;
    let title = match settings.group_by {
        GroupBy::Customer => "Spend by customer",
        GroupBy::Sku => "Spend by SKU",
    };
    let mut chart = EventsChart::new(title, settings.group_by)
        .with_labels(GroupLabels(settings.group_by))
        .with_pipeline(settings.pipeline());

    chart
        .update(&events, &prices)
        .context("Failed to aggregate events")?;
    for key in &args.hide {
        chart.toggle(key);
    }
    if let Some(key) = &args.solo {
        chart.solo(key);
    }
    let legend = chart.legend_items();
    // Inputs are unchanged, so this returns the cached model.
    let model = chart.update(&events, &prices)?;

    let mut out = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report::chart_json(model, &legend))?;
        writeln!(out)?;
    } else {
        report::write_chart(&mut out, model, &legend)?;
    }
    Ok(())
}

fn run_ledger(settings: &Settings, args: &LedgerArgs) -> Result<()> {
    let (events, prices) = load_inputs(&args.input)?;
    let rows = ledger_rows(events.events(), &prices).context("Failed to price events")?;

    let mut out = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &rows)?;
        writeln!(out)?;
    } else {
        report::write_ledger(&mut out, &rows, &settings.zone)?;
    }
    Ok(())
}

fn run_generate(args: &GenerateArgs) -> Result<()> {
    let skus: Vec<Sku> = report::load_json(&args.skus)?;
    let events = generate::dummy_events(
        &skus,
        &args.merchant,
        args.count,
        chrono::Utc::now(),
        &mut rand::thread_rng(),
    )?;
    let json = serde_json::to_string_pretty(&events)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(count = events.len(), path = %path.display(), "wrote events");
        }
        None => println!("{json}"),
    }
    Ok(())
}
