// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use fieldseek::{Engine, Record, SchemaFile};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{display, Cli, Commands};

fn main() -> Result<()> {
    // FIELDSEEK_LOG wins over RUST_LOG; logs go to stderr so --json stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("FIELDSEEK_LOG")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("fieldseek=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            records,
            query,
            schema,
            limit,
            json,
        } => run_search(&records, &schema, &query, limit, json),
        Commands::Inspect { records, schema } => {
            let engine = load_engine(&records, &schema)?;
            display::print_inspect(&engine);
            Ok(())
        }
    }
}

fn load_engine(records: &Path, schema: &Path) -> Result<Engine<Record>> {
    let schema_file = SchemaFile::load(schema)?;
    let records = Record::load_all(records)?;
    let count = records.len();

    let start = Instant::now();
    let engine = schema_file
        .build_engine(records)
        .with_context(|| format!("invalid schema in {}", schema.display()))?;
    info!(
        records = count,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "index built"
    );
    Ok(engine)
}

fn run_search(records: &Path, schema: &Path, query: &str, limit: usize, json: bool) -> Result<()> {
    let engine = load_engine(records, schema)?;

    let start = Instant::now();
    let results = engine
        .search(query, limit)
        .with_context(|| format!("search for {:?} failed", query))?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&results).context("failed to serialize results")?
        );
    } else {
        display::print_results(query, &results, engine.len(), elapsed_ms);
    }
    Ok(())
}
