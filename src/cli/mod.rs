// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the fieldseek command-line interface.
//!
//! Two subcommands over a JSON array of records and a JSON schema file:
//! `search` runs a query and prints ranked results, `inspect` shows the
//! field table and how many records carry a value for each field.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fieldseek",
    about = "Multi-field fuzzy search over JSON records",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search records and display ranked results
    Search {
        /// JSON file containing an array of records
        records: PathBuf,

        /// Search query
        query: String,

        /// Schema file describing searchable fields
        #[arg(short, long)]
        schema: PathBuf,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the field table and indexed value counts
    Inspect {
        /// JSON file containing an array of records
        records: PathBuf,

        /// Schema file describing searchable fields
        #[arg(short, long)]
        schema: PathBuf,
    },
}
