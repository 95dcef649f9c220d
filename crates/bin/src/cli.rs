//! CLI argument definitions for the reorder binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Largest layout the keys command prints.
pub const MAX_KEY_COUNT: u64 = 1_000_000;

/// Reorder position-keyed collections
#[derive(Parser, Debug)]
#[command(name = "reorder")]
#[command(about = "Reorder: rewrite only the position keys of items that moved")]
#[command(version)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human", env = "REORDER_FORMAT")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set the order of a stored collection
    Apply(ApplyArgs),
    /// Show the edit script between two sequences
    Diff(DiffArgs),
    /// Show the keys a full rebalance would assign
    Keys(KeysArgs),
}

/// Arguments for the apply command
#[derive(clap::Args, Debug)]
pub struct ApplyArgs {
    /// JSON state file. A missing file starts an empty collection
    #[arg(short, long, default_value = "reorder.json", env = "REORDER_STATE")]
    pub state: PathBuf,

    /// New item order, comma separated. Omit to clear the collection
    #[arg(short, long, value_delimiter = ',', num_args = 0..)]
    pub order: Vec<String>,

    /// Seed for key selection (random when unset)
    #[arg(long, env = "REORDER_SEED")]
    pub seed: Option<u64>,

    /// Print the result without writing the state file
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the diff command
#[derive(clap::Args, Debug)]
pub struct DiffArgs {
    /// Old sequence, comma separated
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub old: Vec<String>,

    /// New sequence, comma separated
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub new: Vec<String>,
}

/// Arguments for the keys command
#[derive(clap::Args, Debug)]
pub struct KeysArgs {
    /// Number of items to lay out
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(..=MAX_KEY_COUNT))]
    pub count: u64,
}

/// Splits a comma separated argument, dropping empty names.
pub fn sequence(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}
