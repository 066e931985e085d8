//! CLI argument definitions for walletbal.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--config` | `config.json` | Account file (also `WALLETBAL_CONFIG`) |
//! | `--workers` | `3` | Accounts fetched in parallel |
//! | `--timeout-ms` | `10000` | Per-request timeout in ms |
//! | `--target-currency` | `usd` | Fiat currency for exchange rates |
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! # Examples
//!
//! ```bash
//! # Print balances from ./config.json
//! walletbal
//!
//! # JSON report from another account file
//! walletbal --config ~/wallets.json --format json --pretty
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Crypto-currency wallet balance aggregator.
///
/// Reads a list of accounts, fetches every balance and exchange rate
/// concurrently and prints them ranked by fiat value.
#[derive(Debug, Parser)]
#[command(
    name = "walletbal",
    author,
    version,
    about = "Crypto-currency wallet balance aggregator"
)]
pub struct Cli {
    /// JSON file holding the account list.
    #[arg(long, env = "WALLETBAL_CONFIG", default_value = "config.json")]
    pub config: PathBuf,

    /// Number of accounts fetched concurrently.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u16).range(1..))]
    pub workers: u16,

    /// Request timeout budget in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Fiat currency exchange rates are requested in.
    #[arg(long, default_value = "usd")]
    pub target_currency: String,

    /// Output format for results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

/// Output format for the balance report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per account followed by the total.
    Table,
    /// Single JSON object output.
    Json,
}
