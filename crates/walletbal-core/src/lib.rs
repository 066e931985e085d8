//! # Walletbal Core
//!
//! Balance and exchange-rate aggregation engine for crypto-currency wallets.
//!
//! ## Overview
//!
//! Given a list of accounts (a currency symbol, its addresses and an optional
//! API key) this crate:
//!
//! - resolves each symbol to the upstream API able to serve it
//! - fetches the summed balance and the fiat exchange rate concurrently
//! - runs accounts through a bounded worker pool
//! - ranks the resulting reports by fiat value and totals the clean ones
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Blockchain.info, Etherscan and CryptoID providers |
//! | [`collector`] | Report collection and ranking |
//! | [`domain`] | Accounts, currency symbols and provider identifiers |
//! | [`error`] | Validation and fetch errors |
//! | [`factory`] | Symbol to provider resolution |
//! | [`fetch`] | Numeric and JSON body fetchers |
//! | [`http_client`] | HTTP client abstraction |
//! | [`orchestrator`] | Worker pool producing one report per account |
//! | [`provider`] | Provider capability trait |
//! | [`report`] | Sub-fetch outcomes and balance reports |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use walletbal_core::{Account, BalanceOrchestrator, HttpProviderFactory, OrchestratorConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let accounts = vec![Account::new("BTC", vec!["1BoatSLRHtKNngkdXEeobR76b53LETtpyT".into()], None)?];
//!     let orchestrator = BalanceOrchestrator::new(
//!         Arc::new(HttpProviderFactory::default()),
//!         OrchestratorConfig::default(),
//!     );
//!
//!     let portfolio = orchestrator.fetch_portfolio(accounts).await;
//!     println!("total: {:.2}$", portfolio.total_fiat_value());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / User     │
//! └────────┬────────┘
//!          │ accounts
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  Orchestrator   │────▶│ Provider Factory │
//! │  (W workers)    │     └──────────────────┘
//! └────────┬────────┘
//!          │ balance ∥ rate
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Provider        │────▶│ HTTP Client      │
//! │ (Adapter Trait) │     │ (reqwest)        │
//! └────────┬────────┘     └──────────────────┘
//!          │ reports
//!          ▼
//! ┌─────────────────┐
//! │ Collector       │
//! │ (rank + total)  │
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Fetch failures never abort a run. They travel inside each report:
//!
//! ```rust
//! use walletbal_core::{BalanceReport, FetchErrorKind};
//!
//! fn describe(report: &BalanceReport) -> &'static str {
//!     match report.error.as_ref().map(|error| error.kind()) {
//!         None => "ok",
//!         Some(FetchErrorKind::UnknownCurrency) => "unsupported symbol",
//!         Some(FetchErrorKind::Transport) => "network failure",
//!         Some(_) => "upstream failure",
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - API keys are masked in every logged URL
//! - All HTTP requests use TLS via reqwest

pub mod adapters;
pub mod collector;
pub mod domain;
pub mod error;
pub mod factory;
pub mod fetch;
pub mod http_client;
pub mod orchestrator;
pub mod provider;
pub mod report;

#[cfg(test)]
mod test_support;

// Adapter implementations
pub use adapters::{BlockchainProvider, EtherscanProvider, LedgerProvider};

// Collection and ranking
pub use collector::{Portfolio, ReportCollector};

// Domain models
pub use domain::{Account, CurrencySymbol, ProviderId};

// Error types
pub use error::{FetchError, FetchErrorKind, ValidationError};

// Provider resolution
pub use factory::{HttpProviderFactory, ProviderFactory};

// Fetchers
pub use fetch::{JsonFetcher, NumberFetcher};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Orchestration
pub use orchestrator::{fetch_account, BalanceOrchestrator, OrchestratorConfig};

// Provider trait
pub use provider::{CurrencyProvider, Provider, ProviderFuture};

// Reports
pub use report::{BalanceReport, FetchOutcome};
