//! Bounded worker pool turning accounts into balance reports.
//!
//! Accounts are queued FIFO on a shared job channel and picked up by at most
//! `workers` tasks. Each worker resolves the provider for an account, runs the
//! balance and exchange-rate sub-fetches concurrently, waits for both, and
//! sends exactly one [`BalanceReport`] to the collector.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::collector::{Portfolio, ReportCollector};
use crate::factory::{HttpProviderFactory, ProviderFactory};
use crate::provider::CurrencyProvider;
use crate::{Account, BalanceReport, ValidationError};

pub const DEFAULT_WORKERS: usize = 3;
pub const DEFAULT_TARGET_CURRENCY: &str = "usd";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    workers: usize,
    target_currency: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            target_currency: DEFAULT_TARGET_CURRENCY.to_owned(),
        }
    }
}

impl OrchestratorConfig {
    pub fn new(workers: usize, target_currency: impl Into<String>) -> Result<Self, ValidationError> {
        if workers == 0 {
            return Err(ValidationError::ZeroWorkers);
        }
        let target_currency = target_currency.into().trim().to_owned();
        if target_currency.is_empty() {
            return Err(ValidationError::EmptyTargetCurrency);
        }

        Ok(Self {
            workers,
            target_currency,
        })
    }

    pub const fn workers(&self) -> usize {
        self.workers
    }

    pub fn target_currency(&self) -> &str {
        &self.target_currency
    }
}

/// Fans accounts out to a fixed number of workers and gathers their reports.
pub struct BalanceOrchestrator<F = HttpProviderFactory> {
    factory: Arc<F>,
    config: OrchestratorConfig,
}

impl<F> Clone for BalanceOrchestrator<F> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
            config: self.config.clone(),
        }
    }
}

impl<F> BalanceOrchestrator<F>
where
    F: ProviderFactory + 'static,
{
    pub fn new(factory: Arc<F>, config: OrchestratorConfig) -> Self {
        Self { factory, config }
    }

    /// Fetches every account and ranks the results.
    pub async fn fetch_portfolio(&self, accounts: Vec<Account>) -> Portfolio {
        let reports = self.fetch_reports(accounts).await;
        Portfolio::rank(self.config.target_currency(), reports)
    }

    /// Fetches every account and returns one report per account, in
    /// completion order.
    pub async fn fetch_reports(&self, accounts: Vec<Account>) -> Vec<BalanceReport> {
        let expected = accounts.len();
        if expected == 0 {
            return Vec::new();
        }

        let workers = self.config.workers.min(expected);
        info!(accounts = expected, workers, "fetching balances");

        let (job_tx, job_rx) = mpsc::channel::<Account>(workers);
        let job_rx = Arc::new(Mutex::new(job_rx));
        // Sized so that no worker ever blocks on handing off a report.
        let (result_tx, result_rx) = mpsc::channel::<BalanceReport>(expected);

        let mut pool = JoinSet::new();
        for worker in 0..workers {
            let jobs = Arc::clone(&job_rx);
            let results = result_tx.clone();
            let factory = Arc::clone(&self.factory);
            let target_currency = self.config.target_currency.clone();

            pool.spawn(async move {
                loop {
                    let next = jobs.lock().await.recv().await;
                    let Some(account) = next else {
                        break;
                    };
                    let report = fetch_account(factory.as_ref(), &account, &target_currency).await;
                    if results.send(report).await.is_err() {
                        warn!(worker, "report collector went away");
                        break;
                    }
                }
            });
        }
        drop(result_tx);

        for account in accounts {
            if job_tx.send(account).await.is_err() {
                error!("every worker exited before the job queue was drained");
                break;
            }
        }
        drop(job_tx);

        let reports = ReportCollector::new(result_rx, expected).collect().await;

        while let Some(joined) = pool.join_next().await {
            if let Err(join_error) = joined {
                error!(error = %join_error, "balance worker failed");
            }
        }

        reports
    }
}

/// Builds the report for a single account.
///
/// Unknown symbols short-circuit into an errored report without any network
/// call. Otherwise both sub-fetches run concurrently and are both awaited,
/// whichever finishes first.
pub async fn fetch_account<F>(factory: &F, account: &Account, target_currency: &str) -> BalanceReport
where
    F: ProviderFactory + ?Sized,
{
    let provider = match factory.create(account.symbol()) {
        Ok(provider) => provider,
        Err(error) => {
            warn!(symbol = account.symbol(), error = %error, "no provider for account");
            return BalanceReport::unresolved(account.symbol(), error);
        }
    };

    let api_key = account.api_key().unwrap_or_default();
    let (balance, exchange_rate) = tokio::join!(
        provider.fetch_balance(account.addresses(), api_key),
        provider.fetch_exchange_rate(api_key, target_currency),
    );

    let report = BalanceReport::merge(account.symbol(), Some(provider.id()), balance, exchange_rate);
    match &report.error {
        Some(error) => warn!(
            symbol = %report.symbol,
            code = error.code(),
            error = %error,
            "balance report has an error"
        ),
        None => info!(
            symbol = %report.symbol,
            balance = report.balance,
            exchange_rate = report.exchange_rate,
            "balance report ready"
        ),
    }
    report
}
