use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::BalanceReport;

/// Drains worker results until the expected number of reports has arrived.
#[derive(Debug)]
pub struct ReportCollector {
    receiver: mpsc::Receiver<BalanceReport>,
    expected: usize,
}

impl ReportCollector {
    pub fn new(receiver: mpsc::Receiver<BalanceReport>, expected: usize) -> Self {
        Self { receiver, expected }
    }

    pub const fn expected(&self) -> usize {
        self.expected
    }

    /// Waits for exactly `expected` reports. Stops early only if every
    /// sender is gone, which means a worker died before reporting.
    pub async fn collect(mut self) -> Vec<BalanceReport> {
        let mut reports = Vec::with_capacity(self.expected);
        while reports.len() < self.expected {
            match self.receiver.recv().await {
                Some(report) => {
                    debug!(
                        symbol = %report.symbol,
                        received = reports.len() + 1,
                        expected = self.expected,
                        "report received"
                    );
                    reports.push(report);
                }
                None => {
                    warn!(
                        received = reports.len(),
                        expected = self.expected,
                        "report channel closed before all accounts reported"
                    );
                    break;
                }
            }
        }
        reports
    }
}

/// Ranked reports plus the fiat total of the error-free ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    target_currency: String,
    reports: Vec<BalanceReport>,
    total_fiat_value: f64,
}

impl Portfolio {
    /// Sorts reports by fiat value, highest first, and totals the reports
    /// without an error. Errored reports stay in the ranking but never count
    /// toward the total.
    pub fn rank(target_currency: impl Into<String>, mut reports: Vec<BalanceReport>) -> Self {
        reports.sort_by(|left, right| right.fiat_value().total_cmp(&left.fiat_value()));
        let total_fiat_value = reports
            .iter()
            .filter(|report| report.is_ok())
            .map(BalanceReport::fiat_value)
            .sum();

        Self {
            target_currency: target_currency.into(),
            reports,
            total_fiat_value,
        }
    }

    pub fn target_currency(&self) -> &str {
        &self.target_currency
    }

    pub fn reports(&self) -> &[BalanceReport] {
        &self.reports
    }

    pub const fn total_fiat_value(&self) -> f64 {
        self.total_fiat_value
    }

    pub fn failed_count(&self) -> usize {
        self.reports.iter().filter(|report| !report.is_ok()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FetchError, FetchOutcome, ProviderId};

    fn ok(symbol: &str, balance: f64, rate: f64) -> BalanceReport {
        BalanceReport::merge(
            symbol,
            Some(ProviderId::Cryptoid),
            FetchOutcome::success(balance),
            FetchOutcome::success(rate),
        )
    }

    #[test]
    fn ranks_by_fiat_value_descending() {
        let portfolio = Portfolio::rank(
            "usd",
            vec![ok("LTC", 1.0, 10.0), ok("BTC", 1.0, 100.0), ok("DASH", 2.0, 25.0)],
        );

        let symbols: Vec<&str> = portfolio
            .reports()
            .iter()
            .map(|report| report.symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["BTC", "DASH", "LTC"]);
        assert_eq!(portfolio.total_fiat_value(), 160.0);
        assert_eq!(portfolio.target_currency(), "usd");
    }

    #[test]
    fn errored_reports_are_ranked_but_not_totalled() {
        let partial = BalanceReport::merge(
            "LTC",
            Some(ProviderId::Cryptoid),
            FetchOutcome::partial(10.0, Some(FetchError::decode("bad body"))),
            FetchOutcome::success(50.0),
        );
        let portfolio = Portfolio::rank(
            "usd",
            vec![
                ok("BTC", 1.0, 100.0),
                partial,
                BalanceReport::unresolved("XYZ", FetchError::unknown_currency("XYZ")),
            ],
        );

        assert_eq!(portfolio.reports()[0].symbol, "LTC");
        assert_eq!(portfolio.total_fiat_value(), 100.0);
        assert_eq!(portfolio.failed_count(), 2);
        assert_eq!(portfolio.reports().len(), 3);
    }

    #[test]
    fn empty_portfolio_totals_zero() {
        let portfolio = Portfolio::rank("usd", Vec::new());
        assert!(portfolio.reports().is_empty());
        assert_eq!(portfolio.total_fiat_value(), 0.0);
    }

    #[tokio::test]
    async fn collector_waits_for_every_expected_report() {
        let (sender, receiver) = mpsc::channel(4);
        let collector = ReportCollector::new(receiver, 3);
        assert_eq!(collector.expected(), 3);

        tokio::spawn(async move {
            for symbol in ["BTC", "ETH", "LTC"] {
                sender
                    .send(ok(symbol, 1.0, 1.0))
                    .await
                    .expect("collector should be listening");
            }
        });

        let reports = collector.collect().await;
        assert_eq!(reports.len(), 3);
    }

    #[tokio::test]
    async fn collector_stops_when_senders_are_gone() {
        let (sender, receiver) = mpsc::channel(4);
        sender
            .send(ok("BTC", 1.0, 1.0))
            .await
            .expect("collector should be listening");
        drop(sender);

        let reports = ReportCollector::new(receiver, 2).collect().await;
        assert_eq!(reports.len(), 1);
    }
}
