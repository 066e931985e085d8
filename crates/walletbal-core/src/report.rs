use serde::Serialize;

use crate::{FetchError, ProviderId};

/// Result of one sub-fetch: a value paired with an optional error.
///
/// A failed sub-fetch usually carries 0.0, but the ledger fan-out may pair
/// an error with the partial sum it had gathered before the failure.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub value: f64,
    pub error: Option<FetchError>,
}

impl FetchOutcome {
    pub const fn success(value: f64) -> Self {
        Self { value, error: None }
    }

    pub const fn failure(error: FetchError) -> Self {
        Self {
            value: 0.0,
            error: Some(error),
        }
    }

    pub const fn partial(value: f64, error: Option<FetchError>) -> Self {
        Self { value, error }
    }

    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl From<Result<f64, FetchError>> for FetchOutcome {
    fn from(result: Result<f64, FetchError>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(error) => Self::failure(error),
        }
    }
}

/// Balance and exchange rate gathered for one account.
///
/// `balance` is in whole currency units; the fiat value is derived on demand.
/// When `error` is set, `balance` and `exchange_rate` hold whatever the
/// sub-fetches produced and must not be presented as financial figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceReport {
    pub symbol: String,
    pub provider: Option<ProviderId>,
    pub balance: f64,
    pub exchange_rate: f64,
    pub error: Option<FetchError>,
}

impl BalanceReport {
    /// Combines both sub-fetches. A balance error takes priority over a rate
    /// error regardless of which sub-fetch finished first.
    pub fn merge(
        symbol: impl Into<String>,
        provider: Option<ProviderId>,
        balance: FetchOutcome,
        exchange_rate: FetchOutcome,
    ) -> Self {
        let error = balance.error.or(exchange_rate.error);
        Self {
            symbol: symbol.into(),
            provider,
            balance: balance.value,
            exchange_rate: exchange_rate.value,
            error,
        }
    }

    /// Report for an account that never reached a provider.
    pub fn unresolved(symbol: impl Into<String>, error: FetchError) -> Self {
        Self {
            symbol: symbol.into(),
            provider: None,
            balance: 0.0,
            exchange_rate: 0.0,
            error: Some(error),
        }
    }

    pub fn fiat_value(&self) -> f64 {
        self.balance * self.exchange_rate
    }

    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
