use std::sync::Arc;

use tracing::debug;

use crate::adapters::{BlockchainProvider, EtherscanProvider, LedgerProvider};
use crate::fetch::{JsonFetcher, NumberFetcher};
use crate::http_client::{HttpClient, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::provider::{CurrencyProvider, Provider};
use crate::{CurrencySymbol, FetchError};

/// Resolves a currency symbol to the provider able to serve it.
pub trait ProviderFactory: Send + Sync {
    type Provider: CurrencyProvider;

    /// Fails with an unknown-currency error for symbols outside the known set.
    fn create(&self, symbol: &str) -> Result<Self::Provider, FetchError>;
}

/// Factory wiring every provider to one shared HTTP transport.
///
/// | Symbols | Provider |
/// |---------|----------|
/// | BTC | [`BlockchainProvider`] |
/// | ETH | [`EtherscanProvider`] |
/// | BCC, DASH, LTC, UNO | [`LedgerProvider`] keyed by the lower-case ticker |
#[derive(Clone)]
pub struct HttpProviderFactory {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl Default for HttpProviderFactory {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()))
    }
}

impl HttpProviderFactory {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Per-request timeout handed to every fetcher this factory builds.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn resolve(&self, symbol: &str) -> Result<Provider, FetchError> {
        let currency = CurrencySymbol::parse(symbol)
            .map_err(|_| FetchError::unknown_currency(symbol.trim()))?;
        debug!(%currency, "resolving provider");

        let provider = match currency {
            CurrencySymbol::Btc => Provider::Blockchain(BlockchainProvider::new(self.numbers())),
            CurrencySymbol::Eth => Provider::Etherscan(EtherscanProvider::new(
                JsonFetcher::new(self.http_client.clone()).with_timeout_ms(self.timeout_ms),
            )),
            CurrencySymbol::Bcc | CurrencySymbol::Dash | CurrencySymbol::Ltc | CurrencySymbol::Uno => {
                Provider::Ledger(LedgerProvider::new(currency.upstream_code(), self.numbers()))
            }
        };

        Ok(provider)
    }

    fn numbers(&self) -> NumberFetcher {
        NumberFetcher::new(self.http_client.clone()).with_timeout_ms(self.timeout_ms)
    }
}

impl ProviderFactory for HttpProviderFactory {
    type Provider = Provider;

    fn create(&self, symbol: &str) -> Result<Provider, FetchError> {
        self.resolve(symbol)
    }
}
