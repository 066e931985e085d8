//! Provider capability set and its closed set of variants.
//!
//! Every upstream API is reached through [`CurrencyProvider`]:
//!
//! | Method | Result |
//! |--------|--------|
//! | [`fetch_balance`](CurrencyProvider::fetch_balance) | aggregate balance of all addresses, in whole units |
//! | [`fetch_exchange_rate`](CurrencyProvider::fetch_exchange_rate) | price of one unit in the target fiat currency |
//!
//! Both calls resolve to a [`FetchOutcome`] instead of a `Result` so that a
//! partial value can travel alongside its error. Neither retries.

use std::future::Future;
use std::pin::Pin;

use crate::adapters::{BlockchainProvider, EtherscanProvider, LedgerProvider};
use crate::{FetchOutcome, ProviderId};

pub type ProviderFuture<'a> = Pin<Box<dyn Future<Output = FetchOutcome> + Send + 'a>>;

/// Balance and exchange-rate capability of one upstream API.
///
/// Implementations must be `Send + Sync`: the orchestrator drives both
/// sub-fetches of an account concurrently from a worker task.
pub trait CurrencyProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Fetches the summed balance of `addresses`.
    fn fetch_balance<'a>(&'a self, addresses: &'a [String], api_key: &'a str)
        -> ProviderFuture<'a>;

    /// Fetches the price of one whole unit in `target_currency`.
    fn fetch_exchange_rate<'a>(
        &'a self,
        api_key: &'a str,
        target_currency: &'a str,
    ) -> ProviderFuture<'a>;
}

/// The known provider variants.
#[derive(Clone)]
pub enum Provider {
    Blockchain(BlockchainProvider),
    Etherscan(EtherscanProvider),
    Ledger(LedgerProvider),
}

impl CurrencyProvider for Provider {
    fn id(&self) -> ProviderId {
        match self {
            Self::Blockchain(provider) => provider.id(),
            Self::Etherscan(provider) => provider.id(),
            Self::Ledger(provider) => provider.id(),
        }
    }

    fn fetch_balance<'a>(
        &'a self,
        addresses: &'a [String],
        api_key: &'a str,
    ) -> ProviderFuture<'a> {
        match self {
            Self::Blockchain(provider) => provider.fetch_balance(addresses, api_key),
            Self::Etherscan(provider) => provider.fetch_balance(addresses, api_key),
            Self::Ledger(provider) => provider.fetch_balance(addresses, api_key),
        }
    }

    fn fetch_exchange_rate<'a>(
        &'a self,
        api_key: &'a str,
        target_currency: &'a str,
    ) -> ProviderFuture<'a> {
        match self {
            Self::Blockchain(provider) => provider.fetch_exchange_rate(api_key, target_currency),
            Self::Etherscan(provider) => provider.fetch_exchange_rate(api_key, target_currency),
            Self::Ledger(provider) => provider.fetch_exchange_rate(api_key, target_currency),
        }
    }
}
