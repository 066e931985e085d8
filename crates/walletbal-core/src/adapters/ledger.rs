use futures::stream::{FuturesUnordered, StreamExt};
use tracing::warn;

use crate::fetch::NumberFetcher;
use crate::provider::{CurrencyProvider, ProviderFuture};
use crate::{FetchOutcome, ProviderId};

const BASE_URL: &str = "https://chainz.cryptoid.info";

/// Altcoin balances and prices from chainz.cryptoid.info, parameterized by
/// the lower-case currency code used in its URL paths.
///
/// Balances are fetched with one concurrent request per address.
#[derive(Clone)]
pub struct LedgerProvider {
    currency: String,
    fetcher: NumberFetcher,
}

impl LedgerProvider {
    pub fn new(currency: impl Into<String>, fetcher: NumberFetcher) -> Self {
        Self {
            currency: currency.into().to_ascii_lowercase(),
            fetcher,
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn balance_url(&self, address: &str, api_key: &str) -> String {
        format!(
            "{BASE_URL}/{}/api.dws?q=getbalance&key={}&a={}",
            self.currency,
            urlencoding::encode(api_key),
            urlencoding::encode(address)
        )
    }

    pub fn exchange_rate_url(&self, api_key: &str, target_currency: &str) -> String {
        format!(
            "{BASE_URL}/{}/api.dws?q=ticker.{}&key={}",
            self.currency,
            urlencoding::encode(target_currency),
            urlencoding::encode(api_key)
        )
    }

    /// Sums balances as they arrive. Every request runs to completion; the
    /// first error observed is kept and successful balances still count.
    async fn balance(&self, addresses: &[String], api_key: &str) -> FetchOutcome {
        let fetcher = &self.fetcher;
        let mut pending = addresses
            .iter()
            .map(|address| {
                let url = self.balance_url(address, api_key);
                async move { fetcher.fetch(&url).await }
            })
            .collect::<FuturesUnordered<_>>();

        let mut total = 0.0;
        let mut first_error = None;
        while let Some(result) = pending.next().await {
            match result {
                Ok(balance) => total += balance,
                Err(error) => {
                    warn!(currency = %self.currency, %error, "address balance request failed");
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
            }
        }

        FetchOutcome::partial(total, first_error)
    }
}

impl CurrencyProvider for LedgerProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Cryptoid
    }

    fn fetch_balance<'a>(
        &'a self,
        addresses: &'a [String],
        api_key: &'a str,
    ) -> ProviderFuture<'a> {
        Box::pin(self.balance(addresses, api_key))
    }

    fn fetch_exchange_rate<'a>(
        &'a self,
        api_key: &'a str,
        target_currency: &'a str,
    ) -> ProviderFuture<'a> {
        Box::pin(async move {
            let url = self.exchange_rate_url(api_key, target_currency);
            FetchOutcome::from(self.fetcher.fetch(&url).await)
        })
    }
}
