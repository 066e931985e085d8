use tracing::debug;

use crate::fetch::NumberFetcher;
use crate::provider::{CurrencyProvider, ProviderFuture};
use crate::{FetchError, FetchOutcome, ProviderId};

const BASE_URL: &str = "https://blockchain.info";
const SATOSHIS_PER_BTC: f64 = 100_000_000.0;

/// Bitcoin balances and prices from blockchain.info.
///
/// Balances for all addresses come back summed in satoshis from a single
/// request. The price endpoint only answers "how much BTC is one unit of
/// fiat", so the rate is the reciprocal of that answer.
#[derive(Clone)]
pub struct BlockchainProvider {
    fetcher: NumberFetcher,
}

impl BlockchainProvider {
    pub fn new(fetcher: NumberFetcher) -> Self {
        Self { fetcher }
    }

    pub fn balance_url(addresses: &[String]) -> String {
        let separator = urlencoding::encode("|");
        let joined = addresses
            .iter()
            .map(|address| urlencoding::encode(address))
            .collect::<Vec<_>>()
            .join(separator.as_ref());
        format!("{BASE_URL}/q/addressbalance/{joined}")
    }

    pub fn exchange_rate_url(target_currency: &str) -> String {
        format!(
            "{BASE_URL}/tobtc?currency={}&value=1",
            urlencoding::encode(target_currency)
        )
    }

    async fn balance(&self, addresses: &[String]) -> Result<f64, FetchError> {
        let satoshis = self.fetcher.fetch(&Self::balance_url(addresses)).await?;
        Ok(satoshis / SATOSHIS_PER_BTC)
    }

    async fn exchange_rate(&self, target_currency: &str) -> Result<f64, FetchError> {
        let btc_per_unit = self
            .fetcher
            .fetch(&Self::exchange_rate_url(target_currency))
            .await?;
        if btc_per_unit == 0.0 || !btc_per_unit.is_finite() {
            return Err(FetchError::decode(format!(
                "cannot invert BTC price {btc_per_unit} for {target_currency}"
            )));
        }

        debug!(target_currency, btc_per_unit, "inverting BTC price");
        Ok(1.0 / btc_per_unit)
    }
}

impl CurrencyProvider for BlockchainProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Blockchain
    }

    fn fetch_balance<'a>(
        &'a self,
        addresses: &'a [String],
        _api_key: &'a str,
    ) -> ProviderFuture<'a> {
        Box::pin(async move { FetchOutcome::from(self.balance(addresses).await) })
    }

    fn fetch_exchange_rate<'a>(
        &'a self,
        _api_key: &'a str,
        target_currency: &'a str,
    ) -> ProviderFuture<'a> {
        Box::pin(async move { FetchOutcome::from(self.exchange_rate(target_currency).await) })
    }
}
