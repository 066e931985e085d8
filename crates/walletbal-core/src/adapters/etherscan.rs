use serde::Deserialize;

use crate::fetch::{parse_decimal, JsonFetcher};
use crate::provider::{CurrencyProvider, ProviderFuture};
use crate::{FetchError, FetchOutcome, ProviderId};

const BASE_URL: &str = "https://api.etherscan.io/api";
const WEI_PER_ETHER: f64 = 1_000_000_000_000_000_000.0;
const SUPPORTED_TARGET: &str = "usd";

/// Ether balances and prices from api.etherscan.io.
#[derive(Clone)]
pub struct EtherscanProvider {
    fetcher: JsonFetcher,
}

#[derive(Debug, Deserialize)]
struct BalanceMultiResponse {
    #[serde(default)]
    result: Vec<AccountBalance>,
}

#[derive(Debug, Deserialize)]
struct AccountBalance {
    #[serde(default)]
    account: String,
    balance: String,
}

#[derive(Debug, Deserialize)]
struct EthPriceResponse {
    result: EthPrice,
}

#[derive(Debug, Deserialize)]
struct EthPrice {
    ethusd: String,
}

impl EtherscanProvider {
    pub fn new(fetcher: JsonFetcher) -> Self {
        Self { fetcher }
    }

    pub fn balance_url(addresses: &[String]) -> String {
        let joined = addresses
            .iter()
            .map(|address| urlencoding::encode(address))
            .collect::<Vec<_>>()
            .join(",");
        format!("{BASE_URL}?module=account&action=balancemulti&address={joined}&tag=latest")
    }

    pub fn exchange_rate_url(api_key: &str) -> String {
        format!(
            "{BASE_URL}?module=stats&action=ethprice&apikey={}",
            urlencoding::encode(api_key)
        )
    }

    /// Sums every entry in ether; the first unparsable entry aborts the sum.
    async fn balance(&self, addresses: &[String]) -> Result<f64, FetchError> {
        let response: BalanceMultiResponse =
            self.fetcher.fetch(&Self::balance_url(addresses)).await?;

        response.result.iter().try_fold(0.0, |total, entry| {
            let wei = parse_decimal(&entry.balance).map_err(|reason| {
                FetchError::decode(format!(
                    "cannot parse balance \"{}\" of account {}: {reason}",
                    entry.balance, entry.account
                ))
            })?;
            Ok::<f64, FetchError>(total + wei / WEI_PER_ETHER)
        })
    }

    async fn exchange_rate(&self, api_key: &str, target_currency: &str) -> Result<f64, FetchError> {
        if !target_currency.eq_ignore_ascii_case(SUPPORTED_TARGET) {
            return Err(FetchError::unsupported_target_currency("ETH", target_currency));
        }

        let response: EthPriceResponse = self.fetcher.fetch(&Self::exchange_rate_url(api_key)).await?;
        parse_decimal(&response.result.ethusd).map_err(|reason| {
            FetchError::decode(format!(
                "cannot parse ETH price \"{}\": {reason}",
                response.result.ethusd
            ))
        })
    }
}

impl CurrencyProvider for EtherscanProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Etherscan
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
        api_key: &'a str,
        target_currency: &'a str,
    ) -> ProviderFuture<'a> {
        Box::pin(async move {
            FetchOutcome::from(self.exchange_rate(api_key, target_currency).await)
        })
    }
}
