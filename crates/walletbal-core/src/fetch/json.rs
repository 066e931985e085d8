use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http_client::{HttpClient, DEFAULT_TIMEOUT_MS};
use crate::FetchError;

use super::fetch_body;

/// Value of the `status` field that marks a successful upstream answer.
pub const SUCCESS_STATUS: &str = "1";

/// Fetches JSON APIs that report success through a string `status` field
/// inside an otherwise successful HTTP response.
#[derive(Clone)]
pub struct JsonFetcher {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl JsonFetcher {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Fetches `url` and decodes it into `T` once the status field says "1".
    ///
    /// Any other status yields a provider-status error whose message is the
    /// response's `message` field verbatim; the payload is discarded.
    pub async fn fetch<T>(&self, url: &str) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let body = fetch_body(self.http_client.as_ref(), url, self.timeout_ms).await?;
        let untyped: Value =
            serde_json::from_str(&body).map_err(|error| FetchError::decode(error.to_string()))?;

        let status = untyped
            .get("status")
            .and_then(Value::as_str)
            .ok_or_else(|| FetchError::decode("response has no string 'status' field"))?;

        if status != SUCCESS_STATUS {
            let message = untyped
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| format!("upstream reported status {status}"));
            return Err(FetchError::provider_status(message));
        }

        serde_json::from_value(untyped).map_err(|error| FetchError::decode(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{block_on, ScriptedHttpClient};
    use crate::FetchErrorKind;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct BalanceResponse {
        status: String,
        result: Vec<BalanceEntry>,
    }

    #[derive(Debug, Deserialize)]
    struct BalanceEntry {
        balance: String,
    }

    fn fetch(client: ScriptedHttpClient, url: &str) -> Result<BalanceResponse, FetchError> {
        let fetcher = JsonFetcher::new(Arc::new(client));
        block_on(fetcher.fetch(url))
    }

    #[test]
    fn decodes_payload_when_status_is_success() {
        let url = "https://api.etherscan.io/api?module=account&action=balancemulti&address=0,1&tag=latest";
        let client = ScriptedHttpClient::new().respond(
            url,
            200,
            r#"{"status":"1","message":"OK","result":[{"account":"0","balance":"190.123"},{"account":"1","balance":"100"}]}"#,
        );

        let response = fetch(client, url).expect("payload should decode");
        assert_eq!(response.status, "1");
        let balances = response
            .result
            .iter()
            .map(|entry| entry.balance.as_str())
            .collect::<Vec<_>>();
        assert_eq!(balances, ["190.123", "100"]);
    }

    #[test]
    fn failed_status_surfaces_message_verbatim() {
        let url = "https://api.etherscan.io/api?module=account&action=balancemulti";
        let client = ScriptedHttpClient::new().respond(
            url,
            200,
            r#"{"status":"0","message":"NOTOK","result":"Error!"}"#,
        );

        let error = fetch(client, url).expect_err("status 0 must fail");
        assert_eq!(error.kind(), FetchErrorKind::ProviderStatus);
        assert_eq!(error.message(), "NOTOK");
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        let client = ScriptedHttpClient::new().respond("https://somesite", 200, "Hello!");
        let error = fetch(client, "https://somesite").expect_err("must fail");
        assert_eq!(error.kind(), FetchErrorKind::Decode);
    }

    #[test]
    fn missing_status_field_is_a_decode_error() {
        let client = ScriptedHttpClient::new().respond("https://nostatus", 200, r#"{"result":[]}"#);
        let error = fetch(client, "https://nostatus").expect_err("must fail");
        assert_eq!(error.kind(), FetchErrorKind::Decode);
    }

    #[test]
    fn non_success_http_status_uses_body() {
        let client = ScriptedHttpClient::new().respond(
            "https://api.etherscan.io/api2",
            404,
            "Server Error in '/' Application.",
        );
        let error = fetch(client, "https://api.etherscan.io/api2").expect_err("must fail");
        assert_eq!(error.kind(), FetchErrorKind::HttpStatus);
        assert_eq!(error.message(), "Server Error in '/' Application.");
    }
}
