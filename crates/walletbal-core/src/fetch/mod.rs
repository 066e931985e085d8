//! Single-attempt HTTP fetchers shared by the provider adapters.
//!
//! | Fetcher | Body | Success signal |
//! |---------|------|----------------|
//! | [`NumberFetcher`] | plain decimal number | 2xx status |
//! | [`JsonFetcher`] | JSON object with a `status` field | 2xx status and `status == "1"` |
//!
//! Neither fetcher retries: a failed attempt is terminal for its sub-fetch.

mod json;
mod number;

pub use json::{JsonFetcher, SUCCESS_STATUS};
pub use number::NumberFetcher;
pub(crate) use number::parse_decimal;

use tracing::debug;

use crate::http_client::{HttpClient, HttpRequest};
use crate::FetchError;

/// Issues one GET and returns the body of a 2xx response.
///
/// Non-2xx responses become [`FetchError::http_status`] carrying the body,
/// or the status line when the body is empty.
async fn fetch_body(
    http_client: &dyn HttpClient,
    url: &str,
    timeout_ms: u64,
) -> Result<String, FetchError> {
    debug!(url = %redact_url(url), "issuing upstream request");

    let response = http_client
        .execute(HttpRequest::get(url).with_timeout_ms(timeout_ms))
        .await
        .map_err(|error| FetchError::transport(format!("transport failure: {error}")))?;

    if !response.is_success() {
        let message = if response.body.is_empty() {
            response.status_text()
        } else {
            response.body
        };
        return Err(FetchError::http_status(message));
    }

    Ok(response.body)
}

/// Masks API key query values so URLs can be logged.
pub(crate) fn redact_url(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_owned();
    };

    let query = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) if is_secret_param(name) && !value.is_empty() => {
                format!("{name}=***")
            }
            _ => pair.to_owned(),
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{base}?{query}")
}

fn is_secret_param(name: &str) -> bool {
    name.eq_ignore_ascii_case("key") || name.eq_ignore_ascii_case("apikey")
}
