use std::sync::Arc;

use crate::http_client::{HttpClient, DEFAULT_TIMEOUT_MS};
use crate::FetchError;

use super::fetch_body;

/// Fetches an endpoint whose whole body is one decimal number.
#[derive(Clone)]
pub struct NumberFetcher {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl NumberFetcher {
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

    pub async fn fetch(&self, url: &str) -> Result<f64, FetchError> {
        let body = fetch_body(self.http_client.as_ref(), url, self.timeout_ms).await?;
        parse_number(&body)
    }
}

pub(crate) fn parse_number(body: &str) -> Result<f64, FetchError> {
    let trimmed = body.trim();
    parse_decimal(trimmed)
        .map_err(|reason| FetchError::decode(format!("cannot parse \"{trimmed}\" as a number: {reason}")))
}

/// Parses a finite decimal. `NaN` and infinities are rejected even though
/// `f64::from_str` accepts them.
pub(crate) fn parse_decimal(text: &str) -> Result<f64, String> {
    let value = text.trim().parse::<f64>().map_err(|error| error.to_string())?;
    if !value.is_finite() {
        return Err(String::from("value is not a finite decimal"));
    }
    Ok(value)
}
