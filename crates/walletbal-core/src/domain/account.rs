use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// One currency, its addresses and an optional API key.
///
/// The symbol is kept as configured; resolving it to a provider is the
/// orchestrator's job so that unknown symbols still produce a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAccount")]
pub struct Account {
    symbol: String,
    addresses: Vec<String>,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAccount {
    symbol: String,
    #[serde(default)]
    addresses: Vec<String>,
    #[serde(default)]
    api_key: Option<String>,
}

impl Account {
    pub fn new(
        symbol: impl Into<String>,
        addresses: Vec<String>,
        api_key: Option<String>,
    ) -> Result<Self, ValidationError> {
        let symbol = symbol.into().trim().to_owned();
        if symbol.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        if addresses.is_empty() {
            return Err(ValidationError::NoAddresses { symbol });
        }
        if let Some(index) = addresses.iter().position(|address| address.trim().is_empty()) {
            return Err(ValidationError::BlankAddress { symbol, index });
        }

        Ok(Self {
            symbol,
            addresses,
            api_key: api_key.filter(|key| !key.is_empty()),
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

impl TryFrom<RawAccount> for Account {
    type Error = ValidationError;

    fn try_from(raw: RawAccount) -> Result<Self, Self::Error> {
        Self::new(raw.symbol, raw.addresses, raw.api_key)
    }
}
