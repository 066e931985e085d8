use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Crypto-currency ticker symbols with a known upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CurrencySymbol {
    Btc,
    Eth,
    Bcc,
    Dash,
    Ltc,
    Uno,
}

impl CurrencySymbol {
    pub const ALL: [Self; 6] = [
        Self::Btc,
        Self::Eth,
        Self::Bcc,
        Self::Dash,
        Self::Ltc,
        Self::Uno,
    ];

    /// Parse a ticker, ignoring case and surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        match trimmed.to_ascii_uppercase().as_str() {
            "BTC" => Ok(Self::Btc),
            "ETH" => Ok(Self::Eth),
            "BCC" => Ok(Self::Bcc),
            "DASH" => Ok(Self::Dash),
            "LTC" => Ok(Self::Ltc),
            "UNO" => Ok(Self::Uno),
            _ => Err(ValidationError::UnknownSymbol {
                value: trimmed.to_owned(),
            }),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Eth => "ETH",
            Self::Bcc => "BCC",
            Self::Dash => "DASH",
            Self::Ltc => "LTC",
            Self::Uno => "UNO",
        }
    }

    /// Currency code used in upstream API paths.
    pub const fn upstream_code(self) -> &'static str {
        match self {
            Self::Btc => "btc",
            Self::Eth => "eth",
            Self::Bcc => "bcc",
            Self::Dash => "dash",
            Self::Ltc => "ltc",
            Self::Uno => "uno",
        }
    }
}

impl Display for CurrencySymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencySymbol {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for CurrencySymbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencySymbol> for String {
    fn from(value: CurrencySymbol) -> Self {
        value.as_str().to_owned()
    }
}
