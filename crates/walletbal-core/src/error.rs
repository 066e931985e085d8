use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Validation errors raised while constructing domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("currency symbol cannot be empty")]
    EmptySymbol,
    #[error("unknown crypto-currency {value}")]
    UnknownSymbol { value: String },

    #[error("account '{symbol}' must list at least one address")]
    NoAddresses { symbol: String },
    #[error("account '{symbol}' has a blank address at index {index}")]
    BlankAddress { symbol: String, index: usize },

    #[error("worker count must be greater than zero")]
    ZeroWorkers,
    #[error("target currency cannot be empty")]
    EmptyTargetCurrency,
}

/// Classification of a failed sub-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Connection, timeout or body read failure.
    Transport,
    /// Upstream answered with a non-2xx status.
    HttpStatus,
    /// Numeric or JSON body could not be decoded.
    Decode,
    /// Upstream reported a failure through its own status field.
    ProviderStatus,
    UnsupportedTargetCurrency,
    UnknownCurrency,
}

/// Error carried by a balance or exchange-rate sub-fetch.
///
/// `Display` renders the message verbatim so that upstream messages reach
/// the presentation layer unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn http_status(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::HttpStatus,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Decode,
            message: message.into(),
        }
    }

    pub fn provider_status(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::ProviderStatus,
            message: message.into(),
        }
    }

    pub fn unsupported_target_currency(symbol: &str, target_currency: &str) -> Self {
        Self {
            kind: FetchErrorKind::UnsupportedTargetCurrency,
            message: format!(
                "{target_currency} is not supported as target currency for {symbol}, only USD at the moment"
            ),
        }
    }

    pub fn unknown_currency(symbol: &str) -> Self {
        Self {
            kind: FetchErrorKind::UnknownCurrency,
            message: format!("unknown crypto-currency {symbol}"),
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Transport => "fetch.transport",
            FetchErrorKind::HttpStatus => "fetch.http_status",
            FetchErrorKind::Decode => "fetch.decode",
            FetchErrorKind::ProviderStatus => "fetch.provider_status",
            FetchErrorKind::UnsupportedTargetCurrency => "fetch.unsupported_target_currency",
            FetchErrorKind::UnknownCurrency => "fetch.unknown_currency",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FetchError {}

impl Serialize for FetchError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("FetchError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}
