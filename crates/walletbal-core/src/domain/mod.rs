//! # Domain Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Account`] | Currency symbol, addresses and optional API key |
//! | [`CurrencySymbol`] | Known crypto-currency tickers |
//! | [`ProviderId`] | Upstream API family serving a currency |

mod account;
mod provider_id;
mod symbol;

pub use account::Account;
pub use provider_id::ProviderId;
pub use symbol::CurrencySymbol;
