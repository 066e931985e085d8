mod blockchain;
mod etherscan;
mod ledger;

pub use blockchain::BlockchainProvider;
pub use etherscan::EtherscanProvider;
pub use ledger::LedgerProvider;
