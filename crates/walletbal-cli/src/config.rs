use std::fs;
use std::path::Path;

use tracing::debug;
use walletbal_core::Account;

use crate::error::CliError;

/// Loads the JSON array of accounts stored at `path`.
///
/// Every record is validated on the way in; a blank symbol or an empty
/// address list rejects the whole file.
pub fn load_accounts(path: &Path) -> Result<Vec<Account>, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let accounts: Vec<Account> =
        serde_json::from_str(&raw).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), accounts = accounts.len(), "loaded account file");
    Ok(accounts)
}
