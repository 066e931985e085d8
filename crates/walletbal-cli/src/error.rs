use std::path::PathBuf;

use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] walletbal_core::ValidationError),

    #[error("invalid account file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot read account file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Timestamp(#[from] time::error::Format),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Config { .. } => 2,
            Self::Serialization(_) => 4,
            Self::Timestamp(_) => 4,
            Self::ConfigRead { .. } => 10,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_category() {
        let validation = CliError::from(walletbal_core::ValidationError::ZeroWorkers);
        assert_eq!(validation.exit_code(), 2);

        let read = CliError::ConfigRead {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(read.exit_code(), 10);
        assert!(read.to_string().contains("missing.json"));

        let json_error = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        assert_eq!(CliError::from(json_error).exit_code(), 4);
    }
}
