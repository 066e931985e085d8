use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Upstream API family that served an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Blockchain,
    Etherscan,
    Cryptoid,
}

impl ProviderId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blockchain => "blockchain",
            Self::Etherscan => "etherscan",
            Self::Cryptoid => "cryptoid",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
