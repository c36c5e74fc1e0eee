use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::HoundError;

/// The closed set of record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Exploits,
    Shellcodes,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Exploits, Collection::Shellcodes];

    /// Backing SQLite table.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Exploits => "searcher_exploit",
            Self::Shellcodes => "searcher_shellcode",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exploits => "exploits",
            Self::Shellcodes => "shellcodes",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = HoundError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "exploits" | "searcher_exploit" => Ok(Self::Exploits),
            "shellcodes" | "searcher_shellcode" => Ok(Self::Shellcodes),
            other => Err(HoundError::UnknownCollection(other.to_string())),
        }
    }
}
