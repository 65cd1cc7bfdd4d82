//! Named hasher selection for configuration files and flags.

use crate::error::Error;
use crate::hash::{Blake3Hasher, KeyHasher, SipHasher, Xxh3Hasher};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The built-in hashers, selectable by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HasherKind {
    #[default]
    Blake3,
    Siphash,
    Xxh3,
}

impl HasherKind {
    /// Builds a shared instance of the selected hasher.
    pub fn build(self) -> Arc<dyn KeyHasher> {
        match self {
            HasherKind::Blake3 => Arc::new(Blake3Hasher),
            HasherKind::Siphash => Arc::new(SipHasher),
            HasherKind::Xxh3 => Arc::new(Xxh3Hasher),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            HasherKind::Blake3 => "blake3",
            HasherKind::Siphash => "siphash",
            HasherKind::Xxh3 => "xxh3",
        }
    }
}

impl fmt::Display for HasherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HasherKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blake3" => Ok(HasherKind::Blake3),
            "siphash" | "sip" => Ok(HasherKind::Siphash),
            "xxh3" | "xxhash" => Ok(HasherKind::Xxh3),
            other => Err(Error::InvalidConfig(format!("unknown hasher: {other}"))),
        }
    }
}
