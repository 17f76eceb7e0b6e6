use crate::result::Error;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;

/// A public 256-bit block hash used as the shuffle seed.
///
/// The hash string is kept exactly as published (prefix and letter case included)
/// because it is concatenated verbatim into every shuffle pre-image.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlockHash {
    /// The hash string as supplied
    raw: String,
    /// The decoded 32 bytes
    inner: [u8; 32],
}

impl BlockHash {
    /// Create from hex string (with or without 0x prefix)
    pub fn from_hex(hex: &str) -> Result<Self, Error> {
        let digits = hex.strip_prefix("0x").unwrap_or(hex);
        if digits.len() != 64 {
            return Err(Error::InvalidBlockHash(format!(
                "expected 64 hex chars, got {}",
                digits.len()
            )));
        }

        let bytes = hex::decode(digits)?;
        let mut inner = [0u8; 32];
        inner.copy_from_slice(&bytes);
        Ok(Self {
            raw: hex.to_string(),
            inner,
        })
    }

    /// The hash exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The decoded hash bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.inner
    }

    /// Convert to lowercase hex string with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.inner))
    }

    /// Keccak-256 of `{step}{hash}`, the pre-image of one shuffle step.
    pub fn step_digest(&self, step: usize) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        hasher.update(step.to_string().as_bytes());
        hasher.update(self.raw.as_bytes());
        hasher.finalize().into()
    }
}

impl TryFrom<String> for BlockHash {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<BlockHash> for String {
    fn from(hash: BlockHash) -> Self {
        hash.raw
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", self.raw)
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
