use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::transaction::Transaction;

/// A single block in the chain. Immutable once appended; linked to its
/// predecessor through `previous_hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix timestamp (UTC), taken at seal time
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    /// Compute the SHA-256 digest of this block as a hex string.
    ///
    /// The block is serialized to canonical JSON first: serde_json orders
    /// object keys alphabetically (the `preserve_order` feature is off), so
    /// structurally equal blocks always produce the identical digest.
    pub fn hash(&self) -> String {
        let value = serde_json::to_value(self).expect("serialize block");
        let mut hasher = Sha256::new();
        hasher.update(value.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}
