use serde::{Deserialize, Serialize};

use crate::blockchain::{MINING_REWARD, MINING_SENDER};

/// A transfer of value between two addresses. Immutable once created;
/// lives in the pending pool until a sealed block takes ownership of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

impl Transaction {
    pub fn new(sender: String, recipient: String, amount: u64) -> Self {
        Self {
            sender,
            recipient,
            amount,
        }
    }

    /// Mining reward minted for the node that sealed a block.
    /// The sender is the reserved identifier, not a real address.
    pub fn reward(recipient: &str) -> Self {
        Self {
            sender: MINING_SENDER.to_string(),
            recipient: recipient.to_string(),
            amount: MINING_REWARD,
        }
    }
}
