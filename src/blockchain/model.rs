use chrono::Utc;
use log::debug;

use super::block::Block;
use super::pow;
use super::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::transaction::{Transaction, TransactionPool};

/// The append-only ledger: an in-memory chain of hash-linked blocks plus the
/// pool of transactions pending for the next block. One instance per node,
/// owned by the transport behind a mutex.
#[derive(Debug)]
pub struct Blockchain {
    pub chain: Vec<Block>,
    pub pool: TransactionPool,
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}

impl Blockchain {
    /// Initialize a new chain containing only the genesis block.
    pub fn new() -> Self {
        let genesis = Block {
            index: 1,
            timestamp: Utc::now().timestamp(),
            transactions: Vec::new(),
            proof: GENESIS_PROOF,
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
        };
        Self {
            chain: vec![genesis],
            pool: TransactionPool::new(),
        }
    }

    /// Return the most recently appended block.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("chain always holds at least the genesis block")
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Queue a transaction for the next sealed block and return the index of
    /// the block it is expected to land in. Informational only: another seal
    /// or a chain replacement may shift it before commit.
    pub fn submit_transaction(&mut self, tx: Transaction) -> u64 {
        self.pool.add(tx);
        self.chain.len() as u64 + 1
    }

    /// Seal a new block: drain the pending pool into it, link it to the
    /// current tip and append it. `previous_hash` can be supplied when the
    /// caller already computed the tip's digest; otherwise it is derived
    /// here. Callers must hold the ledger exclusively across the call.
    pub fn seal_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let block = Block {
            index: self.chain.len() as u64 + 1,
            timestamp: Utc::now().timestamp(),
            transactions: self.pool.drain(),
            proof,
            previous_hash: previous_hash.unwrap_or_else(|| self.last_block().hash()),
        };
        debug!(
            "sealed block #{} with {} transaction(s)",
            block.index,
            block.transactions.len()
        );
        self.chain.push(block);
        self.last_block()
    }

    /// Walk a chain verifying hash linkage and the proof-of-work predicate
    /// between every adjacent pair. Empty input is invalid; a single-block
    /// chain is trivially valid.
    pub fn is_valid_chain(chain: &[Block]) -> bool {
        if chain.is_empty() {
            return false;
        }
        for pair in chain.windows(2) {
            let (prev, current) = (&pair[0], &pair[1]);
            if current.previous_hash != prev.hash() {
                return false;
            }
            if !pow::valid_proof(prev.proof, current.proof) {
                return false;
            }
        }
        true
    }

    /// Adopt `candidate` wholesale if it is strictly longer than the local
    /// chain and valid. Equal lengths keep the incumbent. Returns whether
    /// the chain was replaced. The pending pool is left untouched.
    pub fn replace_chain(&mut self, candidate: Vec<Block>) -> bool {
        if candidate.len() <= self.chain.len() || !Self::is_valid_chain(&candidate) {
            return false;
        }
        self.chain = candidate;
        true
    }
}
