use std::sync::atomic::{AtomicBool, Ordering};

use sha2::{Digest, Sha256};

use super::POW_PREFIX;

/// How often the proof search polls its abort flag, in candidates tried.
const ABORT_POLL_INTERVAL: u64 = 1024;

/// The proof-of-work predicate: the SHA-256 digest of the decimal
/// concatenation `"{last_proof}{proof}"` must start with `POW_PREFIX`.
pub fn valid_proof(last_proof: u64, proof: u64) -> bool {
    let guess = format!("{last_proof}{proof}");
    let mut hasher = Sha256::new();
    hasher.update(guess.as_bytes());
    hex::encode(hasher.finalize()).starts_with(POW_PREFIX)
}

/// Linear search for the smallest proof satisfying `valid_proof` against
/// `last_proof`. Deterministic; expected ~65536 candidates at the fixed
/// four-zero difficulty.
pub fn find_proof(last_proof: u64) -> u64 {
    let mut proof = 0;
    while !valid_proof(last_proof, proof) {
        proof += 1;
    }
    proof
}

/// Same search as `find_proof`, but abandons it and returns `None` once
/// `abort` is raised, so a node can drop an in-flight mining attempt when
/// consensus replaces its chain. A completed search returns the same proof
/// `find_proof` would.
pub fn find_proof_cancellable(last_proof: u64, abort: &AtomicBool) -> Option<u64> {
    let mut proof = 0;
    loop {
        if proof % ABORT_POLL_INTERVAL == 0 && abort.load(Ordering::Relaxed) {
            return None;
        }
        if valid_proof(last_proof, proof) {
            return Some(proof);
        }
        proof += 1;
    }
}
