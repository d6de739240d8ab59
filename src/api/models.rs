use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::blockchain::{Block, Blockchain};
use crate::node::PeerRegistry;
use crate::transaction::Transaction;

/// Timeout for a single peer chain fetch during consensus resolution.
const PEER_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared application state: one ledger and one peer registry per node,
/// injected into the handlers. The abort flag lets a chain replacement
/// cancel an in-flight proof search.
pub struct AppState {
    pub node_id: String,
    pub blockchain: Mutex<Blockchain>,
    pub peers: Mutex<PeerRegistry>,
    pub http: reqwest::Client,
    pub mining_abort: AtomicBool,
}

impl AppState {
    pub fn new(node_id: String) -> Self {
        Self {
            node_id,
            blockchain: Mutex::new(Blockchain::new()),
            peers: Mutex::new(PeerRegistry::new()),
            http: reqwest::Client::builder()
                .timeout(PEER_FETCH_TIMEOUT)
                .build()
                .expect("build http client"),
            mining_abort: AtomicBool::new(false),
        }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub length: usize,
    pub chain: &'a [Block],
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub block_index: u64,
}

#[derive(Serialize)]
pub struct MempoolResponse {
    pub size: usize,
    pub transactions: Vec<Transaction>,
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct NodesResponse {
    pub nodes: Vec<String>,
    pub total: usize,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub replaced: bool,
    pub length: usize,
}
