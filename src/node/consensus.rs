use log::warn;
use serde::Deserialize;

use crate::blockchain::{Block, Blockchain};
use crate::error::NodeError;

/// Chain snapshot as served by a peer's `/api/v1/chain/` endpoint.
#[derive(Debug, Deserialize)]
pub struct PeerChain {
    pub length: usize,
    pub chain: Vec<Block>,
}

/// Fetch a peer's full chain. Any transport failure or non-2xx status maps
/// to `PeerUnreachable`; a payload whose reported length disagrees with the
/// actual chain is rejected outright.
pub async fn fetch_chain(client: &reqwest::Client, peer: &str) -> Result<Vec<Block>, NodeError> {
    let unreachable = |e: reqwest::Error| NodeError::PeerUnreachable(peer.to_string(), e.to_string());

    let url = format!("http://{peer}/api/v1/chain/");
    let body: PeerChain = client
        .get(&url)
        .send()
        .await
        .map_err(unreachable)?
        .error_for_status()
        .map_err(unreachable)?
        .json()
        .await
        .map_err(unreachable)?;

    if body.length != body.chain.len() {
        return Err(NodeError::InvalidChain(
            "reported length does not match chain",
        ));
    }
    Ok(body.chain)
}

/// Pick the replacement chain, if any: the longest candidate that is both
/// strictly longer than `local_len` and internally valid. Equal lengths
/// never displace the incumbent, and an invalid chain never wins regardless
/// of its length.
pub fn select_longest_valid(local_len: usize, candidates: Vec<Vec<Block>>) -> Option<Vec<Block>> {
    let mut best: Option<Vec<Block>> = None;
    for chain in candidates {
        let floor = best.as_ref().map_or(local_len, Vec::len);
        if chain.len() <= floor {
            continue;
        }
        if !Blockchain::is_valid_chain(&chain) {
            warn!("discarding invalid candidate chain of length {}", chain.len());
            continue;
        }
        best = Some(chain);
    }
    best
}
