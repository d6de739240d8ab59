use std::sync::atomic::Ordering;

use actix_web::{HttpResponse, Responder, post, web};
use log::{info, warn};

use super::models::{AppState, MineResponse};
use crate::blockchain::pow;
use crate::transaction::Transaction;

/// Mine a new block:
/// - Snapshot the current head and release the ledger lock
/// - Run the proof search on the blocking pool (cancellable by a chain
///   replacement raising the abort flag)
/// - Re-lock and seal, minting the reward transaction — unless the head
///   moved while we were searching, in which case the proof is stale.
#[post("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let (last_index, last_proof, last_hash) = {
        let bc = state.blockchain.lock().expect("mutex poisoned");
        let last = bc.last_block();
        (last.index, last.proof, last.hash())
    };

    state.mining_abort.store(false, Ordering::SeqCst);
    let worker = state.clone();
    let proof =
        match web::block(move || pow::find_proof_cancellable(last_proof, &worker.mining_abort))
            .await
        {
            Ok(Some(proof)) => proof,
            Ok(None) => {
                warn!("MINER - proof search aborted: chain replaced by a peer's");
                return HttpResponse::Conflict().body("mining aborted: chain replaced");
            }
            Err(e) => {
                warn!("MINER - proof search task failed: {e}");
                return HttpResponse::InternalServerError().body("proof search failed");
            }
        };

    let mut bc = state.blockchain.lock().expect("mutex poisoned");
    let tip = bc.last_block();
    if tip.index != last_index || tip.hash() != last_hash {
        warn!(
            "MINER - head moved during proof search (#{} -> #{}), discarding proof",
            last_index, tip.index
        );
        return HttpResponse::Conflict().body("chain advanced during proof search");
    }

    bc.submit_transaction(Transaction::reward(&state.node_id));
    let block = bc.seal_block(proof, Some(last_hash));
    info!(
        "MINER - sealed block #{} (proof={}, {} txs)",
        block.index,
        block.proof,
        block.transactions.len()
    );
    HttpResponse::Ok().json(MineResponse {
        index: block.index,
        transactions: block.transactions.clone(),
        proof: block.proof,
        previous_hash: block.previous_hash.clone(),
    })
}
