use std::sync::atomic::Ordering;

use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, info, warn};

use super::models::{AppState, NodesResponse, RegisterRequest, ResolveResponse};
use crate::node::consensus;

/// Register one or more peer nodes. The batch is all-or-nothing: a single
/// malformed address rejects the request without touching the registry.
#[post("/nodes/register/")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> impl Responder {
    if body.nodes.is_empty() {
        return HttpResponse::BadRequest().body("supply at least one node address");
    }

    let mut registry = state.peers.lock().expect("mutex poisoned");
    if let Err(e) = registry.register_all(body.nodes.iter().map(String::as_str)) {
        warn!("POST /nodes/register/ - rejected: {e}");
        return HttpResponse::BadRequest().body(e.to_string());
    }

    info!("registered peers, {} known", registry.len());
    HttpResponse::Ok().json(NodesResponse {
        nodes: registry.snapshot(),
        total: registry.len(),
    })
}

/// List the registered peers.
#[get("/nodes/")]
pub async fn list_nodes(state: web::Data<AppState>) -> impl Responder {
    let registry = state.peers.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(NodesResponse {
        nodes: registry.snapshot(),
        total: registry.len(),
    })
}

/// Run the consensus rule: fetch every peer's chain and adopt the longest
/// valid one that is strictly longer than ours. Unreachable peers are
/// skipped; they never abort resolution for the rest.
#[post("/nodes/resolve/")]
pub async fn resolve_conflicts(state: web::Data<AppState>) -> impl Responder {
    let peers = { state.peers.lock().expect("mutex poisoned").snapshot() };
    let local_len = { state.blockchain.lock().expect("mutex poisoned").len() };

    let mut candidates = Vec::new();
    for peer in &peers {
        match consensus::fetch_chain(&state.http, peer).await {
            Ok(chain) => {
                debug!("RESOLVE - peer {} reports length {}", peer, chain.len());
                candidates.push(chain);
            }
            Err(e) => warn!("RESOLVE - skipping peer: {e}"),
        }
    }

    let winner = consensus::select_longest_valid(local_len, candidates);
    let (replaced, length) = {
        let mut bc = state.blockchain.lock().expect("mutex poisoned");
        // replace_chain re-checks length under the lock: the local chain may
        // have grown while the fetches were in flight.
        let replaced = match winner {
            Some(chain) => bc.replace_chain(chain),
            None => false,
        };
        (replaced, bc.len())
    };

    if replaced {
        state.mining_abort.store(true, Ordering::SeqCst);
        info!("RESOLVE - adopted a peer chain of length {length}");
    } else {
        debug!("RESOLVE - local chain kept (length {length})");
    }
    HttpResponse::Ok().json(ResolveResponse { replaced, length })
}
