use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, MempoolResponse, NewTxRequest, NewTxResponse};
use crate::error::NodeError;
use crate::transaction::Transaction;

/// Submit a new transaction into the pending pool.
#[post("/tx/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    if let Err(e) = validate_transaction(&body) {
        warn!("POST /tx/ - rejected: {e}");
        return HttpResponse::BadRequest().body(e.to_string());
    }

    let tx = Transaction::new(
        body.sender.trim().to_string(),
        body.recipient.trim().to_string(),
        body.amount,
    );
    let block_index = {
        let mut bc = state.blockchain.lock().expect("mutex poisoned");
        bc.submit_transaction(tx)
    };

    info!(
        "POST /tx/ - accepted {} -> {} ({}), expected in block #{}",
        body.sender.trim(),
        body.recipient.trim(),
        body.amount,
        block_index
    );
    HttpResponse::Ok().json(NewTxResponse { block_index })
}

/// List transactions waiting for the next block.
#[get("/mempool/")]
pub async fn get_mempool(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(MempoolResponse {
        size: bc.pool.len(),
        transactions: bc.pool.pending().to_vec(),
    })
}

fn validate_transaction(req: &NewTxRequest) -> Result<(), NodeError> {
    if req.sender.trim().is_empty() {
        return Err(NodeError::InvalidTransaction("sender must not be blank"));
    }
    if req.recipient.trim().is_empty() {
        return Err(NodeError::InvalidTransaction("recipient must not be blank"));
    }
    Ok(())
}
