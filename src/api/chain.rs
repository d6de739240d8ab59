use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ChainResponse, ValidateResponse};
use crate::blockchain::Blockchain;

/// Get the full chain and its length.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ChainResponse {
        length: bc.len(),
        chain: &bc.chain,
    })
}

/// Validate the local chain: linkage and proof-of-work.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ValidateResponse {
        valid: Blockchain::is_valid_chain(&bc.chain),
        length: bc.len(),
    })
}
