mod chain;
mod health;
mod mine;
pub mod models;
mod nodes;
mod tx;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(chain::get_chain)
            .service(chain::validate_chain)
            .service(mine::mine_block)
            .service(tx::post_transaction)
            .service(tx::get_mempool)
            .service(nodes::register_nodes)
            .service(nodes::list_nodes)
            .service(nodes::resolve_conflicts),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use super::{AppState, init_routes};

    fn test_state() -> web::Data<AppState> {
        web::Data::new(AppState::new("test-node".to_string()))
    }

    #[actix_web::test]
    async fn chain_starts_with_genesis() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/api/v1/chain/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["length"], 1);
        assert_eq!(body["chain"][0]["index"], 1);
        assert_eq!(body["chain"][0]["proof"], 100);
        assert_eq!(body["chain"][0]["previous_hash"], "1");
    }

    #[actix_web::test]
    async fn submitted_transaction_waits_in_mempool() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/tx/")
            .set_json(json!({"sender": "A", "recipient": "B", "amount": 5}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["block_index"], 2);

        let req = test::TestRequest::get().uri("/api/v1/mempool/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["size"], 1);
        assert_eq!(body["transactions"][0]["sender"], "A");
    }

    #[actix_web::test]
    async fn blank_or_missing_fields_are_rejected() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/tx/")
            .set_json(json!({"sender": "  ", "recipient": "B", "amount": 5}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let req = test::TestRequest::post()
            .uri("/api/v1/tx/")
            .set_json(json!({"sender": "A"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let req = test::TestRequest::get().uri("/api/v1/mempool/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["size"], 0);
    }

    #[actix_web::test]
    async fn mine_seals_pending_transactions_with_a_reward() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/tx/")
            .set_json(json!({"sender": "A", "recipient": "B", "amount": 5}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post().uri("/api/v1/mine/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["index"], 2);
        let txs = body["transactions"].as_array().unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0]["sender"], "A");
        assert_eq!(txs[1]["sender"], "0");
        assert_eq!(txs[1]["recipient"], "test-node");
        assert_eq!(txs[1]["amount"], 1);

        let req = test::TestRequest::get().uri("/api/v1/validate/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["valid"], true);
        assert_eq!(body["length"], 2);

        let req = test::TestRequest::get().uri("/api/v1/mempool/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["size"], 0);
    }

    #[actix_web::test]
    async fn duplicate_peer_registration_is_counted_once() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/nodes/register/")
            .set_json(json!({"nodes": ["10.0.0.2:5000", "http://10.0.0.2:5000"]}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["nodes"][0], "10.0.0.2:5000");
    }

    #[actix_web::test]
    async fn malformed_peer_address_rejects_the_batch() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/nodes/register/")
            .set_json(json!({"nodes": ["10.0.0.2:5000", "not-an-address"]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let req = test::TestRequest::get().uri("/api/v1/nodes/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 0);
    }

    #[actix_web::test]
    async fn resolve_without_peers_keeps_the_local_chain() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/nodes/resolve/")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["replaced"], false);
        assert_eq!(body["length"], 1);
    }
}
