use std::sync::Arc;

use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

pub mod auth_handler;
pub mod category_handler;
pub mod qna_handler;
pub mod quiz_handler;
pub mod role_request_handler;
pub mod score_handler;

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let db_health = state.db.health_check().await;

    let status = if db_health.is_ok() {
        "ready"
    } else {
        "not_ready"
    };

    HttpResponse::Ok().json(serde_json::json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "mongodb": if db_health.is_ok() { "ok" } else { "error" }
        }
    }))
}
