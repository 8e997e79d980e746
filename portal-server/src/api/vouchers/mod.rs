//! Voucher API 模块 (校验/预留/兑换/重置)

mod handler;

use axum::{routing::post, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/vouchers", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/validate", post(handler::validate))
        .route("/reserve", post(handler::reserve))
        .route("/redeem", post(handler::redeem))
        .route("/reset", post(handler::reset))
}
