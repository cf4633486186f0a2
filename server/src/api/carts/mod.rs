//! Cart API 模块
//!
//! 所有端点都作用于当前顾客自己的购物车 (`/my`)。

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/carts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/my", get(handler::get_mine).delete(handler::clear))
        .route("/my/items", post(handler::add_item))
        .route(
            "/my/items/{menu_id}",
            axum::routing::patch(handler::set_quantity).delete(handler::remove_item),
        )
}
