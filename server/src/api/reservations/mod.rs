//! Reservation API 模块
//!
//! 预订走分配器：客户端只提交时间窗和人数，桌子由服务端挑选。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::book))
        .route("/my", get(handler::list_mine))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update_status)
                .delete(handler::delete),
        )
}
