//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`tables`] - 桌台管理接口
//! - [`reservations`] - 预订接口 (走分配器)
//! - [`menu`] - 菜单管理接口
//! - [`orders`] - 订单接口
//! - [`carts`] - 购物车接口
//! - [`employees`] - 员工管理接口
//! - [`users`] - 用户管理接口
//! - [`notifications`] - 通知接口

pub mod identity;

pub mod health;

// Data models API
pub mod carts;
pub mod employees;
pub mod menu;
pub mod notifications;
pub mod orders;
pub mod reservations;
pub mod tables;
pub mod users;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Assemble every resource router
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(tables::router())
        .merge(reservations::router())
        .merge(menu::router())
        .merge(orders::router())
        .merge(carts::router())
        .merge(employees::router())
        .merge(users::router())
        .merge(notifications::router())
}
