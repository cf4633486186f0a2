//! Shared types for the Saffron platform
//!
//! 服务端与前端客户端（顾客端 / 管理端）之间共享的类型：
//! 实时消息载荷和统一的 ID 生成。

pub mod message;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use message::{NotificationPush, OrderUpdate, RelayEvent, ReservationUpdate};
pub use util::{now_millis, snowflake_id};
