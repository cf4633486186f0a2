//! 实时中继消息类型定义
//!
//! 这些类型在服务端与 socket.io 客户端之间共享：
//! 服务端推送订单/预订事件，客户端按事件名订阅。

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 中继事件类型（对应 socket.io 事件名）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelayEvent {
    /// 订单状态变更（定向推送给下单顾客）
    OrderUpdate,
    /// 预订创建/变更（广播给管理端会话）
    ReservationUpdate,
    /// 落库通知的实时镜像（定向推送给接收人）
    Notification,
    /// 会话保活
    Heartbeat,
}

impl RelayEvent {
    /// socket.io 事件名
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayEvent::OrderUpdate => "orderUpdate",
            RelayEvent::ReservationUpdate => "reservationUpdate",
            RelayEvent::Notification => "notification",
            RelayEvent::Heartbeat => "heartbeat",
        }
    }
}

impl fmt::Display for RelayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 订单状态推送载荷 (服务端 -> 顾客端)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub order_id: i64,
    pub status: String,
    /// 关联的通知记录 ID（如果有）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<i64>,
    pub content: String,
}

/// 预订推送载荷 (服务端 -> 管理端广播)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationUpdate {
    pub reservation_id: i64,
    pub table_number: u32,
    pub persons: u32,
    pub status: String,
    /// 预订窗口（Unix 毫秒）
    pub start_time: i64,
    pub end_time: i64,
}

/// 通用通知推送（落库通知的实时镜像）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPush {
    pub request_id: Uuid,
    pub recipient_id: i64,
    pub kind: String,
    pub content: String,
    pub created_at: i64,
}

impl NotificationPush {
    pub fn new(recipient_id: i64, kind: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            recipient_id,
            kind: kind.into(),
            content: content.into(),
            created_at: crate::util::now_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_are_stable() {
        // 客户端按这些字符串订阅，改名即断连
        assert_eq!(RelayEvent::OrderUpdate.as_str(), "orderUpdate");
        assert_eq!(RelayEvent::ReservationUpdate.as_str(), "reservationUpdate");
        assert_eq!(RelayEvent::Notification.as_str(), "notification");
        assert_eq!(RelayEvent::Heartbeat.as_str(), "heartbeat");
    }

    #[test]
    fn payloads_serialize_camel_case() {
        let update = OrderUpdate {
            order_id: 42,
            status: "preparing".into(),
            notification_id: None,
            content: "Your order #42 is now preparing".into(),
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["orderId"], 42);
        assert_eq!(json["status"], "preparing");
        // None 的通知 ID 不上线
        assert!(json.get("notificationId").is_none());

        let push = NotificationPush::new(7, "orders", "ready");
        let json = serde_json::to_value(&push).unwrap();
        assert_eq!(json["recipientId"], 7);
        assert!(json["requestId"].is_string());
    }
}
