//! Notification Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use std::fmt;
use surrealdb::RecordId;

/// Notification kind
///
/// Single variant today; new kinds (reservations, promotions) are additive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Orders,
}

impl Default for NotificationKind {
    fn default() -> Self {
        Self::Orders
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orders => f.write_str("orders"),
        }
    }
}

/// Notification entity (通知)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub recipient: RecordId,
    #[serde(default)]
    pub kind: NotificationKind,
    pub content: String,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_read: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub order: Option<RecordId>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create notification payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub recipient: RecordId,
    #[serde(default)]
    pub kind: NotificationKind,
    pub content: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub order: Option<RecordId>,
}
