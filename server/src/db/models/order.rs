//! Order Model

use super::serde_helpers;
use super::user::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use surrealdb::RecordId;
use validator::Validate;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Preparing => write!(f, "preparing"),
            Self::Ready => write!(f, "ready"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// How the customer pays (gateway interaction is out of scope)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Online,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryType {
    DineIn,
    Delivery,
}

/// One ordered dish with the unit price captured at order time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    pub quantity: u32,
    pub price: f64,
}

/// Order entity (订单)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    pub lines: Vec<OrderLine>,
    pub total_price: f64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub delivery_type: DeliveryType,
    /// Only set for dine-in orders
    #[serde(default)]
    pub table_number: Option<u32>,
    /// Only set for delivery orders
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub special_instructions: String,
    /// Set when the order reaches Delivered or Cancelled (epoch millis)
    #[serde(default)]
    pub completed_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create order payload
///
/// `lines` may be omitted, in which case the order is built from the
/// customer's cart (and the cart is cleared on success).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderCreate {
    #[serde(default)]
    pub lines: Option<Vec<OrderLineInput>>,
    pub payment_method: PaymentMethod,
    pub delivery_type: DeliveryType,
    #[serde(default)]
    pub table_number: Option<u32>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub special_instructions: String,
}

/// One requested dish (price is resolved server-side from the menu)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderLineInput {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: u32,
}
