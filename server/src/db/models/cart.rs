//! Cart Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// One dish in the cart with the unit price captured when it was added
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    pub quantity: u32,
    pub price: f64,
}

/// Cart entity (购物车) - one per customer
///
/// `total_price` is recomputed from the lines on every mutation, never
/// accepted from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    #[serde(default)]
    pub lines: Vec<CartLine>,
    #[serde(default)]
    pub total_price: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Add-to-cart payload (price is resolved server-side from the menu)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CartLineInput {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}
