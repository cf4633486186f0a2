//! Menu Item Model

use super::serde_helpers;
use crate::money;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Food category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    Starter,
    MainCourse,
    Dessert,
    Beverage,
    SideDish,
}

/// Spice level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpiceLevel {
    Low,
    Medium,
    High,
}

impl Default for SpiceLevel {
    fn default() -> Self {
        Self::Medium
    }
}

/// Optional extra sold with a dish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOn {
    pub name: String,
    pub price: f64,
}

/// Menu item entity (菜品)
///
/// The discounted price is NOT stored: it is derived via
/// [`MenuItem::final_price`] so price and discount can never drift apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: MenuCategory,
    pub price: f64,
    /// Discount in percent (0-100)
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_available: bool,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_veg: bool,
    #[serde(default)]
    pub spice_level: SpiceLevel,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
    pub created_at: i64,
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Price after discount, computed on demand
    pub fn final_price(&self) -> f64 {
        money::discounted_price(self.price, self.discount)
    }
}

/// API view of a menu item with the computed final price attached
#[derive(Debug, Clone, Serialize)]
pub struct MenuItemView {
    #[serde(flatten)]
    pub item: MenuItem,
    pub final_price: f64,
}

impl From<MenuItem> for MenuItemView {
    fn from(item: MenuItem) -> Self {
        let final_price = item.final_price();
        Self { item, final_price }
    }
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub category: MenuCategory,
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0, message = "discount must be 0-100 percent"))]
    pub discount: f64,
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default = "default_true")]
    pub is_veg: bool,
    #[serde(default)]
    pub spice_level: SpiceLevel,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<MenuCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 100.0, message = "discount must be 0-100 percent"))]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_veg: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spice_level: Option<SpiceLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_ons: Option<Vec<AddOn>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> MenuItem {
        MenuItem {
            id: None,
            name: "Paneer Tikka".into(),
            description: None,
            category: MenuCategory::Starter,
            price: 12.0,
            discount: 25.0,
            image: None,
            ingredients: vec!["paneer".into(), "spices".into()],
            is_available: true,
            is_veg: true,
            spice_level: SpiceLevel::High,
            add_ons: vec![],
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn final_price_derives_from_discount() {
        let item = sample_item();
        assert_eq!(item.final_price(), 9.0);
    }

    #[test]
    fn view_carries_computed_final_price() {
        let view = MenuItemView::from(sample_item());
        assert_eq!(view.final_price, 9.0);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["final_price"], 9.0);
        // flattened entity fields sit alongside
        assert_eq!(json["name"], "Paneer Tikka");
    }
}
