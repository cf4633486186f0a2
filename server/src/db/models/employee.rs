//! Employee Model

use super::serde_helpers;
use super::user::Address;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Employee role within the restaurant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeRole {
    Admin,
    Manager,
    Chef,
    Waiter,
    Cashier,
    Delivery,
}

/// Assigned shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeShift {
    Morning,
    Evening,
    Night,
}

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    Terminated,
}

impl Default for EmployeeStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Employee entity (员工)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: EmployeeRole,
    #[serde(default)]
    pub salary: f64,
    pub shift: EmployeeShift,
    #[serde(default)]
    pub status: EmployeeStatus,
    #[serde(default)]
    pub address: Address,
    /// Joining date (epoch millis)
    pub date_of_joining: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub phone: String,
    pub role: EmployeeRole,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub salary: f64,
    pub shift: EmployeeShift,
    #[serde(default)]
    pub address: Address,
}

/// Update employee payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<EmployeeRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<EmployeeShift>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}
