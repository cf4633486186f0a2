//! Database Models
//!
//! Entity structs mirroring the SurrealDB tables, plus Create/Update
//! payloads. All keys are snowflake i64 record ids; timestamps are Unix
//! epoch milliseconds.

pub mod serde_helpers;

pub mod cart;
pub mod dining_table;
pub mod employee;
pub mod menu_item;
pub mod notification;
pub mod order;
pub mod reservation;
pub mod user;

pub use cart::{Cart, CartLine, CartLineInput};
pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate};
pub use employee::{Employee, EmployeeCreate, EmployeeRole, EmployeeShift, EmployeeStatus, EmployeeUpdate};
pub use menu_item::{AddOn, MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate, MenuItemView, SpiceLevel};
pub use notification::{Notification, NotificationCreate, NotificationKind};
pub use order::{
    DeliveryType, Order, OrderCreate, OrderLine, OrderLineInput, OrderStatus, PaymentMethod,
    PaymentStatus,
};
pub use reservation::{Reservation, ReservationStatus, ReservationStatusUpdate};
pub use user::{Address, User, UserCreate, UserUpdate};

use surrealdb::RecordId;

/// Extract the numeric snowflake key from a record id.
///
/// Record keys are always created from i64 snowflakes; a non-numeric key
/// can only come from hand-edited data and maps to None.
pub fn record_key(id: &RecordId) -> Option<i64> {
    id.key().to_string().parse::<i64>().ok()
}
