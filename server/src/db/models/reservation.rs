//! Reservation Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use std::fmt;
use surrealdb::RecordId;

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Cancelled,
        Self::Completed,
    ];

    /// Statuses that hold the table: only these participate in the
    /// overlap invariant.
    pub fn blocks_table(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// String forms of the blocking statuses, for query binds.
    pub fn blocking() -> Vec<String> {
        Self::ALL
            .iter()
            .filter(|s| s.blocks_table())
            .map(ToString::to_string)
            .collect()
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Reservation entity (预订)
///
/// Invariant: for a fixed table, no two reservations whose status blocks
/// the table may have overlapping [start_time, end_time) windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub table: RecordId,
    pub persons: u32,
    /// Calendar date of the booking (epoch millis at booking creation)
    pub date: i64,
    /// Window start (epoch millis, inclusive)
    pub start_time: i64,
    /// Window end (epoch millis, exclusive)
    pub end_time: i64,
    pub status: ReservationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Status transition payload (admin update)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationStatusUpdate {
    pub status: ReservationStatus,
}
