//! Table Allocation Module
//!
//! 预订分配器：为一个时间窗挑选一张容量足够的空闲桌子。
//!
//! 并发控制：乐观检查通过后，针对候选桌获取 per-table 异步锁并在锁内
//! 重新检查可用性，重检失败说明有并发预订抢先落库。

use crate::db::models::{self, DiningTable, Reservation};
use crate::db::repository::{DiningTableRepository, RepoError, ReservationRepository};
use crate::utils::time;
use dashmap::DashMap;
use std::sync::Arc;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

#[cfg(test)]
mod tests;

/// Allocation failure modes
#[derive(Debug, Error)]
pub enum AllocationError {
    /// 没有任何桌子容得下这批人
    #[error("No tables available for the requested number of persons.")]
    NoCapacity,

    /// 有容量合适的桌子，但请求的时间窗全被占用
    #[error("No tables available for the selected date and time slot.")]
    NoSlot,

    /// A concurrent booking won the race on every remaining candidate
    #[error("Concurrent booking conflict, please retry")]
    ConcurrentConflict,

    #[error("Invalid booking window: {0}")]
    InvalidWindow(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub type AllocationResult<T> = Result<T, AllocationError>;

impl From<AllocationError> for crate::utils::AppError {
    fn from(e: AllocationError) -> Self {
        use crate::utils::AppError;
        match e {
            AllocationError::NoCapacity | AllocationError::NoSlot => {
                AppError::Validation(e.to_string())
            }
            AllocationError::InvalidWindow(msg) => AppError::Validation(msg),
            AllocationError::ConcurrentConflict => AppError::Conflict(e.to_string()),
            AllocationError::Repo(repo) => repo.into(),
        }
    }
}

/// Table allocator with per-table advisory locks
#[derive(Clone)]
pub struct Allocator {
    tables: DiningTableRepository,
    reservations: ReservationRepository,
    /// One lock per table key; populated lazily, never evicted (the fleet
    /// of tables is small and stable)
    locks: Arc<DashMap<i64, Arc<Mutex<()>>>>,
}

impl Allocator {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            tables: DiningTableRepository::new(db.clone()),
            reservations: ReservationRepository::new(db),
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Book a table for `persons` over the half-open window
    /// `[start_time, end_time)`.
    ///
    /// Candidates are tried smallest sufficient capacity first (then by
    /// table number), so large tables stay free for large parties. Returns
    /// the persisted confirmed reservation, or the failure that best
    /// describes why nothing could be booked.
    pub async fn book_table(
        &self,
        customer: RecordId,
        start_time: i64,
        end_time: i64,
        persons: u32,
    ) -> AllocationResult<Reservation> {
        if start_time >= end_time {
            return Err(AllocationError::InvalidWindow(
                "start_time must be before end_time".to_string(),
            ));
        }
        if persons == 0 {
            return Err(AllocationError::InvalidWindow(
                "persons must be at least 1".to_string(),
            ));
        }

        let candidates = self.tables.find_candidates(persons).await?;
        if candidates.is_empty() {
            return Err(AllocationError::NoCapacity);
        }

        let mut lost_race = false;
        for table in &candidates {
            match self
                .try_book(table, &customer, start_time, end_time, persons)
                .await?
            {
                Attempt::Booked(reservation) => return Ok(reservation),
                Attempt::Occupied => {}
                Attempt::LostRace => lost_race = true,
            }
        }

        if lost_race {
            Err(AllocationError::ConcurrentConflict)
        } else {
            Err(AllocationError::NoSlot)
        }
    }

    /// One candidate: optimistic check, then locked re-check and insert
    async fn try_book(
        &self,
        table: &DiningTable,
        customer: &RecordId,
        start_time: i64,
        end_time: i64,
        persons: u32,
    ) -> AllocationResult<Attempt> {
        let Some(thing) = table.id.clone() else {
            return Ok(Attempt::Occupied);
        };
        let Some(key) = models::record_key(&thing) else {
            return Ok(Attempt::Occupied);
        };

        // Optimistic check outside the lock keeps busy tables cheap to skip
        if !self
            .reservations
            .is_available(&thing, start_time, end_time)
            .await?
        {
            return Ok(Attempt::Occupied);
        }

        let lock = self.lock_for(key);
        let _guard = lock.lock().await;

        // Re-check under the lock: a concurrent booking may have landed
        // between the optimistic check and lock acquisition
        if !self
            .reservations
            .is_available(&thing, start_time, end_time)
            .await?
        {
            warn!(
                table_number = table.table_number,
                start_time, end_time, "lost booking race, trying next candidate"
            );
            return Ok(Attempt::LostRace);
        }

        let reservation = self
            .reservations
            .create_confirmed(customer.clone(), thing, persons, start_time, end_time)
            .await?;
        debug!(
            table_number = table.table_number,
            persons,
            start = %time::from_millis(start_time),
            end = %time::from_millis(end_time),
            "table allocated"
        );
        Ok(Attempt::Booked(reservation))
    }

    fn lock_for(&self, key: i64) -> Arc<Mutex<()>> {
        self.locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

enum Attempt {
    Booked(Reservation),
    Occupied,
    LostRace,
}
