//! Reservation Repository

use super::{BaseRepository, CursorParams, Page, RepoError, RepoResult, page_sql};
use crate::db::models::{self, Reservation, ReservationStatus};
use saffron_shared::{now_millis, snowflake_id};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "reservation";
const DEFAULT_PAGE: usize = 5;

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Reservations blocking `table` over the half-open window
    /// [start_time, end_time): `r.start < end AND r.end > start`.
    /// Touching endpoints do not count as a conflict.
    pub async fn find_overlapping(
        &self,
        table: &RecordId,
        start_time: i64,
        end_time: i64,
    ) -> RepoResult<Vec<Reservation>> {
        let overlapping: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE `table` = $table \
                 AND status IN $blocking \
                 AND start_time < $end_time AND end_time > $start_time",
            )
            .bind(("table", table.to_string()))
            .bind(("blocking", ReservationStatus::blocking()))
            .bind(("start_time", start_time))
            .bind(("end_time", end_time))
            .await?
            .take(0)?;
        Ok(overlapping)
    }

    /// Availability predicate for the allocator
    pub async fn is_available(
        &self,
        table: &RecordId,
        start_time: i64,
        end_time: i64,
    ) -> RepoResult<bool> {
        Ok(self
            .find_overlapping(table, start_time, end_time)
            .await?
            .is_empty())
    }

    /// Persist a confirmed booking. Callers must hold the per-table
    /// allocation lock; this method does not re-check availability.
    pub async fn create_confirmed(
        &self,
        customer: RecordId,
        table: RecordId,
        persons: u32,
        start_time: i64,
        end_time: i64,
    ) -> RepoResult<Reservation> {
        let now = now_millis();
        let reservation = Reservation {
            id: None,
            customer,
            table,
            persons,
            date: now,
            start_time,
            end_time,
            status: ReservationStatus::Confirmed,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Reservation> = self
            .base
            .db()
            .create((TABLE, snowflake_id()))
            .content(reservation)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// One keyset page over all reservations (admin listing)
    pub async fn list_page(&self, params: &CursorParams) -> RepoResult<Page<Reservation>> {
        let (sql, limit) = page_sql(TABLE, None, params, DEFAULT_PAGE);
        let mut query = self.base.db().query(sql).bind(("limit", limit as i64));
        if let Some(cursor) = params.cursor {
            query = query.bind(("cursor", cursor));
        }
        let rows: Vec<Reservation> = query.await?.take(0)?;
        Ok(Page::from_rows(rows, limit, |r| {
            r.id.as_ref().and_then(models::record_key)
        }))
    }

    /// One keyset page of a single customer's reservations
    pub async fn list_page_by_customer(
        &self,
        customer: &RecordId,
        params: &CursorParams,
    ) -> RepoResult<Page<Reservation>> {
        let (sql, limit) = page_sql(TABLE, Some("customer = $customer"), params, DEFAULT_PAGE);
        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("customer", customer.to_string()))
            .bind(("limit", limit as i64));
        if let Some(cursor) = params.cursor {
            query = query.bind(("cursor", cursor));
        }
        let rows: Vec<Reservation> = query.await?.take(0)?;
        Ok(Page::from_rows(rows, limit, |r| {
            r.id.as_ref().and_then(models::record_key)
        }))
    }

    /// Find reservation by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let thing = super::parse_thing(TABLE, id)?;
        let reservation: Option<Reservation> = self.base.db().select(thing).await?;
        Ok(reservation)
    }

    /// Administrative status transition (cancel / complete).
    ///
    /// Transitions back into a blocking status are rejected: they would
    /// bypass the allocator's availability re-check and could plant a
    /// second blocking reservation on an already rebooked window. A
    /// cancelled booking is re-confirmed by booking again.
    pub async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> RepoResult<Reservation> {
        if status.blocks_table() {
            return Err(RepoError::Validation(format!(
                "Cannot set a reservation to {status}; book again instead"
            )));
        }
        let thing = super::parse_thing(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))?;

        self.base
            .db()
            .query("UPDATE $thing SET status = $status, updated_at = $now")
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("now", now_millis()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Hard delete a reservation (explicit admin action only)
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = super::parse_thing(TABLE, id)?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
