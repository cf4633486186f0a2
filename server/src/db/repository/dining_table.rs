//! Dining Table Repository

use super::{BaseRepository, CursorParams, Page, RepoError, RepoResult, page_sql};
use crate::db::models::{self, DiningTable, DiningTableCreate, DiningTableUpdate};
use saffron_shared::{now_millis, snowflake_id};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "dining_table";
const DEFAULT_PAGE: usize = 10;

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all tables ordered by display number
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table ORDER BY table_number")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// One keyset page of tables
    pub async fn list_page(&self, params: &CursorParams) -> RepoResult<Page<DiningTable>> {
        let (sql, limit) = page_sql(TABLE, None, params, DEFAULT_PAGE);
        let mut query = self.base.db().query(sql).bind(("limit", limit as i64));
        if let Some(cursor) = params.cursor {
            query = query.bind(("cursor", cursor));
        }
        let tables: Vec<DiningTable> = query.await?.take(0)?;
        Ok(Page::from_rows(tables, limit, |t| {
            t.id.as_ref().and_then(models::record_key)
        }))
    }

    /// Candidate tables for an allocation: capacity >= persons, smallest
    /// sufficient capacity first, then table number.
    pub async fn find_candidates(&self, persons: u32) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query(
                "SELECT * FROM dining_table WHERE capacity >= $persons \
                 ORDER BY capacity ASC, table_number ASC",
            )
            .bind(("persons", persons as i64))
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let thing = super::parse_thing(TABLE, id)?;
        let table: Option<DiningTable> = self.base.db().select(thing).await?;
        Ok(table)
    }

    /// Find table by display number
    pub async fn find_by_number(&self, table_number: u32) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE table_number = $number LIMIT 1")
            .bind(("number", table_number as i64))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Create a new dining table
    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        if self.find_by_number(data.table_number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table number {} already exists",
                data.table_number
            )));
        }

        let now = now_millis();
        let table = DiningTable {
            id: None,
            table_number: data.table_number,
            capacity: data.capacity,
            created_at: now,
            updated_at: now,
        };

        let created: Option<DiningTable> = self
            .base
            .db()
            .create((TABLE, snowflake_id()))
            .content(table)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }

    /// Update a dining table
    pub async fn update(&self, id: &str, data: DiningTableUpdate) -> RepoResult<DiningTable> {
        let thing = super::parse_thing(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Dining table {} not found", id)))?;

        // Check duplicate display number if changing it
        if let Some(number) = data.table_number
            && number != existing.table_number
            && self.find_by_number(number).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Table number {} already exists",
                number
            )));
        }

        let table_number = data.table_number.unwrap_or(existing.table_number);
        let capacity = data.capacity.unwrap_or(existing.capacity);

        self.base
            .db()
            .query(
                "UPDATE $thing SET table_number = $number, capacity = $capacity, \
                 updated_at = $now",
            )
            .bind(("thing", thing))
            .bind(("number", table_number as i64))
            .bind(("capacity", capacity as i64))
            .bind(("now", now_millis()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Dining table {} not found", id)))
    }

    /// Hard delete a dining table
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
