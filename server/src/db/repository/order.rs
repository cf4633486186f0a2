//! Order Repository

use super::{BaseRepository, CursorParams, Page, RepoError, RepoResult, page_sql};
use crate::db::models::{self, Order, OrderStatus};
use saffron_shared::{now_millis, snowflake_id};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "order";
const DEFAULT_PAGE: usize = 10;

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order (lines and total already resolved by the caller)
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self
            .base
            .db()
            .create((TABLE, snowflake_id()))
            .content(order)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// One keyset page over all orders (admin listing)
    pub async fn list_page(&self, params: &CursorParams) -> RepoResult<Page<Order>> {
        let (sql, limit) = page_sql(TABLE, None, params, DEFAULT_PAGE);
        let mut query = self.base.db().query(sql).bind(("limit", limit as i64));
        if let Some(cursor) = params.cursor {
            query = query.bind(("cursor", cursor));
        }
        let orders: Vec<Order> = query.await?.take(0)?;
        Ok(Page::from_rows(orders, limit, |o| {
            o.id.as_ref().and_then(models::record_key)
        }))
    }

    /// One keyset page of a single customer's orders
    pub async fn list_page_by_customer(
        &self,
        customer: &RecordId,
        params: &CursorParams,
    ) -> RepoResult<Page<Order>> {
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
        let orders: Vec<Order> = query.await?.take(0)?;
        Ok(Page::from_rows(orders, limit, |o| {
            o.id.as_ref().and_then(models::record_key)
        }))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = super::parse_thing(TABLE, id)?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// Kitchen/admin status transition
    ///
    /// Terminal states (Delivered, Cancelled) also stamp `completed_at`.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let thing = super::parse_thing(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;

        let now = now_millis();
        let completed_at = matches!(status, OrderStatus::Delivered | OrderStatus::Cancelled)
            .then_some(now);

        self.base
            .db()
            .query(
                "UPDATE $thing SET status = $status, completed_at = $completed_at, \
                 updated_at = $now",
            )
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("completed_at", completed_at))
            .bind(("now", now))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
