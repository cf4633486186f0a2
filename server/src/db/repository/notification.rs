//! Notification Repository

use super::{BaseRepository, CursorParams, Page, RepoError, RepoResult, page_sql};
use crate::db::models::{self, Notification, NotificationCreate};
use saffron_shared::{now_millis, snowflake_id};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "notification";
const DEFAULT_PAGE: usize = 10;

#[derive(Clone)]
pub struct NotificationRepository {
    base: BaseRepository,
}

impl NotificationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a notification for one recipient
    pub async fn create(&self, payload: NotificationCreate) -> RepoResult<Notification> {
        let now = now_millis();
        let notification = Notification {
            id: None,
            recipient: payload.recipient,
            kind: payload.kind,
            content: payload.content,
            is_read: false,
            order: payload.order,
            created_at: now,
            updated_at: now,
        };
        let created: Option<Notification> = self
            .base
            .db()
            .create((TABLE, snowflake_id()))
            .content(notification)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create notification".to_string()))
    }

    /// One keyset page of a recipient's notifications (newest-first by default
    /// is the caller's choice via `params.sort`)
    pub async fn list_page_by_recipient(
        &self,
        recipient: &RecordId,
        params: &CursorParams,
    ) -> RepoResult<Page<Notification>> {
        let (sql, limit) = page_sql(TABLE, Some("recipient = $recipient"), params, DEFAULT_PAGE);
        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("recipient", recipient.to_string()))
            .bind(("limit", limit as i64));
        if let Some(cursor) = params.cursor {
            query = query.bind(("cursor", cursor));
        }
        let notifications: Vec<Notification> = query.await?.take(0)?;
        Ok(Page::from_rows(notifications, limit, |n| {
            n.id.as_ref().and_then(models::record_key)
        }))
    }

    /// Find notification by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Notification>> {
        let thing = super::parse_thing(TABLE, id)?;
        let notification: Option<Notification> = self.base.db().select(thing).await?;
        Ok(notification)
    }

    /// Mark a notification as read
    pub async fn mark_read(&self, id: &str) -> RepoResult<Notification> {
        let thing = super::parse_thing(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Notification {} not found", id)))?;

        self.base
            .db()
            .query("UPDATE $thing SET is_read = true, updated_at = $now")
            .bind(("thing", thing))
            .bind(("now", now_millis()))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Notification {} not found", id)))
    }
}
