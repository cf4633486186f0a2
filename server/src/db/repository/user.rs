//! User Repository

use super::{BaseRepository, CursorParams, Page, RepoError, RepoResult, page_sql};
use crate::db::models::{self, User, UserCreate, UserUpdate};
use saffron_shared::{now_millis, snowflake_id};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "user";
const DEFAULT_PAGE: usize = 10;

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// One keyset page of users
    pub async fn list_page(&self, params: &CursorParams) -> RepoResult<Page<User>> {
        let (sql, limit) = page_sql(TABLE, None, params, DEFAULT_PAGE);
        let mut query = self.base.db().query(sql).bind(("limit", limit as i64));
        if let Some(cursor) = params.cursor {
            query = query.bind(("cursor", cursor));
        }
        let users: Vec<User> = query.await?.take(0)?;
        Ok(Page::from_rows(users, limit, |u| {
            u.id.as_ref().and_then(models::record_key)
        }))
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let thing = super::parse_thing(TABLE, id)?;
        let user: Option<User> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Find user by email (unique)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user profile
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "User with email '{}' already exists",
                data.email
            )));
        }

        let now = now_millis();
        let user = User {
            id: None,
            name: data.name,
            email: data.email,
            phone: data.phone,
            role: data.role,
            address: data.address,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created: Option<User> = self
            .base
            .db()
            .create((TABLE, snowflake_id()))
            .content(user)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Update a user profile
    pub async fn update(&self, id: &str, data: UserUpdate) -> RepoResult<User> {
        let thing = super::parse_thing(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;

        if let Some(email) = data.email.as_ref()
            && *email != existing.email
            && self.find_by_email(email).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "User with email '{}' already exists",
                email
            )));
        }

        let merged = User {
            id: None,
            name: data.name.unwrap_or(existing.name),
            email: data.email.unwrap_or(existing.email),
            phone: data.phone.unwrap_or(existing.phone),
            role: existing.role,
            address: data.address.unwrap_or(existing.address),
            is_active: data.is_active.unwrap_or(existing.is_active),
            created_at: existing.created_at,
            updated_at: now_millis(),
        };

        let updated: Option<User> = self.base.db().update(thing).content(merged).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Hard delete a user profile
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
