//! Menu Item Repository

use super::{BaseRepository, CursorParams, Page, RepoError, RepoResult, page_sql};
use crate::db::models::{self, MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate};
use saffron_shared::{now_millis, snowflake_id};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_item";
const DEFAULT_PAGE: usize = 10;

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// One keyset page, optionally restricted to a category
    pub async fn list_page(
        &self,
        category: Option<MenuCategory>,
        params: &CursorParams,
    ) -> RepoResult<Page<MenuItem>> {
        let extra = category.is_some().then_some("category = $category");
        let (sql, limit) = page_sql(TABLE, extra, params, DEFAULT_PAGE);
        let mut query = self.base.db().query(sql).bind(("limit", limit as i64));
        if let Some(category) = category {
            query = query.bind(("category", category));
        }
        if let Some(cursor) = params.cursor {
            query = query.bind(("cursor", cursor));
        }
        let items: Vec<MenuItem> = query.await?.take(0)?;
        Ok(Page::from_rows(items, limit, |m| {
            m.id.as_ref().and_then(models::record_key)
        }))
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let thing = super::parse_thing(TABLE, id)?;
        let item: Option<MenuItem> = self.base.db().select(thing).await?;
        Ok(item)
    }

    /// Resolve a menu record id already parsed by the caller
    pub async fn find_by_record(&self, id: &RecordId) -> RepoResult<Option<MenuItem>> {
        let item: Option<MenuItem> = self.base.db().select(id.clone()).await?;
        Ok(item)
    }

    /// Find menu item by dish name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<MenuItem>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Dish '{}' already exists",
                data.name
            )));
        }

        let now = now_millis();
        let item = MenuItem {
            id: None,
            name: data.name,
            description: data.description,
            category: data.category,
            price: data.price,
            discount: data.discount,
            image: data.image,
            ingredients: data.ingredients,
            is_available: data.is_available,
            is_veg: data.is_veg,
            spice_level: data.spice_level,
            add_ons: data.add_ons,
            created_at: now,
            updated_at: now,
        };

        let created: Option<MenuItem> = self
            .base
            .db()
            .create((TABLE, snowflake_id()))
            .content(item)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update a menu item
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let thing = super::parse_thing(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        // Check duplicate dish name if changing it
        if let Some(name) = data.name.as_ref()
            && *name != existing.name
            && self.find_by_name(name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Dish '{}' already exists",
                name
            )));
        }

        // id is skipped during serialization; the record key comes from `thing`
        let merged = MenuItem {
            id: None,
            name: data.name.unwrap_or(existing.name),
            description: data.description.or(existing.description),
            category: data.category.unwrap_or(existing.category),
            price: data.price.unwrap_or(existing.price),
            discount: data.discount.unwrap_or(existing.discount),
            image: data.image.or(existing.image),
            ingredients: data.ingredients.unwrap_or(existing.ingredients),
            is_available: data.is_available.unwrap_or(existing.is_available),
            is_veg: data.is_veg.unwrap_or(existing.is_veg),
            spice_level: data.spice_level.unwrap_or(existing.spice_level),
            add_ons: data.add_ons.unwrap_or(existing.add_ons),
            created_at: existing.created_at,
            updated_at: now_millis(),
        };

        let updated: Option<MenuItem> = self.base.db().update(thing).content(merged).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete a menu item
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
