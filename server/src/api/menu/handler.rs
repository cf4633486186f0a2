//! Menu API Handlers
//!
//! Responses carry `final_price` (discount applied), never the raw entity.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{MenuCategory, MenuItemCreate, MenuItemUpdate, MenuItemView};
use crate::db::repository::{CursorParams, MenuItemRepository, Page, SortOrder};
use crate::money;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// List query: cursor pagination plus an optional category filter.
///
/// Kept flat (no `serde(flatten)`) so numeric params deserialize from the
/// query string.
#[derive(Debug, Deserialize)]
pub struct MenuListParams {
    pub category: Option<MenuCategory>,
    pub cursor: Option<i64>,
    pub limit: Option<usize>,
    pub sort: Option<SortOrder>,
}

impl MenuListParams {
    fn cursor_params(&self) -> CursorParams {
        CursorParams {
            cursor: self.cursor,
            limit: self.limit,
            sort: self.sort,
        }
    }
}

/// GET /api/menu - 分页获取菜单 (可按分类过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<MenuListParams>,
) -> AppResult<Json<AppResponse<Page<MenuItemView>>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let page = repo
        .list_page(params.category, &params.cursor_params())
        .await?;
    let page = Page {
        items: page.items.into_iter().map(MenuItemView::from).collect(),
        next_cursor: page.next_cursor,
    };
    Ok(ok(page))
}

/// GET /api/menu/:id - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<MenuItemView>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;
    Ok(ok(MenuItemView::from(item)))
}

/// POST /api/menu - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<AppResponse<MenuItemView>>> {
    payload.validate()?;
    money::validate_price(payload.price, "price").map_err(AppError::validation)?;
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo.create(payload).await?;
    Ok(ok(MenuItemView::from(item)))
}

/// PUT /api/menu/:id - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<AppResponse<MenuItemView>>> {
    payload.validate()?;
    if let Some(price) = payload.price {
        money::validate_price(price, "price").map_err(AppError::validation)?;
    }
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo.update(&id, payload).await?;
    Ok(ok(MenuItemView::from(item)))
}

/// DELETE /api/menu/:id - 删除菜品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(ok(result))
}
