//! Cart API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::api::identity::CustomerIdentity;
use crate::core::ServerState;
use crate::db::models::{Cart, CartLineInput};
use crate::db::repository::{CartRepository, MenuItemRepository, parse_thing};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// GET /api/carts/my - 当前顾客的购物车 (不存在时创建空车)
pub async fn get_mine(
    State(state): State<ServerState>,
    identity: CustomerIdentity,
) -> AppResult<Json<AppResponse<Cart>>> {
    let repo = CartRepository::new(state.db.clone());
    let cart = repo.get_or_create(&identity.id).await?;
    Ok(ok(cart))
}

/// POST /api/carts/my/items - 加入/合并一项
///
/// 单价以当前菜单价 (含折扣) 为准。
pub async fn add_item(
    State(state): State<ServerState>,
    identity: CustomerIdentity,
    Json(payload): Json<CartLineInput>,
) -> AppResult<Json<AppResponse<Cart>>> {
    payload.validate()?;

    let menu = MenuItemRepository::new(state.db.clone());
    let item = menu
        .find_by_record(&payload.menu_item)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Menu item {} not found", payload.menu_item))
        })?;
    if !item.is_available {
        return Err(AppError::business_rule(format!(
            "Menu item {} is not available",
            item.name
        )));
    }

    let repo = CartRepository::new(state.db.clone());
    let cart = repo
        .upsert_line(
            &identity.id,
            &payload.menu_item,
            payload.quantity,
            item.final_price(),
        )
        .await?;
    Ok(ok(cart))
}

/// Quantity payload for PATCH
#[derive(Debug, Deserialize)]
pub struct QuantityUpdate {
    pub quantity: u32,
}

/// PATCH /api/carts/my/items/:menu_id - 设置数量 (0 表示移除)
pub async fn set_quantity(
    State(state): State<ServerState>,
    identity: CustomerIdentity,
    Path(menu_id): Path<String>,
    Json(payload): Json<QuantityUpdate>,
) -> AppResult<Json<AppResponse<Cart>>> {
    let menu_item = parse_thing("menu_item", &menu_id)?;
    let repo = CartRepository::new(state.db.clone());
    let cart = repo
        .set_quantity(&identity.id, &menu_item, payload.quantity)
        .await?;
    Ok(ok(cart))
}

/// DELETE /api/carts/my/items/:menu_id - 移除一项
pub async fn remove_item(
    State(state): State<ServerState>,
    identity: CustomerIdentity,
    Path(menu_id): Path<String>,
) -> AppResult<Json<AppResponse<Cart>>> {
    let menu_item = parse_thing("menu_item", &menu_id)?;
    let repo = CartRepository::new(state.db.clone());
    let cart = repo.remove_line(&identity.id, &menu_item).await?;
    Ok(ok(cart))
}

/// DELETE /api/carts/my - 清空购物车
pub async fn clear(
    State(state): State<ServerState>,
    identity: CustomerIdentity,
) -> AppResult<Json<AppResponse<Cart>>> {
    let repo = CartRepository::new(state.db.clone());
    let cart = repo.clear(&identity.id).await?;
    Ok(ok_with_message(cart, "Cart cleared"))
}
