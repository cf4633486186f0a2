//! User API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{User, UserCreate, UserUpdate};
use crate::db::repository::{CursorParams, Page, UserRepository};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// GET /api/users - 分页获取用户
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<CursorParams>,
) -> AppResult<Json<AppResponse<Page<User>>>> {
    let repo = UserRepository::new(state.db.clone());
    let page = repo.list_page(&params).await?;
    Ok(ok(page))
}

/// GET /api/users/:id - 获取单个用户
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<User>>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;
    Ok(ok(user))
}

/// POST /api/users - 创建用户
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<AppResponse<User>>> {
    payload.validate()?;
    let repo = UserRepository::new(state.db.clone());
    let user = repo.create(payload).await?;
    Ok(ok(user))
}

/// PUT /api/users/:id - 更新用户
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<AppResponse<User>>> {
    payload.validate()?;
    let repo = UserRepository::new(state.db.clone());
    let user = repo.update(&id, payload).await?;
    Ok(ok(user))
}

/// DELETE /api/users/:id - 删除用户
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = UserRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(ok(result))
}
