//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Employee, EmployeeCreate, EmployeeUpdate};
use crate::db::repository::{CursorParams, EmployeeRepository, Page};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// GET /api/employees - 分页获取员工
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<CursorParams>,
) -> AppResult<Json<AppResponse<Page<Employee>>>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let page = repo.list_page(&params).await?;
    Ok(ok(page))
}

/// GET /api/employees/:id - 获取单个员工
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Employee>>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", id)))?;
    Ok(ok(employee))
}

/// POST /api/employees - 创建员工
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<AppResponse<Employee>>> {
    payload.validate()?;
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo.create(payload).await?;
    Ok(ok(employee))
}

/// PUT /api/employees/:id - 更新员工
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<AppResponse<Employee>>> {
    payload.validate()?;
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo.update(&id, payload).await?;
    Ok(ok(employee))
}

/// DELETE /api/employees/:id - 删除员工
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(ok(result))
}
