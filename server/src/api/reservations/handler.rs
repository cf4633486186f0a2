//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use saffron_shared::{RelayEvent, ReservationUpdate};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::api::identity::CustomerIdentity;
use crate::core::ServerState;
use crate::db::models::{self, Reservation, ReservationStatusUpdate};
use crate::db::repository::{CursorParams, DiningTableRepository, Page, ReservationRepository};
use crate::reservations::AllocationError;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Booking request: the window and party size; the table is chosen
/// server-side.
#[derive(Debug, Deserialize, Validate)]
pub struct BookingRequest {
    pub start_time: i64,
    pub end_time: i64,
    #[validate(range(min = 1, message = "persons must be at least 1"))]
    pub persons: u32,
}

/// POST /api/reservations - 预订桌台
///
/// 分配器在所有候选桌上都输掉并发竞争时重试一次，重试结果直接返回。
pub async fn book(
    State(state): State<ServerState>,
    identity: CustomerIdentity,
    Json(payload): Json<BookingRequest>,
) -> AppResult<Json<AppResponse<Reservation>>> {
    payload.validate()?;

    let first = state
        .allocator
        .book_table(
            identity.id.clone(),
            payload.start_time,
            payload.end_time,
            payload.persons,
        )
        .await;

    let reservation = match first {
        Err(AllocationError::ConcurrentConflict) => {
            info!("booking lost all races, retrying once");
            state
                .allocator
                .book_table(
                    identity.id.clone(),
                    payload.start_time,
                    payload.end_time,
                    payload.persons,
                )
                .await?
        }
        other => other?,
    };

    push_reservation_update(&state, &reservation).await;
    Ok(ok(reservation))
}

/// 广播预订变更给管理端会话
async fn push_reservation_update(state: &ServerState, reservation: &Reservation) {
    let Some(reservation_id) = reservation.id.as_ref().and_then(models::record_key) else {
        return;
    };
    let tables = DiningTableRepository::new(state.db.clone());
    let table_number = tables
        .find_by_id(&reservation.table.to_string())
        .await
        .ok()
        .flatten()
        .map(|t| t.table_number)
        .unwrap_or(0);

    let payload = ReservationUpdate {
        reservation_id,
        table_number,
        persons: reservation.persons,
        status: reservation.status.to_string(),
        start_time: reservation.start_time,
        end_time: reservation.end_time,
    };
    state
        .relay
        .notify_admins(RelayEvent::ReservationUpdate, &payload)
        .await;
}

/// GET /api/reservations - 分页获取全部预订 (管理端)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<CursorParams>,
) -> AppResult<Json<AppResponse<Page<Reservation>>>> {
    let repo = ReservationRepository::new(state.db.clone());
    let page = repo.list_page(&params).await?;
    Ok(ok(page))
}

/// GET /api/reservations/my - 当前顾客的预订
pub async fn list_mine(
    State(state): State<ServerState>,
    identity: CustomerIdentity,
    Query(params): Query<CursorParams>,
) -> AppResult<Json<AppResponse<Page<Reservation>>>> {
    let repo = ReservationRepository::new(state.db.clone());
    let page = repo.list_page_by_customer(&identity.id, &params).await?;
    Ok(ok(page))
}

/// GET /api/reservations/:id - 获取单个预订
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Reservation>>> {
    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;
    Ok(ok(reservation))
}

/// PATCH /api/reservations/:id - 状态变更 (取消/完成)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReservationStatusUpdate>,
) -> AppResult<Json<AppResponse<Reservation>>> {
    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo.update_status(&id, payload.status).await?;
    push_reservation_update(&state, &reservation).await;
    Ok(ok(reservation))
}

/// DELETE /api/reservations/:id - 删除预订
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = ReservationRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(ok(result))
}
