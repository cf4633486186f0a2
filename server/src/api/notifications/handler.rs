//! Notification API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use saffron_shared::{NotificationPush, RelayEvent};

use crate::api::identity::CustomerIdentity;
use crate::core::ServerState;
use crate::db::models::{self, Notification, NotificationCreate};
use crate::db::repository::{CursorParams, NotificationRepository, Page};
use crate::utils::{AppResponse, AppResult, ok, validation};

/// GET /api/notifications/my - 当前顾客的通知
pub async fn list_mine(
    State(state): State<ServerState>,
    identity: CustomerIdentity,
    Query(params): Query<CursorParams>,
) -> AppResult<Json<AppResponse<Page<Notification>>>> {
    let repo = NotificationRepository::new(state.db.clone());
    let page = repo.list_page_by_recipient(&identity.id, &params).await?;
    Ok(ok(page))
}

/// POST /api/notifications - 创建通知 (内部/管理端)
///
/// 落库后实时镜像给在线的接收人。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<NotificationCreate>,
) -> AppResult<Json<AppResponse<Notification>>> {
    validation::validate_required_text(&payload.content, "content", validation::MAX_NOTE_LEN)?;
    let repo = NotificationRepository::new(state.db.clone());
    let notification = repo.create(payload).await?;

    if let Some(recipient_id) = models::record_key(&notification.recipient) {
        let push = NotificationPush::new(
            recipient_id,
            notification.kind.to_string(),
            notification.content.clone(),
        );
        state
            .relay
            .notify_user(recipient_id, RelayEvent::Notification, &push)
            .await;
    }
    Ok(ok(notification))
}

/// PATCH /api/notifications/:id/read - 标记已读
pub async fn mark_read(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Notification>>> {
    let repo = NotificationRepository::new(state.db.clone());
    let notification = repo.mark_read(&id).await?;
    Ok(ok(notification))
}
