//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use saffron_shared::{OrderUpdate, RelayEvent, now_millis};
use serde::Deserialize;
use tracing::warn;
use validator::Validate;

use crate::api::identity::CustomerIdentity;
use crate::core::ServerState;
use crate::db::models::{
    self, DeliveryType, NotificationCreate, Order, OrderCreate, OrderLine, OrderStatus,
    PaymentStatus,
};
use crate::db::repository::{
    CartRepository, CursorParams, MenuItemRepository, NotificationRepository, OrderRepository,
    Page,
};
use crate::money;
use crate::utils::{AppError, AppResponse, AppResult, ok, validation};

/// POST /api/orders - 下单
///
/// `lines` 省略时从购物车结算，成功后清空购物车。
pub async fn create(
    State(state): State<ServerState>,
    identity: CustomerIdentity,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<AppResponse<Order>>> {
    payload.validate()?;

    match payload.delivery_type {
        DeliveryType::DineIn if payload.table_number.is_none() => {
            return Err(AppError::business_rule(
                "Dine-in orders require a table number",
            ));
        }
        DeliveryType::Delivery if payload.address.is_none() => {
            return Err(AppError::business_rule(
                "Delivery orders require an address",
            ));
        }
        _ => {}
    }
    if let Some(address) = &payload.address {
        validation::validate_address(address)?;
    }

    let carts = CartRepository::new(state.db.clone());
    let menu = MenuItemRepository::new(state.db.clone());

    // 显式 lines 或购物车二选一
    let (lines, from_cart) = match &payload.lines {
        Some(inputs) if !inputs.is_empty() => {
            let mut lines = Vec::with_capacity(inputs.len());
            for input in inputs {
                input.validate()?;
                let item = menu.find_by_record(&input.menu_item).await?.ok_or_else(|| {
                    AppError::not_found(format!("Menu item {} not found", input.menu_item))
                })?;
                if !item.is_available {
                    return Err(AppError::business_rule(format!(
                        "Menu item {} is not available",
                        item.name
                    )));
                }
                lines.push(OrderLine {
                    menu_item: input.menu_item.clone(),
                    quantity: input.quantity,
                    price: item.final_price(),
                });
            }
            (lines, false)
        }
        _ => {
            let cart = carts
                .find_by_customer(&identity.id)
                .await?
                .filter(|c| !c.lines.is_empty())
                .ok_or_else(|| AppError::business_rule("Cart is empty"))?;
            let lines = cart
                .lines
                .into_iter()
                .map(|l| OrderLine {
                    menu_item: l.menu_item,
                    quantity: l.quantity,
                    price: l.price,
                })
                .collect();
            (lines, true)
        }
    };

    let now = now_millis();
    let order = Order {
        id: None,
        customer: identity.id.clone(),
        total_price: money::lines_total(lines.iter().map(|l| (l.price, l.quantity))),
        lines,
        status: OrderStatus::Pending,
        payment_method: payload.payment_method,
        payment_status: PaymentStatus::Pending,
        delivery_type: payload.delivery_type,
        table_number: payload.table_number,
        address: payload.address,
        special_instructions: payload.special_instructions,
        completed_at: None,
        created_at: now,
        updated_at: now,
    };

    let repo = OrderRepository::new(state.db.clone());
    let order = repo.create(order).await?;

    if from_cart {
        if let Err(e) = carts.clear(&identity.id).await {
            warn!("failed to clear cart after checkout: {e}");
        }
    }

    Ok(ok(order))
}

/// GET /api/orders - 分页获取全部订单 (管理端)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<CursorParams>,
) -> AppResult<Json<AppResponse<Page<Order>>>> {
    let repo = OrderRepository::new(state.db.clone());
    let page = repo.list_page(&params).await?;
    Ok(ok(page))
}

/// GET /api/orders/my - 当前顾客的订单
pub async fn list_mine(
    State(state): State<ServerState>,
    identity: CustomerIdentity,
    Query(params): Query<CursorParams>,
) -> AppResult<Json<AppResponse<Page<Order>>>> {
    let repo = OrderRepository::new(state.db.clone());
    let page = repo.list_page_by_customer(&identity.id, &params).await?;
    Ok(ok(page))
}

/// GET /api/orders/:id - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(ok(order))
}

/// Status transition payload
#[derive(Debug, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// PATCH /api/orders/:id/status - 状态变更
///
/// 变更同时落一条通知并实时推送给下单顾客。
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<AppResponse<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo.update_status(&id, payload.status).await?;

    let Some(order_id) = order.id.as_ref().and_then(models::record_key) else {
        return Ok(ok(order));
    };
    let content = format!("Your order #{order_id} is now {}", order.status);

    let notifications = NotificationRepository::new(state.db.clone());
    let notification = notifications
        .create(NotificationCreate {
            recipient: order.customer.clone(),
            kind: Default::default(),
            content: content.clone(),
            order: order.id.clone(),
        })
        .await;

    let notification_id = match notification {
        Ok(n) => n.id.as_ref().and_then(models::record_key),
        Err(e) => {
            warn!("failed to persist order notification: {e}");
            None
        }
    };

    if let Some(customer_id) = models::record_key(&order.customer) {
        let push = OrderUpdate {
            order_id,
            status: order.status.to_string(),
            notification_id,
            content,
        };
        state
            .relay
            .notify_user(customer_id, RelayEvent::OrderUpdate, &push)
            .await;
    }

    Ok(ok(order))
}
