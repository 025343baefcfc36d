//! Order API Handlers
//!
//! Thin command layer over the lifecycle engine. Commands that the
//! terminal fires repeatedly (add item, pay, switch table) may omit
//! `order_id`; it then resolves through the session binder, bound by
//! the last order-detail view. An explicit id always wins.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::order as repo;
use crate::orders;
use crate::utils::{AppError, AppResult};
use shared::models::{
    DashboardFeed, Order, OrderDetail, OrderItem, OrderSummary, UndeliveredItem,
};

/// Session token header carried by staff terminals
pub(crate) const SESSION_HEADER: &str = "x-session-token";

pub(crate) fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok())
}

/// Explicit order id if given, else the session's bound order.
fn resolve_order_id(
    state: &ServerState,
    headers: &HeaderMap,
    explicit: Option<i64>,
) -> AppResult<i64> {
    if let Some(id) = explicit {
        return Ok(id);
    }
    let token = session_token(headers).ok_or_else(|| {
        AppError::Validation(format!(
            "order_id missing and no {SESSION_HEADER} header to resolve it from"
        ))
    })?;
    state
        .sessions
        .get_active_order(token)
        .ok_or_else(|| AppError::NotFound("No active order bound to this session".into()))
}

// ============================================================================
// Queries
// ============================================================================

/// GET /api/orders/dashboard - 首页看板
///
/// 活跃订单 + 未上菜明细；同时清除本终端的订单绑定（回到总览即
/// 离开某张桌的上下文）。
pub async fn dashboard(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> AppResult<Json<DashboardFeed>> {
    if let Some(token) = session_token(&headers) {
        state.sessions.clear_active_order(token);
    }
    let active_orders = repo::find_open(&state.pool).await?;
    let undelivered_items = repo::find_undelivered(&state.pool).await?;
    Ok(Json(DashboardFeed {
        active_orders,
        undelivered_items,
    }))
}

/// GET /api/orders/open - 未结订单
pub async fn list_open(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderSummary>>> {
    Ok(Json(repo::find_open(&state.pool).await?))
}

/// GET /api/orders/historical - 历史订单
pub async fn list_historical(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<OrderSummary>>> {
    Ok(Json(repo::find_historical(&state.pool).await?))
}

/// GET /api/orders/paid - 已支付订单
pub async fn list_paid(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderSummary>>> {
    Ok(Json(repo::find_paid(&state.pool).await?))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// GET /api/orders/search?q= - 按桌台/区域名检索订单
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<OrderSummary>>> {
    Ok(Json(repo::search(&state.pool, query.q.trim()).await?))
}

/// GET /api/orders/undelivered - 未上菜明细（厨房视图）
pub async fn list_undelivered(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<UndeliveredItem>>> {
    Ok(Json(repo::find_undelivered(&state.pool).await?))
}

/// GET /api/orders/:id - 订单详情
///
/// 查看详情即把该订单绑定为本终端的当前订单。
pub async fn get_detail(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> AppResult<Json<OrderDetail>> {
    let detail = repo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {id} not found")))?;
    if let Some(token) = session_token(&headers) {
        state.sessions.bind_active_order(token, id);
    }
    Ok(Json(detail))
}

// ============================================================================
// Commands
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct AddItemRequest {
    pub order_id: Option<i64>,
    pub menu_item_id: i64,
    #[validate(range(min = 1))]
    pub quantity: i64,
}

/// POST /api/orders/items - 加菜
pub async fn add_item(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<OrderItem>> {
    payload.validate()?;
    let order_id = resolve_order_id(&state, &headers, payload.order_id)?;
    let item =
        orders::add_order_item(&state.pool, order_id, payload.menu_item_id, payload.quantity)
            .await?;
    Ok(Json(item))
}

/// POST /api/orders/items/:id/deliver - 上菜
pub async fn deliver_item(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderItem>> {
    let item = orders::deliver_order_item(&state.pool, id).await?;
    Ok(Json(item))
}

/// DELETE /api/orders/items/:id - 退菜（仅未结订单）
pub async fn delete_item(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    orders::delete_order_item(&state.pool, id).await?;
    Ok(Json(true))
}

/// POST /api/orders/:id/finalize - 结单并释放桌台
pub async fn finalize(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = orders::finalize_order(&state.pool, id).await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize, Default)]
pub struct PayRequest {
    pub order_id: Option<i64>,
}

/// POST /api/orders/pay - 标记已支付（需已结单）
pub async fn pay(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(payload): Json<PayRequest>,
) -> AppResult<Json<Order>> {
    let order_id = resolve_order_id(&state, &headers, payload.order_id)?;
    let order = orders::mark_paid(&state.pool, order_id).await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct SwitchTableRequest {
    pub order_id: Option<i64>,
    pub new_table_id: i64,
}

/// POST /api/orders/switch-table - 换桌
pub async fn switch_table(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(payload): Json<SwitchTableRequest>,
) -> AppResult<Json<Order>> {
    let order_id = resolve_order_id(&state, &headers, payload.order_id)?;
    let order = orders::switch_table(&state.pool, order_id, payload.new_table_id).await?;
    Ok(Json(order))
}

#[derive(Debug, Serialize)]
pub struct BulkFinalizeResponse {
    pub finalized: u64,
}

/// POST /api/orders/finalize-all - 日终清台
pub async fn finalize_all(
    State(state): State<ServerState>,
) -> AppResult<Json<BulkFinalizeResponse>> {
    let finalized = orders::bulk_finalize_open_orders(&state.pool).await?;
    Ok(Json(BulkFinalizeResponse { finalized }))
}
