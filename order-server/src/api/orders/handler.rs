//! Order API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::Order;
use crate::utils::AppResult;
use shared::order::{CreateOrderRequest, OrderStatus};
use shared::types::{PageQuery, PaginatedResponse, Principal};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Optional status filter, e.g. `status=PENDING`
    pub status: Option<OrderStatus>,
}

impl ListQuery {
    fn page_query(&self) -> PageQuery {
        let defaults = PageQuery::default();
        PageQuery {
            page: self.page.unwrap_or(defaults.page),
            limit: self.limit.unwrap_or(defaults.limit),
        }
    }
}

/// Create an order; the total is always recomputed server-side
pub async fn create(
    State(state): State<ServerState>,
    Path(shop_id): Path<String>,
    principal: Option<Extension<Principal>>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<Order>> {
    let service = state.order_service();
    let order = service
        .create_order(&shop_id, principal.as_deref(), payload)
        .await?;
    Ok(Json(order))
}

/// List orders for the shop, newest first, optionally filtered by status
pub async fn list(
    State(state): State<ServerState>,
    Path(shop_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PaginatedResponse<Order>>> {
    let service = state.order_service();
    let page = query.page_query();
    let (orders, total) = service.list_orders(&shop_id, query.status, page).await?;
    Ok(Json(PaginatedResponse::new(orders, total, page)))
}

/// Get one order within the shop's scope
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path((shop_id, id)): Path<(String, String)>,
) -> AppResult<Json<Order>> {
    let service = state.order_service();
    let order = service.get_order(&shop_id, &id).await?;
    Ok(Json(order))
}

/// Status update request body
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Drive a single-step status transition (including cancellation)
pub async fn update_status(
    State(state): State<ServerState>,
    Path((shop_id, id)): Path<(String, String)>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Order>> {
    let service = state.order_service();
    let order = service
        .update_order_status(&shop_id, &id, payload.status)
        .await?;
    Ok(Json(order))
}

/// Dispatch an in-progress order to the kitchen
pub async fn send_to_kitchen(
    State(state): State<ServerState>,
    Path((shop_id, id)): Path<(String, String)>,
) -> AppResult<Json<Order>> {
    let service = state.order_service();
    let order = service.send_to_kitchen(&shop_id, &id).await?;
    Ok(Json(order))
}
