//! Kitchen Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::Order;
use crate::orders::KitchenOrderView;
use crate::utils::AppResult;
use shared::order::OrderStatus;

/// Dispatched in-progress orders for the kitchen display, oldest first
pub async fn queue(
    State(state): State<ServerState>,
    Path(shop_id): Path<String>,
) -> AppResult<Json<Vec<KitchenOrderView>>> {
    let service = state.order_service();
    let views = service.kitchen_orders(&shop_id).await?;
    Ok(Json(views))
}

/// Status update request body
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Kitchen-side transition (Preparing, Ready, Delivered)
pub async fn update_status(
    State(state): State<ServerState>,
    Path((shop_id, id)): Path<(String, String)>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Order>> {
    let service = state.order_service();
    let order = service
        .update_kitchen_order_status(&shop_id, &id, payload.status)
        .await?;
    Ok(Json(order))
}
