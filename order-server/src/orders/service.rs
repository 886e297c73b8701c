//! Order Service (orchestrator)
//!
//! Composes the pricing engine, the order storage and the kitchen gateway.
//! On creation the total amount is always recomputed server-side; client
//! prices are never trusted. Every successful lifecycle change publishes a
//! shop-scoped notification, best-effort: a publish failure never rolls back
//! the persisted state change.

use std::sync::Arc;

use crate::db::models::Order;
use crate::message::NotificationHub;
use crate::orders::error::{OrderError, OrderResult};
use crate::orders::kitchen::{KitchenGateway, KitchenOrderView};
use crate::orders::storage::OrderStorage;
use crate::pricing;
use shared::order::{
    CreateOrderRequest, NotificationKind, OrderNotification, OrderStatus, validate_transition,
};
use shared::types::{PageQuery, Principal};

/// Order lifecycle orchestrator
#[derive(Clone)]
pub struct OrderService {
    storage: OrderStorage,
    kitchen: KitchenGateway,
    hub: Arc<NotificationHub>,
}

impl OrderService {
    pub fn new(storage: OrderStorage, hub: Arc<NotificationHub>) -> Self {
        Self {
            kitchen: KitchenGateway::new(storage.clone()),
            storage,
            hub,
        }
    }

    // ========== Creation ==========

    /// Create an order: resolve menu items, run the pricing engine per line,
    /// assign the shop-scoped sequence number, persist and notify.
    pub async fn create_order(
        &self,
        shop_id: &str,
        principal: Option<&Principal>,
        request: CreateOrderRequest,
    ) -> OrderResult<Order> {
        let mut items = Vec::with_capacity(request.items.len());
        for input in &request.items {
            let menu_item = self
                .storage
                .get_menu_item(shop_id, &input.menu_item_id)
                .map_err(OrderError::Storage)?
                .filter(|m| m.available)
                .ok_or_else(|| {
                    OrderError::NotFound(format!("menu item {}", input.menu_item_id))
                })?;
            items.push(pricing::price_line_item(&menu_item, input)?);
        }
        let total_amount = pricing::order_total(&items);

        let order_number = self
            .storage
            .next_order_number(shop_id)
            .map_err(OrderError::Storage)?;
        let now = chrono::Utc::now().timestamp_millis();
        let order = Order {
            id: uuid::Uuid::new_v4().to_string(),
            shop_id: shop_id.to_string(),
            order_number,
            user_id: principal.map(|p| p.user_id.clone()),
            table_number: request.table_number,
            items,
            total_amount,
            status: OrderStatus::Pending,
            is_sent_to_kitchen: false,
            payment_ref: request.payment_ref,
            created_at: now,
            updated_at: now,
        };
        self.storage.insert_order(&order)?;

        tracing::info!(
            shop_id,
            order_id = %order.id,
            order_number = %order.order_number,
            total = order.total_amount,
            "order created"
        );
        self.notify(&order, NotificationKind::NewOrder);
        Ok(order)
    }

    // ========== Queries ==========

    pub async fn get_order(&self, shop_id: &str, order_id: &str) -> OrderResult<Order> {
        self.storage
            .find_by_shop_and_id(shop_id, order_id)
            .map_err(OrderError::Storage)?
            .ok_or_else(|| OrderError::NotFound(format!("order {order_id}")))
    }

    /// Paginated list, optionally filtered by status
    pub async fn list_orders(
        &self,
        shop_id: &str,
        status: Option<OrderStatus>,
        page: PageQuery,
    ) -> OrderResult<(Vec<Order>, u64)> {
        let result = match status {
            Some(status) => self.storage.find_by_shop_and_status(shop_id, status, page),
            None => self.storage.find_by_shop(shop_id, page),
        };
        result.map_err(OrderError::Storage)
    }

    // ========== Transitions ==========

    /// Drive a status transition.
    ///
    /// The transition is validated against a snapshot for a precise error,
    /// then applied with a compare-and-swap on that snapshot's status. A
    /// concurrent update in between trips the guard and surfaces `Conflict`
    /// so the caller can retry against the fresh status.
    pub async fn update_order_status(
        &self,
        shop_id: &str,
        order_id: &str,
        requested: OrderStatus,
    ) -> OrderResult<Order> {
        let snapshot = self.get_order(shop_id, order_id).await?;
        validate_transition(snapshot.status, requested)?;

        let order =
            self.storage
                .compare_and_swap_status(shop_id, order_id, snapshot.status, requested)?;

        tracing::info!(
            shop_id,
            order_id,
            from = %snapshot.status,
            to = %order.status,
            "order status updated"
        );
        self.notify(&order, NotificationKind::OrderStatusUpdated);
        Ok(order)
    }

    /// Cancellation is a transition to the terminal `Cancelled` status
    pub async fn cancel_order(&self, shop_id: &str, order_id: &str) -> OrderResult<Order> {
        self.update_order_status(shop_id, order_id, OrderStatus::Cancelled)
            .await
    }

    // ========== Kitchen ==========

    /// Dispatch an in-progress order to the kitchen queue
    pub async fn send_to_kitchen(&self, shop_id: &str, order_id: &str) -> OrderResult<Order> {
        let order = self.kitchen.send_to_kitchen(shop_id, order_id)?;
        tracing::info!(shop_id, order_id, "order sent to kitchen");
        self.notify(&order, NotificationKind::OrderSentToKitchen);
        Ok(order)
    }

    /// Kitchen display queue: dispatched orders with expanded menu items
    pub async fn kitchen_orders(&self, shop_id: &str) -> OrderResult<Vec<KitchenOrderView>> {
        self.kitchen.kitchen_orders(shop_id)
    }

    /// Kitchen-side status update, gated on the dispatch flag
    pub async fn update_kitchen_order_status(
        &self,
        shop_id: &str,
        order_id: &str,
        requested: OrderStatus,
    ) -> OrderResult<Order> {
        let snapshot = self.get_order(shop_id, order_id).await?;
        if !snapshot.is_sent_to_kitchen {
            return Err(OrderError::InvalidState {
                status: snapshot.status,
                is_sent: false,
            });
        }
        self.update_order_status(shop_id, order_id, requested).await
    }

    // ========== Fan-out ==========

    fn notify(&self, order: &Order, kind: NotificationKind) {
        self.hub.publish(
            &order.shop_id,
            OrderNotification::new(kind, order.id.clone(), order.shop_id.clone(), order.status),
        );
    }
}
