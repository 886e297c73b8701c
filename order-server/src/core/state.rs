use std::sync::Arc;

use crate::core::Config;
use crate::message::NotificationHub;
use crate::orders::{KitchenGateway, OrderService, OrderStorage};

/// Server state holding shared handles to every service
///
/// Cloning is a shallow Arc copy, so handlers receive their own handle at
/// negligible cost.
///
/// # Components
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Immutable configuration |
/// | storage | OrderStorage | Embedded order database (redb) |
/// | hub | Arc<NotificationHub> | Shop-scoped notification fan-out |
///
/// # Usage
///
/// ```ignore
/// let service = state.order_service();
/// let order = service.get_order(&shop_id, &order_id).await?;
/// ```
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub storage: OrderStorage,
    pub hub: Arc<NotificationHub>,
}

impl ServerState {
    pub fn new(config: Config, storage: OrderStorage, hub: Arc<NotificationHub>) -> Self {
        Self {
            config,
            storage,
            hub,
        }
    }

    /// Initialize all services from configuration.
    ///
    /// Creates the working directory if missing and opens the order database
    /// inside it.
    pub fn initialize(config: Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        let storage = OrderStorage::open(config.database_path())?;
        let hub = NotificationHub::with_capacity(config.notify_channel_capacity);

        tracing::info!(
            work_dir = %config.work_dir,
            environment = %config.environment,
            "server state initialized"
        );
        Ok(Self::new(config, storage, hub))
    }

    /// Order service handle for one request
    pub fn order_service(&self) -> OrderService {
        OrderService::new(self.storage.clone(), self.hub.clone())
    }

    /// Kitchen gateway handle for one request
    pub fn kitchen_gateway(&self) -> KitchenGateway {
        KitchenGateway::new(self.storage.clone())
    }
}
