//! redb-based order storage
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `(shop_id, order_id)` | `Order` | Order documents |
//! | `order_counters` | `shop_id` | `u64` | Per-shop sequence counters |
//! | `menu_items` | `(shop_id, item_id)` | `MenuItem` | Read-only catalog |
//!
//! # Consistency
//!
//! redb commits are durable when `commit()` returns, and the single-writer
//! transaction model makes every read-validate-write in this module atomic:
//! status transitions are validated against the value actually about to be
//! persisted, never a stale snapshot read earlier in a handler. Tenant
//! isolation falls out of the composite `(shop_id, order_id)` key: a lookup
//! through the wrong shop id cannot observe the order.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::db::models::{MenuItem, Order};
use crate::orders::error::{OrderError, OrderResult};
use shared::order::{OrderStatus, validate_transition};
use shared::types::PageQuery;

/// Order documents: key = (shop_id, order_id), value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("orders");

/// Per-shop order sequence counters: key = shop_id, value = last issued sequence
const COUNTERS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("order_counters");

/// Menu item catalog: key = (shop_id, item_id), value = JSON-serialized MenuItem
const MENU_ITEMS_TABLE: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("menu_items");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Order storage backed by redb
#[derive(Clone)]
pub struct OrderStorage {
    db: Arc<Database>,
}

impl OrderStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    fn init_tables(&self) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let _ = txn.open_table(ORDERS_TABLE)?;
            let _ = txn.open_table(COUNTERS_TABLE)?;
            let _ = txn.open_table(MENU_ITEMS_TABLE)?;
        }
        txn.commit()?;
        Ok(())
    }

    // ========== Order Numbers ==========

    /// Atomically increment the shop's counter and format the next order number.
    ///
    /// The counter is created lazily on a shop's first order and never reset.
    /// The full number combines a stable shop-derived prefix with the
    /// sequence: `{prefix}-{seq:04}`.
    pub fn next_order_number(&self, shop_id: &str) -> StorageResult<String> {
        let txn = self.db.begin_write()?;
        let next = {
            let mut table = txn.open_table(COUNTERS_TABLE)?;
            let current = table.get(shop_id)?.map(|g| g.value()).unwrap_or(0);
            let next = current + 1;
            table.insert(shop_id, next)?;
            next
        };
        txn.commit()?;
        Ok(format!("{}-{:04}", shop_number_prefix(shop_id), next))
    }

    // ========== Order Reads ==========

    /// Fetch one order within the shop's scope
    pub fn find_by_shop_and_id(
        &self,
        shop_id: &str,
        order_id: &str,
    ) -> StorageResult<Option<Order>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(ORDERS_TABLE)?;
        let order = table
            .get((shop_id, order_id))?
            .map(|g| serde_json::from_slice(g.value()))
            .transpose()?;
        Ok(order)
    }

    /// Paginated list of the shop's orders, newest first
    pub fn find_by_shop(&self, shop_id: &str, page: PageQuery) -> StorageResult<(Vec<Order>, u64)> {
        self.find_filtered(shop_id, page, |_| true)
    }

    /// Paginated list filtered by status, newest first
    pub fn find_by_shop_and_status(
        &self,
        shop_id: &str,
        status: OrderStatus,
        page: PageQuery,
    ) -> StorageResult<(Vec<Order>, u64)> {
        self.find_filtered(shop_id, page, |o| o.status == status)
    }

    /// Orders dispatched to the kitchen and still in progress
    pub fn kitchen_queue(&self, shop_id: &str) -> StorageResult<Vec<Order>> {
        let mut orders = self.scan_shop(shop_id, |o| {
            o.status == OrderStatus::InProgress && o.is_sent_to_kitchen
        })?;
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    fn find_filtered(
        &self,
        shop_id: &str,
        page: PageQuery,
        filter: impl Fn(&Order) -> bool,
    ) -> StorageResult<(Vec<Order>, u64)> {
        let mut orders = self.scan_shop(shop_id, filter)?;
        orders.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        let total = orders.len() as u64;
        let skip = page.skip() as usize;
        let items = orders
            .into_iter()
            .skip(skip)
            .take(page.limit as usize)
            .collect();
        Ok((items, total))
    }

    /// Range-scan the shop's key space; other tenants are never touched
    fn scan_shop(
        &self,
        shop_id: &str,
        filter: impl Fn(&Order) -> bool,
    ) -> StorageResult<Vec<Order>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(ORDERS_TABLE)?;
        let mut orders = Vec::new();
        for entry in table.range((shop_id, "")..=(shop_id, "\u{10FFFF}"))? {
            let (_, value) = entry?;
            let order: Order = serde_json::from_slice(value.value())?;
            if filter(&order) {
                orders.push(order);
            }
        }
        Ok(orders)
    }

    // ========== Order Writes ==========

    /// Persist a freshly created order
    pub fn insert_order(&self, order: &Order) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(ORDERS_TABLE)?;
            let encoded = serde_json::to_vec(order)?;
            table.insert((order.shop_id.as_str(), order.id.as_str()), encoded.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Apply a requested status transition atomically.
    ///
    /// The state machine validates against the stored value inside the write
    /// transaction, so concurrent transitions on the same order serialize and
    /// at most one out-of-sequence request can ever be applied.
    pub fn update_status(
        &self,
        shop_id: &str,
        order_id: &str,
        requested: OrderStatus,
    ) -> OrderResult<Order> {
        self.update_order_with(shop_id, order_id, |order| {
            validate_transition(order.status, requested)?;
            order.status = requested;
            Ok(())
        })
    }

    /// Conditional transition: fails with `Conflict` (never a silent no-op)
    /// when the stored status no longer matches `expected`.
    pub fn compare_and_swap_status(
        &self,
        shop_id: &str,
        order_id: &str,
        expected: OrderStatus,
        requested: OrderStatus,
    ) -> OrderResult<Order> {
        self.update_order_with(shop_id, order_id, |order| {
            if order.status != expected {
                return Err(OrderError::Conflict {
                    expected,
                    actual: order.status,
                });
            }
            validate_transition(order.status, requested)?;
            order.status = requested;
            Ok(())
        })
    }

    /// Dispatch an order to the kitchen queue.
    ///
    /// Only valid while the order is exactly `InProgress` and not yet sent;
    /// a second call fails rather than silently succeeding, guarding against
    /// duplicate kitchen tickets. The flag is never reset.
    pub fn mark_sent_to_kitchen(&self, shop_id: &str, order_id: &str) -> OrderResult<Order> {
        self.update_order_with(shop_id, order_id, |order| {
            if order.status != OrderStatus::InProgress || order.is_sent_to_kitchen {
                return Err(OrderError::InvalidState {
                    status: order.status,
                    is_sent: order.is_sent_to_kitchen,
                });
            }
            order.is_sent_to_kitchen = true;
            Ok(())
        })
    }

    /// Atomic read-modify-write of one order document.
    ///
    /// The mutation closure runs inside the write transaction against the
    /// current stored value; domain validation failures abort the commit.
    fn update_order_with(
        &self,
        shop_id: &str,
        order_id: &str,
        mutate: impl FnOnce(&mut Order) -> OrderResult<()>,
    ) -> OrderResult<Order> {
        let txn = self.db.begin_write().map_err(StorageError::from)?;
        let updated = {
            let mut table = txn.open_table(ORDERS_TABLE).map_err(StorageError::from)?;
            let bytes = table
                .get((shop_id, order_id))
                .map_err(StorageError::from)?
                .map(|g| g.value().to_vec())
                .ok_or_else(|| OrderError::NotFound(format!("order {order_id}")))?;
            let mut order: Order =
                serde_json::from_slice(&bytes).map_err(StorageError::from)?;
            mutate(&mut order)?;
            order.touch();
            let encoded = serde_json::to_vec(&order).map_err(StorageError::from)?;
            table
                .insert((shop_id, order_id), encoded.as_slice())
                .map_err(StorageError::from)?;
            order
        };
        txn.commit().map_err(StorageError::from)?;
        Ok(updated)
    }

    // ========== Menu Item Catalog ==========

    /// Upsert a menu item (seeding; menu CRUD endpoints live elsewhere)
    pub fn put_menu_item(&self, item: &MenuItem) -> StorageResult<()> {
        self.put_keyed(MENU_ITEMS_TABLE, (item.shop_id.as_str(), item.id.as_str()), item)
    }

    /// Fetch a menu item within the shop's scope
    pub fn get_menu_item(&self, shop_id: &str, item_id: &str) -> StorageResult<Option<MenuItem>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(MENU_ITEMS_TABLE)?;
        let item = table
            .get((shop_id, item_id))?
            .map(|g| serde_json::from_slice(g.value()))
            .transpose()?;
        Ok(item)
    }

    fn put_keyed<T: Serialize>(
        &self,
        table_def: TableDefinition<(&str, &str), &[u8]>,
        key: (&str, &str),
        value: &T,
    ) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(table_def)?;
            let encoded = serde_json::to_vec(value)?;
            table.insert(key, encoded.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }
}

/// Stable 3-digit numeric prefix derived from the shop id
fn shop_number_prefix(shop_id: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    shop_id.hash(&mut hasher);
    hasher.finish() % 900 + 100
}
