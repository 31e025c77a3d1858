//! redb-based storage layer for the commerce data model
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `products` | `product_id` | `Product` | Catalog (price, stock) |
//! | `product_slugs` | `slug` | `product_id` | Slug lookup index |
//! | `orders` | `order_id` | `Order` | Order aggregate (items embedded) |
//! | `order_numbers` | `order_number` | `order_id` | External lookup index |
//! | `transactions` | `tx_id` | `Transaction` | Financial events |
//! | `order_transactions` | `(order_id, tx_id)` | `()` | Per-order index |
//! | `transaction_children` | `(parent_id, tx_id)` | `()` | Refund linkage |
//! | `shipments` | `shipment_id` | `Shipment` | Fulfilment records |
//! | `order_shipments` | `order_id` | `shipment_id` | One-per-order guard |
//! | `timeline` | `(order_id, seq)` | `TimelineEvent` | Append-only audit log |
//! | `carriers` | `carrier_id` | `Carrier` | Carrier registry |
//! | `currencies` | `code` | `Currency` | Currency registry |
//! | `meta` | `&str` | `u64` | Sequence counter |
//!
//! # Atomicity
//!
//! Every coordinator operation runs inside one `WriteTransaction` spanning
//! status check → mutation → dependent writes (stock, timeline) → commit, so
//! a failure anywhere leaves no partial state. redb admits a single writer
//! at a time, which also rules out lost stock updates under concurrent
//! requests against the same product.

use redb::{
    Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction,
};
use shared::DomainError;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{Carrier, Currency, Order, Product, Shipment, TimelineEvent, Transaction};

const PRODUCTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("products");
const PRODUCT_SLUGS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("product_slugs");
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");
const ORDER_NUMBERS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("order_numbers");
const TRANSACTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("transactions");
const ORDER_TRANSACTIONS_TABLE: TableDefinition<(&str, &str), ()> =
    TableDefinition::new("order_transactions");
const TRANSACTION_CHILDREN_TABLE: TableDefinition<(&str, &str), ()> =
    TableDefinition::new("transaction_children");
const SHIPMENTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("shipments");
const ORDER_SHIPMENTS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("order_shipments");
const TIMELINE_TABLE: TableDefinition<(&str, u64), &[u8]> = TableDefinition::new("timeline");
const CARRIERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("carriers");
const CURRENCIES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("currencies");
const META_TABLE: TableDefinition<&str, u64> = TableDefinition::new("meta");

const SEQUENCE_KEY: &str = "seq";

/// Upper bound for the second component of composite string keys
const MAX_KEY: &str = "\u{10FFFF}";

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
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

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::Storage(err.to_string())
    }
}

/// Embedded commerce store backed by redb
#[derive(Clone)]
pub struct CommerceStore {
    db: Arc<Database>,
}

impl CommerceStore {
    /// Open or create the database at the given path
    ///
    /// redb commits with immediate durability: once `commit()` returns the
    /// write is persistent, and the file is always in a consistent state.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    /// Open an in-memory database (tests, demos)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    fn init_tables(&self) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let _ = txn.open_table(PRODUCTS_TABLE)?;
            let _ = txn.open_table(PRODUCT_SLUGS_TABLE)?;
            let _ = txn.open_table(ORDERS_TABLE)?;
            let _ = txn.open_table(ORDER_NUMBERS_TABLE)?;
            let _ = txn.open_table(TRANSACTIONS_TABLE)?;
            let _ = txn.open_table(ORDER_TRANSACTIONS_TABLE)?;
            let _ = txn.open_table(TRANSACTION_CHILDREN_TABLE)?;
            let _ = txn.open_table(SHIPMENTS_TABLE)?;
            let _ = txn.open_table(ORDER_SHIPMENTS_TABLE)?;
            let _ = txn.open_table(TIMELINE_TABLE)?;
            let _ = txn.open_table(CARRIERS_TABLE)?;
            let _ = txn.open_table(CURRENCIES_TABLE)?;
            let mut meta = txn.open_table(META_TABLE)?;
            if meta.get(SEQUENCE_KEY)?.is_none() {
                meta.insert(SEQUENCE_KEY, 0u64)?;
            }
        }
        txn.commit()?;
        Ok(())
    }

    /// Seed the currency registry when empty (USD default + EUR)
    pub fn ensure_default_currencies(&self) -> StoreResult<()> {
        if !self.list_currencies()?.is_empty() {
            return Ok(());
        }
        let txn = self.begin_write()?;
        self.put_currency(&txn, &Currency::new("USD", "US Dollar", "$", true))?;
        self.put_currency(&txn, &Currency::new("EUR", "Euro", "€", false))?;
        txn.commit()?;
        Ok(())
    }

    /// Begin a write transaction (single writer at a time)
    pub fn begin_write(&self) -> StoreResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Sequence ==========

    /// Increment and return the global sequence number (within transaction)
    pub fn next_sequence(&self, txn: &WriteTransaction) -> StoreResult<u64> {
        let mut table = txn.open_table(META_TABLE)?;
        let current = table.get(SEQUENCE_KEY)?.map(|g| g.value()).unwrap_or(0);
        let next = current + 1;
        table.insert(SEQUENCE_KEY, next)?;
        Ok(next)
    }

    // ========== Products ==========

    /// Insert or update a product (also maintains the slug index)
    pub fn put_product(&self, txn: &WriteTransaction, product: &Product) -> StoreResult<()> {
        let value = serde_json::to_vec(product)?;
        let mut table = txn.open_table(PRODUCTS_TABLE)?;
        table.insert(product.id.as_str(), value.as_slice())?;
        drop(table);
        let mut slugs = txn.open_table(PRODUCT_SLUGS_TABLE)?;
        slugs.insert(product.slug.as_str(), product.id.as_str())?;
        Ok(())
    }

    /// Read a product inside a write transaction
    pub fn product_txn(&self, txn: &WriteTransaction, id: &str) -> StoreResult<Option<Product>> {
        let table = txn.open_table(PRODUCTS_TABLE)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn product(&self, id: &str) -> StoreResult<Option<Product>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(PRODUCTS_TABLE)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn product_by_slug(&self, slug: &str) -> StoreResult<Option<Product>> {
        let txn = self.db.begin_read()?;
        let slugs = txn.open_table(PRODUCT_SLUGS_TABLE)?;
        let id = match slugs.get(slug)? {
            Some(guard) => guard.value().to_string(),
            None => return Ok(None),
        };
        drop(slugs);
        let table = txn.open_table(PRODUCTS_TABLE)?;
        match table.get(id.as_str())? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Decrement a product's stock within the caller's transaction
    ///
    /// Returns the updated product, or `None` when the product is missing or
    /// holds less stock than requested; the caller turns that into its own
    /// domain error.
    pub fn decrement_stock(
        &self,
        txn: &WriteTransaction,
        product_id: &str,
        quantity: u32,
    ) -> StoreResult<Option<Product>> {
        let mut product = match self.product_txn(txn, product_id)? {
            Some(p) if p.stock >= quantity => p,
            _ => return Ok(None),
        };
        product.stock -= quantity;
        product.updated_at = shared::util::now_millis();
        self.put_product(txn, &product)?;
        Ok(Some(product))
    }

    /// Increment a product's stock within the caller's transaction
    pub fn increment_stock(
        &self,
        txn: &WriteTransaction,
        product_id: &str,
        quantity: u32,
    ) -> StoreResult<Option<Product>> {
        let mut product = match self.product_txn(txn, product_id)? {
            Some(p) => p,
            None => return Ok(None),
        };
        product.stock += quantity;
        product.updated_at = shared::util::now_millis();
        self.put_product(txn, &product)?;
        Ok(Some(product))
    }

    pub fn slug_taken(&self, slug: &str) -> StoreResult<bool> {
        let txn = self.db.begin_read()?;
        let slugs = txn.open_table(PRODUCT_SLUGS_TABLE)?;
        Ok(slugs.get(slug)?.is_some())
    }

    pub fn list_products(&self) -> StoreResult<Vec<Product>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(PRODUCTS_TABLE)?;
        let mut products = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            products.push(serde_json::from_slice(value.value())?);
        }
        Ok(products)
    }

    // ========== Orders ==========

    /// Insert or update an order (also maintains the order-number index)
    pub fn put_order(&self, txn: &WriteTransaction, order: &Order) -> StoreResult<()> {
        let value = serde_json::to_vec(order)?;
        let mut table = txn.open_table(ORDERS_TABLE)?;
        table.insert(order.id.as_str(), value.as_slice())?;
        drop(table);
        let mut numbers = txn.open_table(ORDER_NUMBERS_TABLE)?;
        numbers.insert(order.order_number.as_str(), order.id.as_str())?;
        Ok(())
    }

    pub fn order_txn(&self, txn: &WriteTransaction, id: &str) -> StoreResult<Option<Order>> {
        let table = txn.open_table(ORDERS_TABLE)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Resolve an order by its external order number inside a transaction
    pub fn order_by_number_txn(
        &self,
        txn: &WriteTransaction,
        order_number: &str,
    ) -> StoreResult<Option<Order>> {
        let numbers = txn.open_table(ORDER_NUMBERS_TABLE)?;
        let id = match numbers.get(order_number)? {
            Some(guard) => guard.value().to_string(),
            None => return Ok(None),
        };
        drop(numbers);
        self.order_txn(txn, &id)
    }

    pub fn order(&self, id: &str) -> StoreResult<Option<Order>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(ORDERS_TABLE)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn order_by_number(&self, order_number: &str) -> StoreResult<Option<Order>> {
        let txn = self.db.begin_read()?;
        let numbers = txn.open_table(ORDER_NUMBERS_TABLE)?;
        let id = match numbers.get(order_number)? {
            Some(guard) => guard.value().to_string(),
            None => return Ok(None),
        };
        drop(numbers);
        let table = txn.open_table(ORDERS_TABLE)?;
        match table.get(id.as_str())? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(ORDERS_TABLE)?;
        let mut orders: Vec<Order> = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            orders.push(serde_json::from_slice(value.value())?);
        }
        orders.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        Ok(orders)
    }

    // ========== Transactions ==========

    /// Insert or update a transaction (maintains order and parent indices)
    pub fn put_transaction(&self, txn: &WriteTransaction, tx: &Transaction) -> StoreResult<()> {
        let value = serde_json::to_vec(tx)?;
        let mut table = txn.open_table(TRANSACTIONS_TABLE)?;
        table.insert(tx.id.as_str(), value.as_slice())?;
        drop(table);
        let mut by_order = txn.open_table(ORDER_TRANSACTIONS_TABLE)?;
        by_order.insert((tx.order_id.as_str(), tx.id.as_str()), ())?;
        drop(by_order);
        if let Some(parent_id) = &tx.parent_id {
            let mut children = txn.open_table(TRANSACTION_CHILDREN_TABLE)?;
            children.insert((parent_id.as_str(), tx.id.as_str()), ())?;
        }
        Ok(())
    }

    pub fn transaction_txn(
        &self,
        txn: &WriteTransaction,
        id: &str,
    ) -> StoreResult<Option<Transaction>> {
        let table = txn.open_table(TRANSACTIONS_TABLE)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn transaction(&self, id: &str) -> StoreResult<Option<Transaction>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(TRANSACTIONS_TABLE)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// All transactions recorded against an order (within a write txn)
    pub fn transactions_for_order_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StoreResult<Vec<Transaction>> {
        let index = txn.open_table(ORDER_TRANSACTIONS_TABLE)?;
        let mut ids = Vec::new();
        for result in index.range((order_id, "")..=(order_id, MAX_KEY))? {
            let (key, _value) = result?;
            ids.push(key.value().1.to_string());
        }
        drop(index);
        let table = txn.open_table(TRANSACTIONS_TABLE)?;
        let mut txs = Vec::new();
        for id in ids {
            if let Some(guard) = table.get(id.as_str())? {
                txs.push(serde_json::from_slice(guard.value())?);
            }
        }
        txs.sort_by_key(|t: &Transaction| t.created_at);
        Ok(txs)
    }

    pub fn transactions_for_order(&self, order_id: &str) -> StoreResult<Vec<Transaction>> {
        let txn = self.db.begin_read()?;
        let index = txn.open_table(ORDER_TRANSACTIONS_TABLE)?;
        let mut ids = Vec::new();
        for result in index.range((order_id, "")..=(order_id, MAX_KEY))? {
            let (key, _value) = result?;
            ids.push(key.value().1.to_string());
        }
        drop(index);
        let table = txn.open_table(TRANSACTIONS_TABLE)?;
        let mut txs: Vec<Transaction> = Vec::new();
        for id in ids {
            if let Some(guard) = table.get(id.as_str())? {
                txs.push(serde_json::from_slice(guard.value())?);
            }
        }
        txs.sort_by_key(|t| t.created_at);
        Ok(txs)
    }

    /// Child transactions (refunds) of a parent, within a write txn
    pub fn children_of_txn(
        &self,
        txn: &WriteTransaction,
        parent_id: &str,
    ) -> StoreResult<Vec<Transaction>> {
        let index = txn.open_table(TRANSACTION_CHILDREN_TABLE)?;
        let mut ids = Vec::new();
        for result in index.range((parent_id, "")..=(parent_id, MAX_KEY))? {
            let (key, _value) = result?;
            ids.push(key.value().1.to_string());
        }
        drop(index);
        let table = txn.open_table(TRANSACTIONS_TABLE)?;
        let mut txs = Vec::new();
        for id in ids {
            if let Some(guard) = table.get(id.as_str())? {
                txs.push(serde_json::from_slice(guard.value())?);
            }
        }
        Ok(txs)
    }

    // ========== Shipments ==========

    /// Insert or update a shipment (maintains the one-per-order index)
    pub fn put_shipment(&self, txn: &WriteTransaction, shipment: &Shipment) -> StoreResult<()> {
        let value = serde_json::to_vec(shipment)?;
        let mut table = txn.open_table(SHIPMENTS_TABLE)?;
        table.insert(shipment.id.as_str(), value.as_slice())?;
        drop(table);
        let mut by_order = txn.open_table(ORDER_SHIPMENTS_TABLE)?;
        by_order.insert(shipment.order_id.as_str(), shipment.id.as_str())?;
        Ok(())
    }

    pub fn shipment_txn(
        &self,
        txn: &WriteTransaction,
        id: &str,
    ) -> StoreResult<Option<Shipment>> {
        let table = txn.open_table(SHIPMENTS_TABLE)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn shipment(&self, id: &str) -> StoreResult<Option<Shipment>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(SHIPMENTS_TABLE)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Shipment id already recorded for an order, if any (one-per-order guard)
    pub fn shipment_id_for_order_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StoreResult<Option<String>> {
        let by_order = txn.open_table(ORDER_SHIPMENTS_TABLE)?;
        Ok(by_order.get(order_id)?.map(|g| g.value().to_string()))
    }

    pub fn shipment_for_order(&self, order_id: &str) -> StoreResult<Option<Shipment>> {
        let txn = self.db.begin_read()?;
        let by_order = txn.open_table(ORDER_SHIPMENTS_TABLE)?;
        let id = match by_order.get(order_id)? {
            Some(guard) => guard.value().to_string(),
            None => return Ok(None),
        };
        drop(by_order);
        let table = txn.open_table(SHIPMENTS_TABLE)?;
        match table.get(id.as_str())? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn list_shipments(&self) -> StoreResult<Vec<Shipment>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(SHIPMENTS_TABLE)?;
        let mut shipments: Vec<Shipment> = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            shipments.push(serde_json::from_slice(value.value())?);
        }
        shipments.sort_by_key(|s| std::cmp::Reverse(s.created_at));
        Ok(shipments)
    }

    // ========== Timeline ==========

    /// Append a timeline event, allocating its global sequence number
    ///
    /// Events are keyed `(order_id, seq)` with a monotonically increasing
    /// sequence, so a range scan returns them in creation order.
    pub fn append_timeline(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
        status: Option<&str>,
        note: impl Into<String>,
        triggered_by: Option<&str>,
    ) -> StoreResult<()> {
        let seq = self.next_sequence(txn)?;
        let event = TimelineEvent {
            order_id: order_id.to_string(),
            seq,
            timestamp: shared::util::now_millis(),
            status: status.map(|s| s.to_string()),
            note: note.into(),
            triggered_by: triggered_by.map(|s| s.to_string()),
        };
        let value = serde_json::to_vec(&event)?;
        let mut table = txn.open_table(TIMELINE_TABLE)?;
        table.insert((order_id, seq), value.as_slice())?;
        Ok(())
    }

    /// All timeline events for an order, in creation order
    pub fn timeline_for_order(&self, order_id: &str) -> StoreResult<Vec<TimelineEvent>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(TIMELINE_TABLE)?;
        let mut events = Vec::new();
        for result in table.range((order_id, 0u64)..=(order_id, u64::MAX))? {
            let (_key, value) = result?;
            events.push(serde_json::from_slice(value.value())?);
        }
        Ok(events)
    }

    // ========== Carriers ==========

    pub fn put_carrier(&self, txn: &WriteTransaction, carrier: &Carrier) -> StoreResult<()> {
        let value = serde_json::to_vec(carrier)?;
        let mut table = txn.open_table(CARRIERS_TABLE)?;
        table.insert(carrier.id.as_str(), value.as_slice())?;
        Ok(())
    }

    pub fn carrier_txn(&self, txn: &WriteTransaction, id: &str) -> StoreResult<Option<Carrier>> {
        let table = txn.open_table(CARRIERS_TABLE)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn list_carriers(&self) -> StoreResult<Vec<Carrier>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(CARRIERS_TABLE)?;
        let mut carriers: Vec<Carrier> = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            carriers.push(serde_json::from_slice(value.value())?);
        }
        carriers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(carriers)
    }

    // ========== Currencies ==========

    pub fn put_currency(&self, txn: &WriteTransaction, currency: &Currency) -> StoreResult<()> {
        let value = serde_json::to_vec(currency)?;
        let mut table = txn.open_table(CURRENCIES_TABLE)?;
        table.insert(currency.code.as_str(), value.as_slice())?;
        Ok(())
    }

    pub fn currency(&self, code: &str) -> StoreResult<Option<Currency>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(CURRENCIES_TABLE)?;
        match table.get(code)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn currency_txn(&self, txn: &WriteTransaction, code: &str) -> StoreResult<Option<Currency>> {
        let table = txn.open_table(CURRENCIES_TABLE)?;
        match table.get(code)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn list_currencies(&self) -> StoreResult<Vec<Currency>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(CURRENCIES_TABLE)?;
        let mut currencies: Vec<Currency> = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            currencies.push(serde_json::from_slice(value.value())?);
        }
        currencies.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(currencies)
    }

    /// Make one currency the default, clearing every other default flag.
    /// Returns false when the code is unknown.
    pub fn set_default_currency(&self, code: &str) -> StoreResult<bool> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(CURRENCIES_TABLE)?;
            let mut currencies: Vec<Currency> = Vec::new();
            for result in table.iter()? {
                let (_key, value) = result?;
                currencies.push(serde_json::from_slice(value.value())?);
            }
            if !currencies.iter().any(|c| c.code == code) {
                return Ok(false);
            }
            for mut currency in currencies {
                let should_default = currency.code == code;
                if currency.is_default != should_default {
                    currency.is_default = should_default;
                    let value = serde_json::to_vec(&currency)?;
                    table.insert(currency.code.as_str(), value.as_slice())?;
                }
            }
        }
        txn.commit()?;
        Ok(true)
    }
}
