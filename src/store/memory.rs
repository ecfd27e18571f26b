use anyhow::Result;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::logic::aggregate::{is_low_stock, on_hand_quantity};
use crate::model::{Id, Item, ItemStock, StockTransaction};
use crate::store::error::StoreError;
use crate::store::traits::{ItemStore, StockFilter, StockStore, TransactionStore};

#[derive(Debug, Default)]
struct Tables {
    items: HashMap<Id, Item>,
    transactions: HashMap<Id, StockTransaction>,
}

impl Tables {
    fn on_hand_quantity(&self, item_id: &Id) -> i64 {
        on_hand_quantity(self.transactions.values().filter(|t| t.item_id == *item_id))
    }

    fn sku_taken_by_other(&self, sku: &str, id: &Id) -> bool {
        self.items
            .values()
            .any(|existing| existing.sku == sku && existing.id != *id)
    }
}

/// In-process store with the same constraint behaviour as the Postgres
/// schema: unique SKU, transactions require an existing item, and deleting
/// an item cascades to its transactions.
///
/// Every operation takes the single lock once, so each call is atomic.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_search(item: &Item, search: &str) -> bool {
    let needle = search.to_lowercase();
    item.sku.to_lowercase().contains(&needle) || item.name.to_lowercase().contains(&needle)
}

#[async_trait::async_trait]
impl ItemStore for MemoryStore {
    async fn get_item(&self, id: &Id) -> Result<Option<Item>> {
        Ok(self.tables.read().await.items.get(id).cloned())
    }

    async fn item_exists(&self, id: &Id) -> Result<bool> {
        Ok(self.tables.read().await.items.contains_key(id))
    }

    async fn sku_exists(&self, sku: &str) -> Result<bool> {
        Ok(self.tables.read().await.items.values().any(|i| i.sku == sku))
    }

    async fn insert_item(&self, item: &Item) -> Result<()> {
        let mut tables = self.tables.write().await;

        if tables.items.contains_key(&item.id) {
            return Err(StoreError::DuplicateId(item.id).into());
        }
        if tables.sku_taken_by_other(&item.sku, &item.id) {
            return Err(StoreError::DuplicateSku(item.sku.clone()).into());
        }

        tables.items.insert(item.id, item.clone());
        Ok(())
    }

    async fn update_item(&self, item: &Item) -> Result<bool> {
        let mut tables = self.tables.write().await;

        if !tables.items.contains_key(&item.id) {
            return Ok(false);
        }
        if tables.sku_taken_by_other(&item.sku, &item.id) {
            return Err(StoreError::DuplicateSku(item.sku.clone()).into());
        }

        tables.items.insert(item.id, item.clone());
        Ok(true)
    }

    async fn delete_item(&self, id: &Id) -> Result<bool> {
        let mut tables = self.tables.write().await;

        if tables.items.remove(id).is_none() {
            return Ok(false);
        }
        tables.transactions.retain(|_, t| t.item_id != *id);
        Ok(true)
    }
}

#[async_trait::async_trait]
impl TransactionStore for MemoryStore {
    async fn insert_transaction(&self, transaction: &StockTransaction) -> Result<()> {
        let mut tables = self.tables.write().await;

        if !tables.items.contains_key(&transaction.item_id) {
            return Err(StoreError::ItemMissing(transaction.item_id).into());
        }
        if tables.transactions.contains_key(&transaction.id) {
            return Err(StoreError::DuplicateId(transaction.id).into());
        }

        tables
            .transactions
            .insert(transaction.id, transaction.clone());
        Ok(())
    }

    async fn list_transactions(&self, item_id: &Id) -> Result<Vec<StockTransaction>> {
        let tables = self.tables.read().await;

        let mut transactions: Vec<StockTransaction> = tables
            .transactions
            .values()
            .filter(|t| t.item_id == *item_id)
            .cloned()
            .collect();
        transactions.sort_by_key(|t| Reverse((t.timestamp, t.id)));

        Ok(transactions)
    }

    async fn get_transaction(&self, item_id: &Id, id: &Id) -> Result<Option<StockTransaction>> {
        let tables = self.tables.read().await;

        Ok(tables
            .transactions
            .get(id)
            .filter(|t| t.item_id == *item_id)
            .cloned())
    }
}

#[async_trait::async_trait]
impl StockStore for MemoryStore {
    async fn list_item_stock(&self, filter: &StockFilter) -> Result<Vec<ItemStock>> {
        let tables = self.tables.read().await;

        let mut stock: Vec<ItemStock> = tables
            .items
            .values()
            .filter(|item| {
                filter
                    .search
                    .as_deref()
                    .map_or(true, |search| matches_search(item, search))
            })
            .map(|item| ItemStock {
                item: item.clone(),
                on_hand_quantity: tables.on_hand_quantity(&item.id),
            })
            .filter(|s| {
                !filter.low_stock_only || is_low_stock(s.on_hand_quantity, s.item.low_stock_threshold)
            })
            .collect();
        stock.sort_by(|a, b| a.item.sku.cmp(&b.item.sku));

        Ok(stock)
    }
}
