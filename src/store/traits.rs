use crate::model::{Id, Item, ItemStock, StockTransaction};
use anyhow::Result;

/// Selection applied by the grouped stock query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockFilter {
    /// Case-insensitive substring matched against SKU or name.
    pub search: Option<String>,
    /// Keep only items whose on-hand quantity is below their threshold.
    pub low_stock_only: bool,
}

impl StockFilter {
    pub fn search(search: Option<String>) -> Self {
        Self {
            search,
            low_stock_only: false,
        }
    }

    pub fn low_stock(low_stock_only: bool) -> Self {
        Self {
            search: None,
            low_stock_only,
        }
    }
}

#[async_trait::async_trait]
pub trait ItemStore: Send + Sync {
    async fn get_item(&self, id: &Id) -> Result<Option<Item>>;
    async fn item_exists(&self, id: &Id) -> Result<bool>;
    async fn sku_exists(&self, sku: &str) -> Result<bool>;
    /// Fails with `StoreError::DuplicateSku` when the SKU is taken.
    async fn insert_item(&self, item: &Item) -> Result<()>;
    /// Returns false when no item has this id.
    async fn update_item(&self, item: &Item) -> Result<bool>;
    /// Removes the item and its transactions. Returns false when absent.
    async fn delete_item(&self, id: &Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait TransactionStore: Send + Sync {
    /// Fails with `StoreError::ItemMissing` when the item does not exist.
    async fn insert_transaction(&self, transaction: &StockTransaction) -> Result<()>;
    /// Most recent first.
    async fn list_transactions(&self, item_id: &Id) -> Result<Vec<StockTransaction>>;
    async fn get_transaction(&self, item_id: &Id, id: &Id) -> Result<Option<StockTransaction>>;
}

#[async_trait::async_trait]
pub trait StockStore: Send + Sync {
    /// Items joined with the sum of their quantity changes, ordered by SKU.
    async fn list_item_stock(&self, filter: &StockFilter) -> Result<Vec<ItemStock>>;
}

pub trait Store: ItemStore + TransactionStore + StockStore + Send + Sync {}

impl<T: ItemStore + TransactionStore + StockStore + Send + Sync> Store for T {}
