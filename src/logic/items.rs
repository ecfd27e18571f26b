use chrono::Utc;
use log::{info, warn};

use crate::logic::error::{ServiceError, ServiceResult};
use crate::logic::validate::{
    normalize_price, normalize_search, validate_item, validate_transaction,
};
use crate::model::{Id, Item, ItemPayload, ItemWithQuantity, StockTransaction, TransactionPayload};
use crate::store::traits::{StockFilter, Store};

const ITEM_NOT_FOUND: &str = "Item not found.";

/// Catalog and ledger operations. Every mutating call is one store write.
pub struct ItemOperations;

impl ItemOperations {
    /// All items with their on-hand quantity, optionally narrowed by a
    /// case-insensitive SKU/name substring.
    pub async fn list_items<S: Store + ?Sized>(
        store: &S,
        search: Option<String>,
    ) -> ServiceResult<Vec<ItemWithQuantity>> {
        let filter = StockFilter::search(normalize_search(search));
        let stock = store.list_item_stock(&filter).await?;
        Ok(stock.into_iter().map(ItemWithQuantity::from).collect())
    }

    pub async fn get_item<S: Store + ?Sized>(store: &S, id: &Id) -> ServiceResult<Item> {
        store
            .get_item(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ITEM_NOT_FOUND))
    }

    pub async fn create_item<S: Store + ?Sized>(
        store: &S,
        mut payload: ItemPayload,
    ) -> ServiceResult<Item> {
        validate_item(&payload)?;
        payload.unit_price = normalize_price(payload.unit_price);

        if store.sku_exists(&payload.sku).await? {
            warn!("Rejected item create: SKU '{}' already exists", payload.sku);
            return Err(ServiceError::conflict(format!(
                "Item with SKU '{}' already exists.",
                payload.sku
            )));
        }

        // A concurrent create can still win the race for the SKU; the store
        // reports that as a conflict.
        let item = payload.into_new_item();
        store.insert_item(&item).await?;

        info!("Created item {} ({})", item.id, item.sku);
        Ok(item)
    }

    /// Overwrite SKU, name, price and threshold. The id never changes.
    pub async fn update_item<S: Store + ?Sized>(
        store: &S,
        id: &Id,
        mut payload: ItemPayload,
    ) -> ServiceResult<()> {
        if payload.supplied_id() != Some(*id) {
            return Err(ServiceError::validation("ID mismatch."));
        }
        if !store.item_exists(id).await? {
            return Err(ServiceError::not_found(ITEM_NOT_FOUND));
        }
        validate_item(&payload)?;
        payload.unit_price = normalize_price(payload.unit_price);

        let item = payload.into_item(*id);
        if !store.update_item(&item).await? {
            // Deleted between the existence check and the write.
            return Err(ServiceError::not_found(ITEM_NOT_FOUND));
        }

        info!("Updated item {} ({})", item.id, item.sku);
        Ok(())
    }

    /// Delete an item together with its ledger.
    pub async fn delete_item<S: Store + ?Sized>(store: &S, id: &Id) -> ServiceResult<()> {
        if !store.delete_item(id).await? {
            return Err(ServiceError::not_found(ITEM_NOT_FOUND));
        }

        info!("Deleted item {} and its transactions", id);
        Ok(())
    }

    pub async fn record_transaction<S: Store + ?Sized>(
        store: &S,
        item_id: &Id,
        payload: TransactionPayload,
    ) -> ServiceResult<StockTransaction> {
        if payload.supplied_item_id() != Some(*item_id) {
            return Err(ServiceError::validation("ItemId must match route id."));
        }
        validate_transaction(&payload)?;

        if !store.item_exists(item_id).await? {
            return Err(ServiceError::not_found(ITEM_NOT_FOUND));
        }

        let transaction = payload.into_transaction(*item_id, Utc::now());
        store.insert_transaction(&transaction).await?;

        info!(
            "Recorded transaction {} on item {}: {:+}",
            transaction.id, item_id, transaction.quantity_change
        );
        Ok(transaction)
    }

    /// The item's ledger, most recent first.
    pub async fn list_transactions<S: Store + ?Sized>(
        store: &S,
        item_id: &Id,
    ) -> ServiceResult<Vec<StockTransaction>> {
        if !store.item_exists(item_id).await? {
            return Err(ServiceError::not_found(ITEM_NOT_FOUND));
        }
        Ok(store.list_transactions(item_id).await?)
    }

    pub async fn get_transaction<S: Store + ?Sized>(
        store: &S,
        item_id: &Id,
        transaction_id: &Id,
    ) -> ServiceResult<StockTransaction> {
        if !store.item_exists(item_id).await? {
            return Err(ServiceError::not_found(ITEM_NOT_FOUND));
        }
        store
            .get_transaction(item_id, transaction_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Transaction not found."))
    }
}
