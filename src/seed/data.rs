use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use log::info;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::model::{Id, Item, StockTransaction};
use crate::store::traits::Store;

pub const BLUE_WIDGET_ID: Id = Uuid::from_u128(0xaaaaaaaa_aaaa_aaaa_aaaa_aaaaaaaaaaaa);
pub const RED_WIDGET_ID: Id = Uuid::from_u128(0xbbbbbbbb_bbbb_bbbb_bbbb_bbbbbbbbbbbb);
pub const GREEN_WIDGET_ID: Id = Uuid::from_u128(0xcccccccc_cccc_cccc_cccc_cccccccccccc);

/// Helper to build a catalog item with a whole-unit price
fn create_item(id: Id, sku: &str, name: &str, unit_price: i64, low_stock_threshold: i32) -> Item {
    Item {
        id,
        sku: sku.to_string(),
        name: name.to_string(),
        unit_price: Decimal::new(unit_price * 100, 2),
        low_stock_threshold,
    }
}

/// Helper to build a ledger entry dated `days_ago` before `now`
fn create_transaction(
    id: u128,
    item_id: Id,
    quantity_change: i32,
    days_ago: i64,
    reference: &str,
    now: DateTime<Utc>,
) -> StockTransaction {
    StockTransaction {
        id: Uuid::from_u128(id),
        item_id,
        quantity_change,
        timestamp: now - Duration::days(days_ago),
        reference: reference.to_string(),
    }
}

fn seed_items() -> Vec<Item> {
    vec![
        create_item(BLUE_WIDGET_ID, "SKU-001", "Blue Widget", 100, 10),
        create_item(RED_WIDGET_ID, "SKU-002", "Red Widget", 50, 5),
        create_item(GREEN_WIDGET_ID, "SKU-003", "Green Widget", 75, 8),
    ]
}

fn seed_transactions(now: DateTime<Utc>) -> Vec<StockTransaction> {
    vec![
        create_transaction(
            0x11111111_1111_1111_1111_111111111111,
            BLUE_WIDGET_ID,
            50,
            7,
            "Initial stock",
            now,
        ),
        create_transaction(
            0x22222222_2222_2222_2222_222222222222,
            BLUE_WIDGET_ID,
            -5,
            2,
            "Issue to customer",
            now,
        ),
        create_transaction(
            0x33333333_3333_3333_3333_333333333333,
            RED_WIDGET_ID,
            20,
            5,
            "Initial stock",
            now,
        ),
        create_transaction(
            0x44444444_4444_4444_4444_444444444444,
            GREEN_WIDGET_ID,
            5,
            1,
            "Initial stock",
            now,
        ),
    ]
}

/// Load the demonstration catalog. Items whose SKU already exists are left
/// alone together with their transactions, so loading twice is harmless.
pub async fn load_seed_data<S: Store>(store: &S) -> Result<()> {
    let mut loaded = Vec::new();

    for item in seed_items() {
        if store.sku_exists(&item.sku).await? || store.item_exists(&item.id).await? {
            info!("Seed item {} already present, skipping", item.sku);
            continue;
        }
        store.insert_item(&item).await?;
        loaded.push(item.id);
    }

    let transactions = seed_transactions(Utc::now());
    let mut recorded = 0;
    for transaction in transactions
        .iter()
        .filter(|t| loaded.contains(&t.item_id))
    {
        store.insert_transaction(transaction).await?;
        recorded += 1;
    }

    info!(
        "Seed data loaded: {} items, {} transactions",
        loaded.len(),
        recorded
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StockFilter, StockStore, TransactionStore};

    #[tokio::test]
    async fn test_seed_catalog() {
        let store = MemoryStore::new();
        load_seed_data(&store).await.unwrap();

        let stock = store.list_item_stock(&StockFilter::default()).await.unwrap();
        let quantities: Vec<(&str, i64)> = stock
            .iter()
            .map(|s| (s.item.sku.as_str(), s.on_hand_quantity))
            .collect();
        assert_eq!(
            quantities,
            vec![("SKU-001", 45), ("SKU-002", 20), ("SKU-003", 5)]
        );
        assert_eq!(stock[0].item.unit_price, Decimal::new(10000, 2));

        let blue = store.list_transactions(&BLUE_WIDGET_ID).await.unwrap();
        assert_eq!(blue.len(), 2);
        assert_eq!(blue[0].reference, "Issue to customer");
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = MemoryStore::new();
        load_seed_data(&store).await.unwrap();
        load_seed_data(&store).await.unwrap();

        let stock = store.list_item_stock(&StockFilter::default()).await.unwrap();
        assert_eq!(stock.len(), 3);
        assert_eq!(stock[0].on_hand_quantity, 45);
    }
}
