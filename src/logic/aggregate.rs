use rust_decimal::Decimal;

use crate::model::{ItemStock, StockTransaction, SummaryItem, SummaryResult};

/// Net stock level: the sum of every quantity change in the ledger.
pub fn on_hand_quantity<'a>(transactions: impl IntoIterator<Item = &'a StockTransaction>) -> i64 {
    transactions
        .into_iter()
        .map(|t| i64::from(t.quantity_change))
        .sum()
}

pub fn inventory_value(on_hand_quantity: i64, unit_price: Decimal) -> Decimal {
    Decimal::from(on_hand_quantity).saturating_mul(unit_price)
}

pub fn is_low_stock(on_hand_quantity: i64, low_stock_threshold: i32) -> bool {
    on_hand_quantity < i64::from(low_stock_threshold)
}

pub fn summary_item(stock: ItemStock) -> SummaryItem {
    let ItemStock {
        item,
        on_hand_quantity,
    } = stock;

    SummaryItem {
        item_id: item.id,
        sku: item.sku,
        name: item.name,
        unit_price: item.unit_price,
        on_hand_quantity,
        inventory_value: inventory_value(on_hand_quantity, item.unit_price),
        low_stock: is_low_stock(on_hand_quantity, item.low_stock_threshold),
    }
}

/// Build the inventory report. When `low_stock_only` is set only low-stock
/// rows are kept, and both totals are taken over the kept rows.
pub fn summarize(stock: Vec<ItemStock>, low_stock_only: bool) -> SummaryResult {
    let items: Vec<SummaryItem> = stock
        .into_iter()
        .map(summary_item)
        .filter(|row| !low_stock_only || row.low_stock)
        .collect();

    let total_inventory_value = items
        .iter()
        .fold(Decimal::ZERO, |total, row| {
            total.saturating_add(row.inventory_value)
        });
    let low_stock_count = items.iter().filter(|row| row.low_stock).count();

    SummaryResult {
        items,
        total_inventory_value,
        low_stock_count,
    }
}
