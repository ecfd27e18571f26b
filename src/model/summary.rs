use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryItem {
    pub item_id: Id,
    pub sku: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
    pub on_hand_quantity: i64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub inventory_value: Decimal,
    pub low_stock: bool,
}

/// Inventory report. Totals cover the returned `items` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub items: Vec<SummaryItem>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_inventory_value: Decimal,
    pub low_stock_count: usize,
}
