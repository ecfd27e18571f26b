use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{generate_id, supplied_id, Id};

/// A catalog entry. On-hand quantity is never stored on the item itself,
/// it is derived from the transaction ledger at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Id,
    pub sku: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
    pub low_stock_threshold: i32,
}

/// Row shape of the item list: the base fields plus the ledger sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemWithQuantity {
    pub id: Id,
    pub sku: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
    pub low_stock_threshold: i32,
    pub on_hand_quantity: i64,
}

/// An item joined with the sum of its quantity changes, as returned by the
/// grouped store queries.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStock {
    pub item: Item,
    pub on_hand_quantity: i64,
}

impl From<ItemStock> for ItemWithQuantity {
    fn from(stock: ItemStock) -> Self {
        let ItemStock {
            item,
            on_hand_quantity,
        } = stock;

        Self {
            id: item.id,
            sku: item.sku,
            name: item.name,
            unit_price: item.unit_price,
            low_stock_threshold: item.low_stock_threshold,
            on_hand_quantity,
        }
    }
}

/// Body of create and update requests.
///
/// Every field defaults so that a missing SKU or name is reported as a
/// validation failure instead of a JSON extraction error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPayload {
    pub id: Option<Id>,
    pub sku: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
    pub low_stock_threshold: i32,
}

impl ItemPayload {
    /// The id carried by the payload, ignoring a nil UUID.
    pub fn supplied_id(&self) -> Option<Id> {
        supplied_id(self.id)
    }

    /// Build a new item, assigning an id when the client did not send one.
    pub fn into_new_item(self) -> Item {
        let id = self.supplied_id().unwrap_or_else(generate_id);
        self.into_item(id)
    }

    pub fn into_item(self, id: Id) -> Item {
        Item {
            id,
            sku: self.sku,
            name: self.name,
            unit_price: self.unit_price,
            low_stock_threshold: self.low_stock_threshold,
        }
    }
}
