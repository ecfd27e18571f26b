use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{generate_id, supplied_id, supplied_timestamp, Id};

/// One ledger entry. Transactions are append-only; they disappear only
/// when their item is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTransaction {
    pub id: Id,
    pub item_id: Id,
    pub quantity_change: i32,
    pub timestamp: DateTime<Utc>,
    pub reference: String,
}

/// Body of a record-transaction request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionPayload {
    pub id: Option<Id>,
    pub item_id: Option<Id>,
    pub quantity_change: i32,
    pub timestamp: Option<DateTime<Utc>>,
    pub reference: Option<String>,
}

impl TransactionPayload {
    pub fn supplied_item_id(&self) -> Option<Id> {
        supplied_id(self.item_id)
    }

    /// Fill in the server-side defaults: a fresh id, the current time and an
    /// empty reference.
    pub fn into_transaction(self, item_id: Id, now: DateTime<Utc>) -> StockTransaction {
        StockTransaction {
            id: supplied_id(self.id).unwrap_or_else(generate_id),
            item_id,
            quantity_change: self.quantity_change,
            timestamp: supplied_timestamp(self.timestamp).unwrap_or(now),
            reference: self.reference.unwrap_or_default(),
        }
    }
}
