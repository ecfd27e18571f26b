use log::debug;

use crate::logic::aggregate::summarize;
use crate::logic::error::ServiceResult;
use crate::model::SummaryResult;
use crate::store::traits::{StockFilter, Store};

/// Inventory-wide report built from the grouped stock query.
pub struct InventoryReport;

impl InventoryReport {
    pub async fn get_summary<S: Store + ?Sized>(
        store: &S,
        low_stock_only: bool,
    ) -> ServiceResult<SummaryResult> {
        let stock = store
            .list_item_stock(&StockFilter::low_stock(low_stock_only))
            .await?;
        let result = summarize(stock, low_stock_only);

        debug!(
            "Inventory summary: {} items, {} low stock, total value {}",
            result.items.len(),
            result.low_stock_count,
            result.total_inventory_value
        );
        Ok(result)
    }
}
