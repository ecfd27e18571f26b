use axum::{extract::State, response::Json};
use serde::Deserialize;

use crate::api::error::{api_error, ApiError};
use crate::api::extract::QueryParams;
use crate::api::item_handlers::AppState;
use crate::logic::InventoryReport;
use crate::model::SummaryResult;
use crate::store::traits::Store;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    #[serde(default)]
    pub low_stock_only: bool,
}

pub async fn get_inventory_summary<S: Store>(
    State(store): State<AppState<S>>,
    QueryParams(query): QueryParams<SummaryQuery>,
) -> Result<Json<SummaryResult>, ApiError> {
    InventoryReport::get_summary(&*store, query.low_stock_only)
        .await
        .map(Json)
        .map_err(api_error)
}
