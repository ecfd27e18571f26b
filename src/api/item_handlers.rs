use axum::{
    extract::State,
    http::{header, StatusCode},
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::error::{api_error, ApiError};
use crate::api::extract::{JsonBody, PathParams, QueryParams};
use crate::logic::ItemOperations;
use crate::model::{Id, Item, ItemPayload, ItemWithQuantity, StockTransaction, TransactionPayload};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

/// 201 response with a `Location` header pointing at the new resource.
pub type Created<T> = (StatusCode, [(header::HeaderName, String); 1], Json<T>);

fn created<T>(location: String, body: T) -> Created<T> {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body))
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemSearchQuery {
    pub search: Option<String>,
}

pub async fn list_items<S: Store>(
    State(store): State<AppState<S>>,
    QueryParams(query): QueryParams<ItemSearchQuery>,
) -> Result<Json<Vec<ItemWithQuantity>>, ApiError> {
    ItemOperations::list_items(&*store, query.search)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn get_item<S: Store>(
    State(store): State<AppState<S>>,
    PathParams(id): PathParams<Id>,
) -> Result<Json<Item>, ApiError> {
    ItemOperations::get_item(&*store, &id)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn create_item<S: Store>(
    State(store): State<AppState<S>>,
    JsonBody(payload): JsonBody<ItemPayload>,
) -> Result<Created<Item>, ApiError> {
    let item = ItemOperations::create_item(&*store, payload)
        .await
        .map_err(api_error)?;

    Ok(created(format!("/api/items/{}", item.id), item))
}

pub async fn update_item<S: Store>(
    State(store): State<AppState<S>>,
    PathParams(id): PathParams<Id>,
    JsonBody(payload): JsonBody<ItemPayload>,
) -> Result<StatusCode, ApiError> {
    ItemOperations::update_item(&*store, &id, payload)
        .await
        .map_err(api_error)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_item<S: Store>(
    State(store): State<AppState<S>>,
    PathParams(id): PathParams<Id>,
) -> Result<StatusCode, ApiError> {
    ItemOperations::delete_item(&*store, &id)
        .await
        .map_err(api_error)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn record_transaction<S: Store>(
    State(store): State<AppState<S>>,
    PathParams(id): PathParams<Id>,
    JsonBody(payload): JsonBody<TransactionPayload>,
) -> Result<Created<StockTransaction>, ApiError> {
    let transaction = ItemOperations::record_transaction(&*store, &id, payload)
        .await
        .map_err(api_error)?;

    Ok(created(
        format!("/api/items/{}/transactions/{}", id, transaction.id),
        transaction,
    ))
}

pub async fn list_transactions<S: Store>(
    State(store): State<AppState<S>>,
    PathParams(id): PathParams<Id>,
) -> Result<Json<Vec<StockTransaction>>, ApiError> {
    ItemOperations::list_transactions(&*store, &id)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn get_transaction<S: Store>(
    State(store): State<AppState<S>>,
    PathParams((id, transaction_id)): PathParams<(Id, Id)>,
) -> Result<Json<StockTransaction>, ApiError> {
    ItemOperations::get_transaction(&*store, &id, &transaction_id)
        .await
        .map(Json)
        .map_err(api_error)
}
