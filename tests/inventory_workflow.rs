use std::sync::Arc;

use inventory_api::config::AppConfig;
use inventory_api::MemoryStore;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tokio::net::TcpListener;

// Test client wrapper for making API calls
struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    /// Start a server over a fresh in-memory store on an ephemeral port.
    async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let store = Arc::new(MemoryStore::new());
        let config = AppConfig::default();

        tokio::spawn(async move { inventory_api::serve(listener, store, &config).await });

        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn post(&self, path: &str, json: Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
            .unwrap()
    }

    async fn put(&self, path: &str, json: Value) -> reqwest::Response {
        self.client
            .put(format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
            .unwrap()
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap()
    }

    async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap()
    }

    async fn get_json(&self, path: &str) -> Value {
        let response = self.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {}", path);
        response.json().await.unwrap()
    }

    async fn create_item(&self, sku: &str, name: &str, unit_price: f64, threshold: i32) -> String {
        let response = self
            .post(
                "/api/items",
                json!({
                    "sku": sku,
                    "name": name,
                    "unitPrice": unit_price,
                    "lowStockThreshold": threshold
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = response.json().await.unwrap();
        body["id"].as_str().unwrap().to_string()
    }

    async fn record(&self, item_id: &str, quantity_change: i32) -> reqwest::Response {
        self.post(
            &format!("/api/items/{}/transactions", item_id),
            json!({ "itemId": item_id, "quantityChange": quantity_change }),
        )
        .await
    }
}

fn money(value: &Value) -> Decimal {
    value.to_string().parse().unwrap()
}

fn find_by_sku<'a>(items: &'a Value, sku: &str) -> &'a Value {
    items
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["sku"] == sku)
        .unwrap()
}

#[tokio::test]
async fn test_stock_workflow_and_summary() {
    let client = TestClient::spawn().await;

    let id = client.create_item("SKU-A", "Item A", 12.5, 10).await;
    assert_eq!(client.record(&id, 50).await.status(), StatusCode::CREATED);
    assert_eq!(client.record(&id, -45).await.status(), StatusCode::CREATED);

    let items = client.get_json("/api/items").await;
    assert_eq!(find_by_sku(&items, "SKU-A")["onHandQuantity"], 5);

    let summary = client.get_json("/api/inventory/summary").await;
    let entry = find_by_sku(&summary["items"], "SKU-A");
    assert_eq!(entry["lowStock"], true);
    assert_eq!(money(&entry["inventoryValue"]), Decimal::new(625, 1));
    assert_eq!(money(&summary["totalInventoryValue"]), Decimal::new(625, 1));
    assert_eq!(summary["lowStockCount"], 1);
}

#[tokio::test]
async fn test_round_trip_item() {
    let client = TestClient::spawn().await;

    let response = client
        .post(
            "/api/items",
            json!({"sku": "SKU-100", "name": "Widget", "unitPrice": 10.00, "lowStockThreshold": 5}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let created: Value = response.json().await.unwrap();

    let fetched = client.get_json(&location).await;
    assert_eq!(fetched, created);
    assert_eq!(fetched["sku"], "SKU-100");
    assert_eq!(fetched["name"], "Widget");
    assert_eq!(fetched["unitPrice"].to_string(), "10.00");
    assert_eq!(fetched["lowStockThreshold"], 5);

    let items = client.get_json("/api/items?search=widget").await;
    assert_eq!(find_by_sku(&items, "SKU-100")["onHandQuantity"], 0);
}

#[tokio::test]
async fn test_duplicate_sku_is_rejected() {
    let client = TestClient::spawn().await;

    client.create_item("SKU-DUP", "First", 1.0, 0).await;
    let response = client
        .post("/api/items", json!({"sku": "SKU-DUP", "name": "Second"}))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let items = client.get_json("/api/items").await;
    let matching = items
        .as_array()
        .unwrap()
        .iter()
        .filter(|item| item["sku"] == "SKU-DUP")
        .count();
    assert_eq!(matching, 1);
    assert_eq!(find_by_sku(&items, "SKU-DUP")["name"], "First");
}

#[tokio::test]
async fn test_zero_quantity_is_rejected_without_writing() {
    let client = TestClient::spawn().await;
    let id = client.create_item("SKU-Z", "Zero", 3.0, 1).await;

    let response = client.record(&id, 0).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "QuantityChange cannot be 0.");

    let transactions = client
        .get_json(&format!("/api/items/{}/transactions", id))
        .await;
    assert_eq!(transactions.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_delete_cascades_to_transactions() {
    let client = TestClient::spawn().await;
    let id = client.create_item("SKU-DEL", "Doomed", 1.0, 0).await;

    let response = client.record(&id, 7).await;
    let transaction_location = response
        .headers()
        .get(reqwest::header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(
        client.get(&transaction_location).await.status(),
        StatusCode::OK
    );

    let response = client.delete(&format!("/api/items/{}", id)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(
        client.get(&transaction_location).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        client
            .get(&format!("/api/items/{}/transactions", id))
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        client.delete(&format!("/api/items/{}", id)).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_update_with_mismatched_id_changes_nothing() {
    let client = TestClient::spawn().await;
    let id = client.create_item("SKU-U", "Original", 4.0, 2).await;

    let response = client
        .put(
            &format!("/api/items/{}", id),
            json!({
                "id": uuid::Uuid::new_v4(),
                "sku": "SKU-U",
                "name": "Renamed",
                "unitPrice": 4.0,
                "lowStockThreshold": 2
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let item = client.get_json(&format!("/api/items/{}", id)).await;
    assert_eq!(item["name"], "Original");

    let response = client
        .put(
            &format!("/api/items/{}", id),
            json!({
                "id": id,
                "sku": "SKU-U",
                "name": "Renamed",
                "unitPrice": 4.0,
                "lowStockThreshold": 2
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let item = client.get_json(&format!("/api/items/{}", id)).await;
    assert_eq!(item["name"], "Renamed");
}

#[tokio::test]
async fn test_low_stock_filter() {
    let client = TestClient::spawn().await;

    let low = client.create_item("SKU-LOW", "Low", 2.0, 10).await;
    let healthy = client.create_item("SKU-OK", "Healthy", 3.0, 1).await;
    client.record(&low, 3).await;
    client.record(&healthy, 20).await;

    let summary = client
        .get_json("/api/inventory/summary?lowStockOnly=true")
        .await;
    let items = summary["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["sku"], "SKU-LOW");
    assert_eq!(summary["lowStockCount"], 1);
    assert_eq!(money(&summary["totalInventoryValue"]), Decimal::new(6, 0));

    let full = client.get_json("/api/inventory/summary").await;
    assert_eq!(full["items"].as_array().unwrap().len(), 2);
    assert_eq!(money(&full["totalInventoryValue"]), Decimal::new(66, 0));
}
