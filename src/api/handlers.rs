use axum::response::{Html, Json};
use serde::{Deserialize, Serialize};

/// Simple health check endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn root() -> &'static str {
    "Inventory API"
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

// API Documentation handlers
pub async fn get_api_docs() -> Html<&'static str> {
    Html(
        r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Inventory API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            SwaggerUIBundle({
                url: '/docs/openapi.json',
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>
"#,
    )
}

pub async fn get_openapi_spec() -> Json<serde_json::Value> {
    Json(openapi_spec())
}

fn error_responses(codes: &[&str]) -> serde_json::Map<String, serde_json::Value> {
    codes
        .iter()
        .map(|code| {
            (
                code.to_string(),
                serde_json::json!({
                    "description": match *code {
                        "400" => "Validation error",
                        "404" => "Item not found",
                        "409" => "SKU already exists",
                        _ => "Error",
                    },
                    "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ErrorResponse"}}}
                }),
            )
        })
        .collect()
}

fn with_errors(mut responses: serde_json::Value, codes: &[&str]) -> serde_json::Value {
    if let Some(map) = responses.as_object_mut() {
        map.extend(error_responses(codes));
    }
    responses
}

fn json_body(schema: &str) -> serde_json::Value {
    serde_json::json!({
        "content": {"application/json": {"schema": {"$ref": format!("#/components/schemas/{}", schema)}}}
    })
}

pub fn openapi_spec() -> serde_json::Value {
    let id_param = serde_json::json!({
        "name": "id", "in": "path", "required": true,
        "schema": {"type": "string", "format": "uuid"}
    });

    serde_json::json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Inventory API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Item catalog and stock ledger. On-hand quantity, inventory value and low-stock flags are derived from the ledger at read time."
        },
        "servers": [{"url": "/", "description": "Current server"}],
        "tags": [
            {"name": "Items", "description": "Item catalog"},
            {"name": "Transactions", "description": "Stock ledger"},
            {"name": "Inventory", "description": "Aggregate reports"}
        ],
        "paths": {
            "/api/items": {
                "get": {
                    "tags": ["Items"],
                    "summary": "List items with on-hand quantity",
                    "parameters": [{"name": "search", "in": "query", "required": false, "schema": {"type": "string"}}],
                    "responses": {"200": {
                        "description": "Items",
                        "content": {"application/json": {"schema": {"type": "array", "items": {"$ref": "#/components/schemas/ItemWithQuantity"}}}}
                    }}
                },
                "post": {
                    "tags": ["Items"],
                    "summary": "Create an item",
                    "requestBody": json_body("Item"),
                    "responses": with_errors(serde_json::json!({"201": {
                        "description": "Created",
                        "headers": {"Location": {"schema": {"type": "string"}}},
                        "content": json_body("Item")["content"].clone()
                    }}), &["400", "409"])
                }
            },
            "/api/items/{id}": {
                "get": {
                    "tags": ["Items"],
                    "summary": "Get an item",
                    "parameters": [id_param.clone()],
                    "responses": with_errors(serde_json::json!({"200": {
                        "description": "Item",
                        "content": json_body("Item")["content"].clone()
                    }}), &["404"])
                },
                "put": {
                    "tags": ["Items"],
                    "summary": "Update an item",
                    "parameters": [id_param.clone()],
                    "requestBody": json_body("Item"),
                    "responses": with_errors(serde_json::json!({"204": {"description": "Updated"}}), &["400", "404", "409"])
                },
                "delete": {
                    "tags": ["Items"],
                    "summary": "Delete an item and its transactions",
                    "parameters": [id_param.clone()],
                    "responses": with_errors(serde_json::json!({"204": {"description": "Deleted"}}), &["404"])
                }
            },
            "/api/items/{id}/transactions": {
                "get": {
                    "tags": ["Transactions"],
                    "summary": "List an item's transactions, most recent first",
                    "parameters": [id_param.clone()],
                    "responses": with_errors(serde_json::json!({"200": {
                        "description": "Transactions",
                        "content": {"application/json": {"schema": {"type": "array", "items": {"$ref": "#/components/schemas/StockTransaction"}}}}
                    }}), &["404"])
                },
                "post": {
                    "tags": ["Transactions"],
                    "summary": "Record a stock transaction",
                    "parameters": [id_param.clone()],
                    "requestBody": json_body("StockTransaction"),
                    "responses": with_errors(serde_json::json!({"201": {
                        "description": "Recorded",
                        "headers": {"Location": {"schema": {"type": "string"}}},
                        "content": json_body("StockTransaction")["content"].clone()
                    }}), &["400", "404"])
                }
            },
            "/api/items/{id}/transactions/{transactionId}": {
                "get": {
                    "tags": ["Transactions"],
                    "summary": "Get one transaction",
                    "parameters": [
                        id_param,
                        {"name": "transactionId", "in": "path", "required": true, "schema": {"type": "string", "format": "uuid"}}
                    ],
                    "responses": with_errors(serde_json::json!({"200": {
                        "description": "Transaction",
                        "content": json_body("StockTransaction")["content"].clone()
                    }}), &["404"])
                }
            },
            "/api/inventory/summary": {
                "get": {
                    "tags": ["Inventory"],
                    "summary": "Inventory value and low-stock report",
                    "parameters": [{"name": "lowStockOnly", "in": "query", "required": false, "schema": {"type": "boolean", "default": false}}],
                    "responses": {"200": {
                        "description": "Summary",
                        "content": json_body("SummaryResult")["content"].clone()
                    }}
                }
            }
        },
        "components": {
            "schemas": {
                "Item": {
                    "type": "object",
                    "required": ["sku", "name"],
                    "properties": {
                        "id": {"type": "string", "format": "uuid"},
                        "sku": {"type": "string", "maxLength": 64},
                        "name": {"type": "string", "maxLength": 128},
                        "unitPrice": {"type": "number", "minimum": 0},
                        "lowStockThreshold": {"type": "integer", "minimum": 0}
                    }
                },
                "ItemWithQuantity": {
                    "allOf": [
                        {"$ref": "#/components/schemas/Item"},
                        {"type": "object", "properties": {"onHandQuantity": {"type": "integer"}}}
                    ]
                },
                "StockTransaction": {
                    "type": "object",
                    "required": ["itemId", "quantityChange"],
                    "properties": {
                        "id": {"type": "string", "format": "uuid"},
                        "itemId": {"type": "string", "format": "uuid"},
                        "quantityChange": {"type": "integer", "minimum": -1000000, "maximum": 1000000},
                        "timestamp": {"type": "string", "format": "date-time"},
                        "reference": {"type": "string", "maxLength": 256}
                    }
                },
                "SummaryItem": {
                    "type": "object",
                    "properties": {
                        "itemId": {"type": "string", "format": "uuid"},
                        "sku": {"type": "string"},
                        "name": {"type": "string"},
                        "unitPrice": {"type": "number"},
                        "onHandQuantity": {"type": "integer"},
                        "inventoryValue": {"type": "number"},
                        "lowStock": {"type": "boolean"}
                    }
                },
                "SummaryResult": {
                    "type": "object",
                    "properties": {
                        "items": {"type": "array", "items": {"$ref": "#/components/schemas/SummaryItem"}},
                        "totalInventoryValue": {"type": "number"},
                        "lowStockCount": {"type": "integer"}
                    }
                },
                "ErrorResponse": {
                    "type": "object",
                    "properties": {"error": {"type": "string"}}
                }
            }
        }
    })
}
