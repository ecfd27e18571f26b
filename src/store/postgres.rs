use anyhow::{Context, Result};
use log::{debug, info};
use sqlx::{
    postgres::{PgPoolOptions, PgRow},
    PgPool, Row,
};

use crate::model::{Id, Item, ItemStock, StockTransaction};
use crate::store::error::StoreError;
use crate::store::traits::{ItemStore, StockFilter, StockStore, TransactionStore};

const SKU_INDEX: &str = "ix_items_sku";
const ITEM_FOREIGN_KEY: &str = "stock_transactions_item_id_fkey";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the versioned SQL scripts under `migrations/`
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        info!("Database schema is up to date");
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn item_from_row(row: &PgRow) -> Result<Item, sqlx::Error> {
    Ok(Item {
        id: row.try_get("id")?,
        sku: row.try_get("sku")?,
        name: row.try_get("name")?,
        unit_price: row.try_get("unit_price")?,
        low_stock_threshold: row.try_get("low_stock_threshold")?,
    })
}

fn transaction_from_row(row: &PgRow) -> Result<StockTransaction, sqlx::Error> {
    Ok(StockTransaction {
        id: row.try_get("id")?,
        item_id: row.try_get("item_id")?,
        quantity_change: row.try_get("quantity_change")?,
        timestamp: row.try_get("occurred_at")?,
        reference: row.try_get("reference")?,
    })
}

/// Translate the constraint violations callers care about into `StoreError`.
fn classify_write_error(
    err: sqlx::Error,
    sku: Option<&str>,
    id: &Id,
    item_id: Option<&Id>,
) -> anyhow::Error {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return match (db_err.constraint(), sku) {
                (Some(SKU_INDEX), Some(sku)) => StoreError::DuplicateSku(sku.to_string()).into(),
                _ => StoreError::DuplicateId(*id).into(),
            };
        }
        if db_err.is_foreign_key_violation() && db_err.constraint() == Some(ITEM_FOREIGN_KEY) {
            if let Some(item_id) = item_id {
                return StoreError::ItemMissing(*item_id).into();
            }
        }
    }
    anyhow::Error::new(err)
}

#[async_trait::async_trait]
impl ItemStore for PostgresStore {
    async fn get_item(&self, id: &Id) -> Result<Option<Item>> {
        let row = sqlx::query(
            "SELECT id, sku, name, unit_price, low_stock_threshold FROM items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch item")?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(item_from_row(&row).context("Failed to decode item")?))
    }

    async fn item_exists(&self, id: &Id) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM items WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check item existence")?;

        Ok(exists)
    }

    async fn sku_exists(&self, sku: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM items WHERE sku = $1)")
                .bind(sku)
                .fetch_one(&self.pool)
                .await
                .context("Failed to check SKU")?;

        Ok(exists)
    }

    async fn insert_item(&self, item: &Item) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO items (id, sku, name, unit_price, low_stock_threshold)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(item.id)
        .bind(&item.sku)
        .bind(&item.name)
        .bind(item.unit_price)
        .bind(item.low_stock_threshold)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, Some(&item.sku), &item.id, None))
        .context("Failed to insert item")?;

        debug!("Inserted item {} ({})", item.id, item.sku);
        Ok(())
    }

    async fn update_item(&self, item: &Item) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET sku = $2, name = $3, unit_price = $4, low_stock_threshold = $5
            WHERE id = $1
            "#,
        )
        .bind(item.id)
        .bind(&item.sku)
        .bind(&item.name)
        .bind(item.unit_price)
        .bind(item.low_stock_threshold)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, Some(&item.sku), &item.id, None))
        .context("Failed to update item")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_item(&self, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete item")?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl TransactionStore for PostgresStore {
    async fn insert_transaction(&self, transaction: &StockTransaction) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO stock_transactions (id, item_id, quantity_change, occurred_at, reference)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(transaction.id)
        .bind(transaction.item_id)
        .bind(transaction.quantity_change)
        .bind(transaction.timestamp)
        .bind(&transaction.reference)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, None, &transaction.id, Some(&transaction.item_id)))
        .context("Failed to insert stock transaction")?;

        Ok(())
    }

    async fn list_transactions(&self, item_id: &Id) -> Result<Vec<StockTransaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, item_id, quantity_change, occurred_at, reference
            FROM stock_transactions
            WHERE item_id = $1
            ORDER BY occurred_at DESC, id DESC
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list stock transactions")?;

        rows.iter()
            .map(transaction_from_row)
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to decode stock transaction")
    }

    async fn get_transaction(&self, item_id: &Id, id: &Id) -> Result<Option<StockTransaction>> {
        let row = sqlx::query(
            r#"
            SELECT id, item_id, quantity_change, occurred_at, reference
            FROM stock_transactions
            WHERE item_id = $1 AND id = $2
            "#,
        )
        .bind(item_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch stock transaction")?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(
            transaction_from_row(&row).context("Failed to decode stock transaction")?,
        ))
    }
}

#[async_trait::async_trait]
impl StockStore for PostgresStore {
    async fn list_item_stock(&self, filter: &StockFilter) -> Result<Vec<ItemStock>> {
        // The ledger is summed in one grouped query; items without
        // transactions come back with zero.
        let rows = sqlx::query(
            r#"
            SELECT i.id, i.sku, i.name, i.unit_price, i.low_stock_threshold,
                   COALESCE(SUM(t.quantity_change), 0)::BIGINT AS on_hand_quantity
            FROM items i
            LEFT JOIN stock_transactions t ON t.item_id = i.id
            WHERE $1::TEXT IS NULL
               OR STRPOS(LOWER(i.sku), LOWER($1::TEXT)) > 0
               OR STRPOS(LOWER(i.name), LOWER($1::TEXT)) > 0
            GROUP BY i.id
            HAVING NOT $2::BOOLEAN
                OR COALESCE(SUM(t.quantity_change), 0) < i.low_stock_threshold
            ORDER BY i.sku
            "#,
        )
        .bind(filter.search.as_deref())
        .bind(filter.low_stock_only)
        .fetch_all(&self.pool)
        .await
        .context("Failed to aggregate item stock")?;

        rows.iter()
            .map(|row| {
                Ok(ItemStock {
                    item: item_from_row(row)?,
                    on_hand_quantity: row.try_get("on_hand_quantity")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .context("Failed to decode item stock")
    }
}
