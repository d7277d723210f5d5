use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use shared::{DailySales, SalesData};
use sqlx::Row;
use uuid::Uuid;

use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::DailySalesStorage;

/// Repository for per-day sales tallies. The flavor counts are stored as a
/// JSON object in the `sales` column.
#[derive(Clone)]
pub struct DailySalesRepository {
    db: DbConnection,
}

impl DailySalesRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_daily_sales(row: &sqlx::sqlite::SqliteRow) -> Result<DailySales> {
        let sales_json: String = row.get("sales");
        let sales: SalesData = serde_json::from_str(&sales_json)?;
        Ok(DailySales {
            id: row.get("id"),
            date: row.get("date"),
            customer_profile_id: row.get("customer_profile_id"),
            sales,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

#[async_trait]
impl DailySalesStorage for DailySalesRepository {
    async fn get_daily_sales(
        &self,
        date: &str,
        customer_profile_id: &str,
    ) -> Result<Option<DailySales>> {
        let row = sqlx::query(
            r#"
            SELECT id, date, customer_profile_id, sales, created_at, updated_at
            FROM daily_sales
            WHERE date = ? AND customer_profile_id = ?
            "#,
        )
        .bind(date)
        .bind(customer_profile_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_daily_sales).transpose()
    }

    async fn upsert_daily_sales(
        &self,
        date: &str,
        customer_profile_id: &str,
        sales: &SalesData,
    ) -> Result<DailySales> {
        let sales_json = serde_json::to_string(sales)?;
        let now = Utc::now().to_rfc3339();
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO daily_sales (id, date, customer_profile_id, sales, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(date, customer_profile_id)
            DO UPDATE SET sales = excluded.sales, updated_at = excluded.updated_at
            "#,
        )
        .bind(&id)
        .bind(date)
        .bind(customer_profile_id)
        .bind(&sales_json)
        .bind(&now)
        .bind(&now)
        .execute(self.db.pool())
        .await?;

        let saved = self
            .get_daily_sales(date, customer_profile_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Daily sales row missing after upsert"))?;
        Ok(saved)
    }

    async fn list_daily_sales(&self, customer_profile_id: &str) -> Result<Vec<DailySales>> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, customer_profile_id, sales, created_at, updated_at
            FROM daily_sales
            WHERE customer_profile_id = ?
            ORDER BY date DESC
            "#,
        )
        .bind(customer_profile_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_daily_sales).collect()
    }
}
