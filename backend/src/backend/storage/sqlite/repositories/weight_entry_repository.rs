use anyhow::Result;
use async_trait::async_trait;
use shared::WeightEntry;
use sqlx::Row;

use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::WeightEntryStorage;

/// Repository for weighed sale entries
#[derive(Clone)]
pub struct WeightEntryRepository {
    db: DbConnection,
}

impl WeightEntryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> WeightEntry {
        WeightEntry {
            id: row.get("id"),
            business_id: row.get("business_id"),
            flavor_id: row.get("flavor_id"),
            gross_weight: row.get("gross_weight"),
            net_weight: row.get("net_weight"),
            container_weight: row.get("container_weight"),
            date: row.get("date"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl WeightEntryStorage for WeightEntryRepository {
    async fn store_entry(&self, entry: &WeightEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO weight_entries
                (id, business_id, flavor_id, gross_weight, net_weight, container_weight, date, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.business_id)
        .bind(&entry.flavor_id)
        .bind(entry.gross_weight)
        .bind(entry.net_weight)
        .bind(entry.container_weight)
        .bind(&entry.date)
        .bind(&entry.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_entry(&self, entry_id: &str) -> Result<Option<WeightEntry>> {
        let row = sqlx::query(
            r#"
            SELECT id, business_id, flavor_id, gross_weight, net_weight, container_weight, date, created_at
            FROM weight_entries
            WHERE id = ?
            "#,
        )
        .bind(entry_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_entry))
    }

    async fn list_entries(
        &self,
        business_id: &str,
        date_range: Option<(&str, &str)>,
    ) -> Result<Vec<WeightEntry>> {
        let query = match date_range {
            Some((start, end)) => sqlx::query(
                r#"
                SELECT id, business_id, flavor_id, gross_weight, net_weight, container_weight, date, created_at
                FROM weight_entries
                WHERE business_id = ? AND date >= ? AND date <= ?
                ORDER BY created_at DESC
                "#,
            )
            .bind(business_id)
            .bind(start)
            .bind(end),
            None => sqlx::query(
                r#"
                SELECT id, business_id, flavor_id, gross_weight, net_weight, container_weight, date, created_at
                FROM weight_entries
                WHERE business_id = ?
                ORDER BY created_at DESC
                "#,
            )
            .bind(business_id),
        };

        let rows = query.fetch_all(self.db.pool()).await?;
        Ok(rows.iter().map(Self::row_to_entry).collect())
    }

    async fn update_entry(&self, entry: &WeightEntry) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE weight_entries
            SET flavor_id = ?, gross_weight = ?, net_weight = ?, container_weight = ?, date = ?
            WHERE id = ?
            "#,
        )
        .bind(&entry.flavor_id)
        .bind(entry.gross_weight)
        .bind(entry.net_weight)
        .bind(entry.container_weight)
        .bind(&entry.date)
        .bind(&entry.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM weight_entries WHERE id = ?
            "#,
        )
        .bind(entry_id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_entries_in_range(
        &self,
        business_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM weight_entries
            WHERE business_id = ? AND date >= ? AND date <= ?
            "#,
        )
        .bind(business_id)
        .bind(start_date)
        .bind(end_date)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected())
    }
}
