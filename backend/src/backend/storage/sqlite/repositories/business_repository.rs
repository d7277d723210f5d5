use anyhow::Result;
use async_trait::async_trait;
use shared::Business;
use sqlx::Row;

use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::BusinessStorage;

/// Repository for business (customer profile) operations
#[derive(Clone)]
pub struct BusinessRepository {
    db: DbConnection,
}

impl BusinessRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_business(row: &sqlx::sqlite::SqliteRow) -> Business {
        Business {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            color: row.get("color"),
            icon: row.get("icon"),
            is_active: row.get("is_active"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

#[async_trait]
impl BusinessStorage for BusinessRepository {
    async fn store_business(&self, business: &Business) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO customer_profiles (id, name, description, color, icon, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&business.id)
        .bind(&business.name)
        .bind(&business.description)
        .bind(&business.color)
        .bind(&business.icon)
        .bind(business.is_active)
        .bind(&business.created_at)
        .bind(&business.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_business(&self, business_id: &str) -> Result<Option<Business>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, color, icon, is_active, created_at, updated_at
            FROM customer_profiles
            WHERE id = ?
            "#,
        )
        .bind(business_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_business))
    }

    async fn list_businesses(&self) -> Result<Vec<Business>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, color, icon, is_active, created_at, updated_at
            FROM customer_profiles
            WHERE is_active = 1
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_business).collect())
    }

    async fn update_business(&self, business: &Business) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE customer_profiles
            SET name = ?, description = ?, color = ?, icon = ?, is_active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&business.name)
        .bind(&business.description)
        .bind(&business.color)
        .bind(&business.icon)
        .bind(business.is_active)
        .bind(&business.updated_at)
        .bind(&business.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_business(&self, business_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM customer_profiles WHERE id = ?
            "#,
        )
        .bind(business_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn count_businesses(&self) -> Result<i64> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS count FROM customer_profiles
            "#,
        )
        .fetch_one(self.db.pool())
        .await?;

        Ok(row.get("count"))
    }
}
