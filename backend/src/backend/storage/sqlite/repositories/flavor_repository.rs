use anyhow::Result;
use async_trait::async_trait;
use shared::Flavor;
use sqlx::Row;

use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::FlavorStorage;

/// Repository for the custom flavor catalog
#[derive(Clone)]
pub struct FlavorRepository {
    db: DbConnection,
}

impl FlavorRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FlavorStorage for FlavorRepository {
    async fn store_flavor(&self, flavor: &Flavor) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO custom_flavors (id, name, icon, color, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&flavor.id)
        .bind(&flavor.name)
        .bind(&flavor.icon)
        .bind(&flavor.color)
        .bind(&flavor.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn list_flavors(&self) -> Result<Vec<Flavor>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, icon, color, created_at
            FROM custom_flavors
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let flavors = rows
            .iter()
            .map(|row| Flavor {
                id: row.get("id"),
                name: row.get("name"),
                icon: row.get("icon"),
                color: row.get("color"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(flavors)
    }

    async fn delete_flavor(&self, flavor_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM custom_flavors WHERE id = ?
            "#,
        )
        .bind(flavor_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::traits::Connection;

    fn flavor(id: &str, name: &str, created_at: &str) -> Flavor {
        Flavor {
            id: id.to_string(),
            name: name.to_string(),
            icon: "🍦".to_string(),
            color: "from-yellow-100 to-yellow-300".to_string(),
            created_at: created_at.to_string(),
        }
    }

    async fn setup_test() -> FlavorRepository {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        db.create_flavor_repository()
    }

    #[tokio::test]
    async fn test_store_and_list_in_creation_order() {
        let repo = setup_test().await;
        repo.store_flavor(&flavor("f2", "Schokolade", "2025-06-02T10:00:00Z"))
            .await
            .unwrap();
        repo.store_flavor(&flavor("f1", "Vanille", "2025-06-01T10:00:00Z"))
            .await
            .unwrap();

        let flavors = repo.list_flavors().await.unwrap();
        assert_eq!(flavors.len(), 2);
        assert_eq!(flavors[0].name, "Vanille");
        assert_eq!(flavors[1].name, "Schokolade");
    }

    #[tokio::test]
    async fn test_delete_flavor() {
        let repo = setup_test().await;
        repo.store_flavor(&flavor("f1", "Vanille", "2025-06-01T10:00:00Z"))
            .await
            .unwrap();
        repo.delete_flavor("f1").await.unwrap();
        assert!(repo.list_flavors().await.unwrap().is_empty());
    }
}
