use std::sync::Arc;

use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};

use crate::backend::storage::sqlite::repositories::{
    BusinessRepository, DailySalesRepository, FlavorRepository, WeightEntryRepository,
};
use crate::backend::storage::traits::Connection;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:gelato-scale.db";

/// DbConnection manages the SQLite pool and schema
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name so tests never share state
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS customer_profiles (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                color TEXT NOT NULL,
                icon TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS custom_flavors (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                icon TEXT NOT NULL,
                color TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS weight_entries (
                id TEXT PRIMARY KEY,
                business_id TEXT NOT NULL,
                flavor_id TEXT NOT NULL,
                gross_weight REAL NOT NULL,
                net_weight REAL NOT NULL,
                container_weight REAL NOT NULL,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Index for the business + date range queries behind exports and
        // monthly deletes
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_weight_entries_business_date
            ON weight_entries(business_id, date);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS daily_sales (
                id TEXT PRIMARY KEY,
                date TEXT NOT NULL,
                customer_profile_id TEXT NOT NULL,
                sales TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE(date, customer_profile_id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type BusinessRepository = BusinessRepository;
    type FlavorRepository = FlavorRepository;
    type WeightEntryRepository = WeightEntryRepository;
    type DailySalesRepository = DailySalesRepository;

    fn create_business_repository(&self) -> BusinessRepository {
        BusinessRepository::new(self.clone())
    }

    fn create_flavor_repository(&self) -> FlavorRepository {
        FlavorRepository::new(self.clone())
    }

    fn create_weight_entry_repository(&self) -> WeightEntryRepository {
        WeightEntryRepository::new(self.clone())
    }

    fn create_daily_sales_repository(&self) -> DailySalesRepository {
        DailySalesRepository::new(self.clone())
    }
}
