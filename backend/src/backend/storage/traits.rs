//! # Storage Traits
//!
//! Storage abstraction for the four record collections. The domain layer
//! only sees these traits, so the hosted record store can be swapped for
//! the embedded SQLite implementation (and the in-memory test databases)
//! without touching any business logic.

use anyhow::Result;
use async_trait::async_trait;
use shared::{Business, DailySales, Flavor, SalesData, WeightEntry};

/// Interface for business (customer profile) storage operations
#[async_trait]
pub trait BusinessStorage: Send + Sync {
    /// Store a new business
    async fn store_business(&self, business: &Business) -> Result<()>;

    /// Retrieve a specific business by ID
    async fn get_business(&self, business_id: &str) -> Result<Option<Business>>;

    /// List active businesses ordered by creation time (oldest first)
    async fn list_businesses(&self) -> Result<Vec<Business>>;

    /// Update an existing business
    async fn update_business(&self, business: &Business) -> Result<()>;

    /// Delete a business by ID
    async fn delete_business(&self, business_id: &str) -> Result<()>;

    /// Count all businesses; used by the keep-alive heartbeat
    async fn count_businesses(&self) -> Result<i64>;
}

/// Interface for flavor catalog storage operations
#[async_trait]
pub trait FlavorStorage: Send + Sync {
    /// Store a new flavor
    async fn store_flavor(&self, flavor: &Flavor) -> Result<()>;

    /// List all flavors ordered by creation time (oldest first)
    async fn list_flavors(&self) -> Result<Vec<Flavor>>;

    /// Delete a flavor by ID. Historical weight entries referencing it are
    /// deliberately left untouched.
    async fn delete_flavor(&self, flavor_id: &str) -> Result<()>;
}

/// Interface for weight entry storage operations
#[async_trait]
pub trait WeightEntryStorage: Send + Sync {
    /// Store a new weight entry
    async fn store_entry(&self, entry: &WeightEntry) -> Result<()>;

    /// Retrieve a specific entry by ID
    async fn get_entry(&self, entry_id: &str) -> Result<Option<WeightEntry>>;

    /// List entries for a business, newest first, optionally restricted to
    /// an inclusive (start, end) date range, both bounds `yyyy-mm-dd`
    async fn list_entries(
        &self,
        business_id: &str,
        date_range: Option<(&str, &str)>,
    ) -> Result<Vec<WeightEntry>>;

    /// Update an existing entry (full record)
    async fn update_entry(&self, entry: &WeightEntry) -> Result<()>;

    /// Delete a single entry
    /// Returns true if the entry was found and deleted, false otherwise
    async fn delete_entry(&self, entry_id: &str) -> Result<bool>;

    /// Delete all entries for a business within an inclusive date range
    /// Returns the number of entries actually deleted
    async fn delete_entries_in_range(
        &self,
        business_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<u64>;
}

/// Interface for daily sales tally storage operations
#[async_trait]
pub trait DailySalesStorage: Send + Sync {
    /// Retrieve the tally for one (date, business) pair; absence is not an
    /// error
    async fn get_daily_sales(
        &self,
        date: &str,
        customer_profile_id: &str,
    ) -> Result<Option<DailySales>>;

    /// Insert or overwrite the tally for one (date, business) pair and
    /// return the stored row
    async fn upsert_daily_sales(
        &self,
        date: &str,
        customer_profile_id: &str,
        sales: &SalesData,
    ) -> Result<DailySales>;

    /// List all tallies for a business, newest date first
    async fn list_daily_sales(&self, customer_profile_id: &str) -> Result<Vec<DailySales>>;
}

/// Factory trait abstracting the concrete storage connection.
///
/// The domain layer holds repositories created through this trait and never
/// names a storage backend directly.
pub trait Connection: Send + Sync + Clone + 'static {
    type BusinessRepository: BusinessStorage + Clone;
    type FlavorRepository: FlavorStorage + Clone;
    type WeightEntryRepository: WeightEntryStorage + Clone;
    type DailySalesRepository: DailySalesStorage + Clone;

    fn create_business_repository(&self) -> Self::BusinessRepository;
    fn create_flavor_repository(&self) -> Self::FlavorRepository;
    fn create_weight_entry_repository(&self) -> Self::WeightEntryRepository;
    fn create_daily_sales_repository(&self) -> Self::DailySalesRepository;
}
