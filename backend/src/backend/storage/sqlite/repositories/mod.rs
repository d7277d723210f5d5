pub mod business_repository;
pub mod daily_sales_repository;
pub mod flavor_repository;
pub mod weight_entry_repository;

pub use business_repository::BusinessRepository;
pub use daily_sales_repository::DailySalesRepository;
pub use flavor_repository::FlavorRepository;
pub use weight_entry_repository::WeightEntryRepository;
