pub mod sqlite;
pub mod traits;

pub use sqlite::DbConnection;
pub use traits::{
    BusinessStorage, Connection, DailySalesStorage, FlavorStorage, WeightEntryStorage,
};
