pub mod auth;
pub mod business_service;
pub mod confirmation_gate;
pub mod daily_sales_service;
pub mod date_range;
pub mod export_service;
pub mod flavor_service;
pub mod keepalive;
pub mod sales_tally;
pub mod scale_input;
pub mod summary;
pub mod weight_entry_service;

pub use business_service::BusinessService;
pub use daily_sales_service::DailySalesService;
pub use export_service::{ExportOutcome, ExportService};
pub use flavor_service::FlavorService;
pub use weight_entry_service::WeightEntryService;
