//! # REST API Interface Layer
//!
//! HTTP endpoints for the scale tool. This layer handles request and
//! response serialization, basic input checking, and the translation of
//! domain errors into HTTP status codes; all business logic stays in the
//! domain layer.

pub mod business_apis;
pub mod daily_sales_apis;
pub mod export_apis;
pub mod flavor_apis;
pub mod weight_entry_apis;

pub use business_apis::*;
pub use daily_sales_apis::*;
pub use export_apis::*;
pub use flavor_apis::*;
pub use weight_entry_apis::*;
