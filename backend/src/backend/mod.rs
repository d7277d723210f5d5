//! # Backend
//!
//! Layered backend for the ice cream scale tool:
//! - `domain`: business logic (scale arithmetic, summaries, tallies,
//!   exports, the confirmation gate)
//! - `storage`: repository traits and the SQLite implementation
//! - `io`: the REST surface
//!
//! The domain layer never touches HTTP and the io layer never touches
//! SQL; everything meets in the services held by [`AppState`].

pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::backend::domain::keepalive::spawn_keepalive;
use crate::backend::domain::{
    BusinessService, DailySalesService, ExportService, FlavorService, WeightEntryService,
};
use crate::backend::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub business_service: BusinessService<DbConnection>,
    pub flavor_service: FlavorService<DbConnection>,
    pub weight_entry_service: WeightEntryService<DbConnection>,
    pub daily_sales_service: DailySalesService<DbConnection>,
    pub export_service: ExportService,
}

impl AppState {
    fn from_connection(db_conn: &DbConnection) -> Self {
        Self {
            business_service: BusinessService::new(db_conn),
            flavor_service: FlavorService::new(db_conn),
            weight_entry_service: WeightEntryService::new(db_conn),
            daily_sales_service: DailySalesService::new(db_conn),
            export_service: ExportService::new(),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend() -> Result<AppState> {
    info!("Setting up database");
    let db_conn = DbConnection::init().await?;

    info!("Setting up domain model");
    let app_state = AppState::from_connection(&db_conn);

    info!("Starting keepalive heartbeat");
    spawn_keepalive(Arc::new(db_conn));

    Ok(app_state)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the frontend dev server to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:5173".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/businesses",
            get(io::list_businesses).post(io::create_business),
        )
        .route(
            "/businesses/:business_id",
            get(io::get_business)
                .put(io::update_business)
                .delete(io::delete_business),
        )
        .route("/flavors", get(io::list_flavors).post(io::create_flavor))
        .route("/flavors/:flavor_id", axum::routing::delete(io::delete_flavor))
        .route(
            "/weight-entries",
            get(io::list_weight_entries).post(io::create_weight_entry),
        )
        .route("/weight-entries/today", get(io::todays_weight_entries))
        .route(
            "/weight-entries/delete-month",
            post(io::delete_month),
        )
        .route(
            "/weight-entries/:entry_id",
            put(io::update_weight_entry).delete(io::delete_weight_entry),
        )
        .route(
            "/daily-sales",
            get(io::get_daily_sales).put(io::save_daily_sales),
        )
        .route("/daily-sales/history", get(io::daily_sales_history))
        .route("/export", post(io::export_weight_entries))
        .route("/export/preview", post(io::export_preview))
        .route("/export/sales", get(io::export_sales_history));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
