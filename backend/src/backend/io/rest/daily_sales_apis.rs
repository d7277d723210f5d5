//! # REST API for Daily Sales Tallies
//!
//! Endpoints for loading and saving the per-day unit tallies and for the
//! sales history view.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;

use crate::backend::AppState;
use shared::{DailySalesQuery, SaveDailySalesRequest};

/// Load the tally for one (date, business) pair. Returns an empty map if
/// nothing was saved for that day.
pub async fn get_daily_sales(
    State(state): State<AppState>,
    Query(query): Query<DailySalesQuery>,
) -> impl IntoResponse {
    info!(
        "GET /api/daily-sales - date: {}, business: {}",
        query.date, query.customer_profile_id
    );

    match state
        .daily_sales_service
        .load_tally(&query.date, &query.customer_profile_id)
        .await
    {
        Ok(tally) => (StatusCode::OK, Json(tally.into_map())).into_response(),
        Err(e) => {
            error!("Failed to load daily sales: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error loading daily sales").into_response()
        }
    }
}

/// Save (upsert) the tally for one day
pub async fn save_daily_sales(
    State(state): State<AppState>,
    Json(request): Json<SaveDailySalesRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/daily-sales - date: {}, business: {}",
        request.date, request.customer_profile_id
    );

    match state.daily_sales_service.save_tally(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to save daily sales: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub customer_profile_id: String,
}

/// Full sales history for a business, newest day first, with statistics
pub async fn daily_sales_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    info!(
        "GET /api/daily-sales/history - business: {}",
        query.customer_profile_id
    );

    match state
        .daily_sales_service
        .history(&query.customer_profile_id)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to load sales history: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error loading sales history").into_response()
        }
    }
}
