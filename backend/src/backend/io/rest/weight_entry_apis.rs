//! # REST API for Weight Entries
//!
//! Endpoints for recording scale readings, listing entries with an
//! optional filter window, and the monthly bulk delete.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info, warn};
use serde::Deserialize;

use crate::backend::domain::date_range::build_filter;
use crate::backend::AppState;
use shared::{
    CreateWeightEntryRequest, DeleteMonthRequest, ExportFilterRequest, ExportMode,
    UpdateWeightEntryRequest,
};

/// Query parameters for listing weight entries. When `mode` is present the
/// remaining fields are validated into a filter window.
#[derive(Debug, Deserialize)]
pub struct ListWeightEntriesQuery {
    pub business_id: String,
    pub mode: Option<ExportMode>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// Record a new weight entry
pub async fn create_weight_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateWeightEntryRequest>,
) -> impl IntoResponse {
    info!("POST /api/weight-entries - request: {:?}", request);

    match state.weight_entry_service.create_entry(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to create weight entry: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// List weight entries for a business, newest first
pub async fn list_weight_entries(
    State(state): State<AppState>,
    Query(query): Query<ListWeightEntriesQuery>,
) -> impl IntoResponse {
    info!("GET /api/weight-entries - query: {:?}", query);

    let filter = match query.mode {
        Some(mode) => {
            let request = ExportFilterRequest {
                mode,
                start_date: query.start_date,
                end_date: query.end_date,
                month: query.month,
                year: query.year,
            };
            match build_filter(&request) {
                Ok(filter) => Some(filter),
                Err(e) => {
                    warn!("Rejected weight entry filter: {}", e);
                    return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
                }
            }
        }
        None => None,
    };

    match state
        .weight_entry_service
        .list_entries(&query.business_id, filter.as_ref())
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list weight entries: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing weight entries").into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TodaysEntriesQuery {
    pub business_id: String,
}

/// Entries recorded today, for the running daily total
pub async fn todays_weight_entries(
    State(state): State<AppState>,
    Query(query): Query<TodaysEntriesQuery>,
) -> impl IntoResponse {
    info!("GET /api/weight-entries/today - business: {}", query.business_id);

    match state
        .weight_entry_service
        .todays_entries(&query.business_id)
        .await
    {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => {
            error!("Failed to list today's entries: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing today's entries").into_response()
        }
    }
}

/// Update a weight entry
pub async fn update_weight_entry(
    State(state): State<AppState>,
    axum::extract::Path(entry_id): axum::extract::Path<String>,
    Json(request): Json<UpdateWeightEntryRequest>,
) -> impl IntoResponse {
    info!("PUT /api/weight-entries/{} - request: {:?}", entry_id, request);

    match state
        .weight_entry_service
        .update_entry(&entry_id, request)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to update weight entry: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Delete a single weight entry
pub async fn delete_weight_entry(
    State(state): State<AppState>,
    axum::extract::Path(entry_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/weight-entries/{}", entry_id);

    match state.weight_entry_service.delete_entry(&entry_id).await {
        Ok(true) => (StatusCode::NO_CONTENT, "").into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Weight entry not found").into_response(),
        Err(e) => {
            error!("Failed to delete weight entry: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Delete a whole month of entries for a business, gated by the typed
/// confirmation phrase
pub async fn delete_month(
    State(state): State<AppState>,
    Json(request): Json<DeleteMonthRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/weight-entries/delete-month - business: {}, {}-{:02}",
        request.business_id, request.year, request.month
    );

    match state.weight_entry_service.delete_month(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed monthly delete: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}
