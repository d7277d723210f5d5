//! # REST API for Business Management
//!
//! Endpoints for creating, retrieving, updating, and deactivating
//! businesses.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::backend::AppState;
use shared::{CreateBusinessRequest, UpdateBusinessRequest};

/// Create a new business
pub async fn create_business(
    State(state): State<AppState>,
    Json(request): Json<CreateBusinessRequest>,
) -> impl IntoResponse {
    info!("POST /api/businesses - request: {:?}", request);

    match state.business_service.create_business(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to create business: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Get a business by ID
pub async fn get_business(
    State(state): State<AppState>,
    axum::extract::Path(business_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("GET /api/businesses/{}", business_id);

    match state.business_service.get_business(&business_id).await {
        Ok(Some(business)) => (StatusCode::OK, Json(business)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Business not found").into_response(),
        Err(e) => {
            error!("Failed to get business: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving business").into_response()
        }
    }
}

/// List all active businesses
pub async fn list_businesses(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/businesses");

    match state.business_service.list_businesses().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list businesses: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing businesses").into_response()
        }
    }
}

/// Update a business
pub async fn update_business(
    State(state): State<AppState>,
    axum::extract::Path(business_id): axum::extract::Path<String>,
    Json(request): Json<UpdateBusinessRequest>,
) -> impl IntoResponse {
    info!("PUT /api/businesses/{} - request: {:?}", business_id, request);

    match state
        .business_service
        .update_business(&business_id, request)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to update business: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Deactivate a business (soft delete)
pub async fn delete_business(
    State(state): State<AppState>,
    axum::extract::Path(business_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/businesses/{}", business_id);

    match state.business_service.deactivate_business(&business_id).await {
        Ok(()) => (StatusCode::NO_CONTENT, "").into_response(),
        Err(e) => {
            error!("Failed to deactivate business: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}
