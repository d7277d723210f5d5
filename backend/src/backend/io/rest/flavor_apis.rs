//! # REST API for the Flavor Catalog
//!
//! Endpoints for creating, listing, and deleting flavors.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::backend::AppState;
use shared::CreateFlavorRequest;

/// Create a new flavor
pub async fn create_flavor(
    State(state): State<AppState>,
    Json(request): Json<CreateFlavorRequest>,
) -> impl IntoResponse {
    info!("POST /api/flavors - request: {:?}", request);

    match state.flavor_service.create_flavor(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to create flavor: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// List all flavors in creation order
pub async fn list_flavors(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/flavors");

    match state.flavor_service.list_flavors().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list flavors: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing flavors").into_response()
        }
    }
}

/// Delete a flavor. Existing weight entries keep their flavor reference.
pub async fn delete_flavor(
    State(state): State<AppState>,
    axum::extract::Path(flavor_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/flavors/{}", flavor_id);

    match state.flavor_service.delete_flavor(&flavor_id).await {
        Ok(()) => (StatusCode::NO_CONTENT, "").into_response(),
        Err(e) => {
            error!("Failed to delete flavor: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
