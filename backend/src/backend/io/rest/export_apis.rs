//! # REST API for Exports
//!
//! Endpoints for the export preview and the xlsx downloads. Workbook
//! responses carry the spreadsheet content type and a download filename;
//! an empty window is a 404 with a user-facing message.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;

use crate::backend::domain::ExportOutcome;
use crate::backend::AppState;
use shared::ExportPreviewRequest;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const NO_DATA_MESSAGE: &str = "Keine Daten für den ausgewählten Zeitraum gefunden";

fn workbook_response(filename: String, bytes: Vec<u8>) -> axum::response::Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Preview the entries and per-flavor summary for a filter window
pub async fn export_preview(
    State(state): State<AppState>,
    Json(request): Json<ExportPreviewRequest>,
) -> impl IntoResponse {
    info!("POST /api/export/preview - business: {}", request.business_id);

    match state
        .export_service
        .build_preview(request, &state.weight_entry_service, &state.flavor_service)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to build export preview: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Download the weight data workbook for a filter window
pub async fn export_weight_entries(
    State(state): State<AppState>,
    Json(request): Json<ExportPreviewRequest>,
) -> impl IntoResponse {
    info!("POST /api/export - business: {}", request.business_id);

    let outcome = state
        .export_service
        .export_weight_entries(
            &request.business_id,
            request.filter,
            &state.business_service,
            &state.weight_entry_service,
            &state.flavor_service,
        )
        .await;

    match outcome {
        Ok(ExportOutcome::Workbook {
            filename, bytes, ..
        }) => workbook_response(filename, bytes),
        Ok(ExportOutcome::NoData) => (StatusCode::NOT_FOUND, NO_DATA_MESSAGE).into_response(),
        Err(e) => {
            error!("Failed to export weight entries: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SalesExportQuery {
    pub business_id: String,
}

/// Download the sales history workbook for a business
pub async fn export_sales_history(
    State(state): State<AppState>,
    Query(query): Query<SalesExportQuery>,
) -> impl IntoResponse {
    info!("GET /api/export/sales - business: {}", query.business_id);

    let outcome = state
        .export_service
        .export_sales_history(
            &query.business_id,
            &state.business_service,
            &state.daily_sales_service,
            &state.flavor_service,
        )
        .await;

    match outcome {
        Ok(ExportOutcome::Workbook {
            filename, bytes, ..
        }) => workbook_response(filename, bytes),
        Ok(ExportOutcome::NoData) => (StatusCode::NOT_FOUND, NO_DATA_MESSAGE).into_response(),
        Err(e) => {
            error!("Failed to export sales history: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}
