//! # Weight Entry Service
//!
//! Core data entry: each save turns a scale reading into a stored entry
//! with the container weight already deducted. Also hosts the monthly bulk
//! delete, which sits behind the confirmation gate.

use anyhow::{anyhow, Result};
use chrono::{Local, Utc};
use log::{info, warn};
use shared::{
    CreateWeightEntryRequest, DeleteMonthRequest, DeleteMonthResponse, ExportFilter,
    UpdateWeightEntryRequest, WeightEntry, WeightEntryListResponse,
};
use uuid::Uuid;

use crate::backend::domain::confirmation_gate::ConfirmationGate;
use crate::backend::domain::date_range::{parse_date, DateRange};
use crate::backend::domain::scale_input::DEFAULT_CONTAINER_WEIGHT_G;
use crate::backend::storage::{Connection, WeightEntryStorage};

#[derive(Clone)]
pub struct WeightEntryService<C: Connection> {
    repository: C::WeightEntryRepository,
    gate: ConfirmationGate,
}

impl<C: Connection> WeightEntryService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            repository: connection.create_weight_entry_repository(),
            gate: ConfirmationGate::new(),
        }
    }

    /// Record a new sale. The entry is dated with the local calendar day;
    /// the net weight is derived here and never accepted from the caller.
    pub async fn create_entry(&self, request: CreateWeightEntryRequest) -> Result<WeightEntry> {
        let container_weight = request
            .container_weight
            .unwrap_or(DEFAULT_CONTAINER_WEIGHT_G);
        if request.gross_weight <= container_weight {
            return Err(anyhow!("Gross weight must exceed container weight"));
        }
        if request.flavor_id.trim().is_empty() {
            return Err(anyhow!("Flavor must be selected"));
        }

        let entry = WeightEntry {
            id: Uuid::new_v4().to_string(),
            business_id: request.business_id,
            flavor_id: request.flavor_id,
            gross_weight: request.gross_weight,
            net_weight: request.gross_weight - container_weight,
            container_weight,
            date: Local::now().format("%Y-%m-%d").to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        self.repository.store_entry(&entry).await?;
        info!(
            "Recorded weight entry: {}g net of {} for business {}",
            entry.net_weight, entry.flavor_id, entry.business_id
        );
        Ok(entry)
    }

    /// List entries for a business, optionally restricted to a filter
    /// window. Entries come back newest first.
    pub async fn list_entries(
        &self,
        business_id: &str,
        filter: Option<&ExportFilter>,
    ) -> Result<WeightEntryListResponse> {
        let entries = match filter {
            Some(filter) => {
                let range = DateRange::from_filter(filter)?;
                let (start, end) = (range.start_str(), range.end_str());
                self.repository
                    .list_entries(business_id, Some((&start, &end)))
                    .await?
            }
            None => self.repository.list_entries(business_id, None).await?,
        };
        Ok(WeightEntryListResponse { entries })
    }

    /// Entries recorded today (local calendar day) for the live badge.
    pub async fn todays_entries(&self, business_id: &str) -> Result<Vec<WeightEntry>> {
        let today = Local::now().format("%Y-%m-%d").to_string();
        self.repository
            .list_entries(business_id, Some((&today, &today)))
            .await
    }

    /// Update a stored entry; the net weight is recomputed from the new
    /// gross and container weights.
    pub async fn update_entry(
        &self,
        entry_id: &str,
        request: UpdateWeightEntryRequest,
    ) -> Result<WeightEntry> {
        if request.gross_weight <= request.container_weight {
            return Err(anyhow!("Gross weight must exceed container weight"));
        }
        if request.flavor_id.trim().is_empty() {
            return Err(anyhow!("Flavor must be selected"));
        }
        // Range queries compare dates as yyyy-mm-dd strings; any other
        // shape would drop the entry out of every filter window
        parse_date(&request.date)?;

        let mut entry = self
            .repository
            .get_entry(entry_id)
            .await?
            .ok_or_else(|| anyhow!("Weight entry not found: {}", entry_id))?;

        entry.flavor_id = request.flavor_id;
        entry.gross_weight = request.gross_weight;
        entry.container_weight = request.container_weight;
        entry.net_weight = request.gross_weight - request.container_weight;
        entry.date = request.date;

        self.repository.update_entry(&entry).await?;
        info!("Updated weight entry: {}", entry_id);
        Ok(entry)
    }

    /// Delete one entry. Returns false if it did not exist.
    pub async fn delete_entry(&self, entry_id: &str) -> Result<bool> {
        let deleted = self.repository.delete_entry(entry_id).await?;
        if deleted {
            info!("Deleted weight entry: {}", entry_id);
        }
        Ok(deleted)
    }

    /// Delete every entry of one business within one calendar month. The
    /// typed confirmation phrase is checked before anything is touched.
    pub async fn delete_month(&self, request: DeleteMonthRequest) -> Result<DeleteMonthResponse> {
        self.gate.require(&request.confirmation)?;

        let range = DateRange::month(request.year, request.month)?;
        let deleted_count = self
            .repository
            .delete_entries_in_range(&request.business_id, &range.start_str(), &range.end_str())
            .await?;

        warn!(
            "Deleted {} weight entries for business {} in {}-{:02}",
            deleted_count, request.business_id, request.year, request.month
        );
        Ok(DeleteMonthResponse { deleted_count })
    }
}
