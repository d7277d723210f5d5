//! # Daily Sales Service
//!
//! Hand-counted units sold per flavor per day, kept separate from the
//! weighed entries. One tally per (date, business) pair; saving replaces
//! the whole tally for that day.

use anyhow::Result;
use log::info;
use shared::{DailySales, DailySalesHistoryResponse, SalesStats, SaveDailySalesRequest};

use crate::backend::domain::sales_tally::SalesTally;
use crate::backend::storage::{Connection, DailySalesStorage};

#[derive(Clone)]
pub struct DailySalesService<C: Connection> {
    repository: C::DailySalesRepository,
}

impl<C: Connection> DailySalesService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            repository: connection.create_daily_sales_repository(),
        }
    }

    /// Load the tally for one day, empty if nothing was saved yet.
    pub async fn load_tally(&self, date: &str, business_id: &str) -> Result<SalesTally> {
        let stored = self.repository.get_daily_sales(date, business_id).await?;
        Ok(match stored {
            Some(day) => SalesTally::from_map(day.sales),
            None => SalesTally::new(),
        })
    }

    /// Save a day's tally. Zero counts are pruned before persisting, so a
    /// flavor reset to zero disappears from the stored map.
    pub async fn save_tally(&self, request: SaveDailySalesRequest) -> Result<DailySales> {
        let tally = SalesTally::from_map(request.sales);
        let saved = self
            .repository
            .upsert_daily_sales(
                &request.date,
                &request.customer_profile_id,
                tally.as_map(),
            )
            .await?;
        info!(
            "Saved daily sales for {} / {}: {} units",
            saved.date,
            saved.customer_profile_id,
            saved.total_units()
        );
        Ok(saved)
    }

    /// Full history for a business, newest day first, with aggregate
    /// statistics over the recorded days.
    pub async fn history(&self, business_id: &str) -> Result<DailySalesHistoryResponse> {
        let days = self.repository.list_daily_sales(business_id).await?;
        let stats = Self::compute_stats(&days);
        Ok(DailySalesHistoryResponse { days, stats })
    }

    fn compute_stats(days: &[DailySales]) -> SalesStats {
        if days.is_empty() {
            return SalesStats {
                total_units: 0,
                average_per_day: 0,
                best_day: 0,
            };
        }

        let totals: Vec<u32> = days.iter().map(DailySales::total_units).collect();
        let total_units: u32 = totals.iter().sum();
        let best_day = totals.iter().copied().max().unwrap_or(0);
        let average_per_day = (total_units as f64 / days.len() as f64).round() as u32;

        SalesStats {
            total_units,
            average_per_day,
            best_day,
        }
    }
}
