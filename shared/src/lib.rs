use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A business (customer profile): a named sales location that scopes
/// weight entries and daily sales tallies. Flavors are global, not
/// per-business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub description: String,
    /// CSS gradient class used by the UI for the profile card
    pub color: String,
    /// Emoji shown on the profile card
    pub icon: String,
    /// Soft-delete flag; inactive businesses are hidden from listings
    pub is_active: bool,
    /// RFC 3339 creation timestamp
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBusinessRequest {
    pub name: String,
    pub description: String,
    pub color: String,
    pub icon: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBusinessRequest {
    pub name: String,
    pub description: String,
    pub color: String,
    pub icon: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessListResponse {
    pub businesses: Vec<Business>,
}

/// A flavor sold by weight. All flavors are operator-created; there is no
/// built-in set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flavor {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFlavorRequest {
    pub name: String,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlavorListResponse {
    pub flavors: Vec<Flavor>,
}

/// One recorded sale captured via a scale reading. Invariant maintained at
/// create/update time: `net_weight == gross_weight - container_weight` and
/// `gross_weight > container_weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: String,
    pub business_id: String,
    pub flavor_id: String,
    /// Total measured weight in grams, including the container
    pub gross_weight: f64,
    /// Sellable product weight in grams (gross minus container)
    pub net_weight: f64,
    /// Empty-container weight in grams, stored per entry
    pub container_weight: f64,
    /// Calendar date of the sale, ISO 8601 `yyyy-mm-dd`
    pub date: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWeightEntryRequest {
    pub business_id: String,
    pub flavor_id: String,
    pub gross_weight: f64,
    /// Defaults to the standard 700 g container when omitted
    pub container_weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateWeightEntryRequest {
    pub flavor_id: String,
    pub gross_weight: f64,
    pub container_weight: f64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntryListResponse {
    pub entries: Vec<WeightEntry>,
}

/// Time window for exports and filtered queries. A closed type: exactly one
/// of the three shapes is populated, never a mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExportFilter {
    /// Explicit inclusive date range, both bounds `yyyy-mm-dd`
    DateRange { start: String, end: String },
    /// A single calendar month; resolves to the 1st through the month's
    /// actual last day
    Month { month: u32, year: i32 },
    /// A whole calendar year, January 1st through December 31st
    Year { year: i32 },
}

/// Raw filter fields as entered in the export form. Validated into an
/// [`ExportFilter`] before any query runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportFilterRequest {
    pub mode: ExportMode,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportMode {
    Date,
    Month,
    Year,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPreviewRequest {
    pub business_id: String,
    pub filter: ExportFilterRequest,
}

/// Per-flavor aggregate over a set of weight entries. Flavors with zero
/// entries never appear, so `count >= 1` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlavorSummary {
    pub flavor_id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub count: u32,
    pub total_gross: f64,
    pub total_net: f64,
}

impl FlavorSummary {
    /// Average net weight per entry, rounded to whole grams for display.
    pub fn average_net(&self) -> i64 {
        (self.total_net / self.count as f64).round() as i64
    }
}

/// Grand totals across all flavor summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTotals {
    pub entry_count: u32,
    pub total_gross: f64,
    pub total_net: f64,
    /// Number of distinct flavors present in the window
    pub flavor_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPreviewResponse {
    pub entries: Vec<WeightEntry>,
    pub summary: Vec<FlavorSummary>,
    pub totals: SummaryTotals,
}

/// Map from flavor id to units sold, as tallied by hand (distinct from
/// weighed entries). Absent keys count as zero.
pub type SalesData = BTreeMap<String, u32>;

/// A manual per-day, per-flavor tally. One row per (date, business) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    pub id: String,
    pub date: String,
    pub customer_profile_id: String,
    pub sales: SalesData,
    pub created_at: String,
    pub updated_at: String,
}

impl DailySales {
    /// Units sold across all flavors for this day.
    pub fn total_units(&self) -> u32 {
        self.sales.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveDailySalesRequest {
    pub date: String,
    pub customer_profile_id: String,
    pub sales: SalesData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySalesQuery {
    pub date: String,
    pub customer_profile_id: String,
}

/// Aggregate statistics over a business's daily sales history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesStats {
    pub total_units: u32,
    /// Mean units per recorded day, rounded to the nearest whole unit
    pub average_per_day: u32,
    /// Highest single-day total
    pub best_day: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySalesHistoryResponse {
    pub days: Vec<DailySales>,
    pub stats: SalesStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteMonthRequest {
    pub business_id: String,
    pub month: u32,
    pub year: i32,
    /// Operator-typed confirmation phrase; must match the configured gate
    pub confirmation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteMonthResponse {
    pub deleted_count: u64,
}
