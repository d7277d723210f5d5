//! Export service domain logic.
//!
//! Builds the xlsx workbooks for weight data and sales history exports,
//! including orchestration of business lookup, entry retrieval and the
//! per-flavor summary. The REST layer only streams the finished bytes.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};
use log::info;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use shared::{
    Business, DailySales, ExportFilter, ExportFilterRequest, ExportPreviewRequest,
    ExportPreviewResponse, Flavor, FlavorSummary, WeightEntry,
};
use std::collections::HashMap;

use crate::backend::domain::business_service::BusinessService;
use crate::backend::domain::daily_sales_service::DailySalesService;
use crate::backend::domain::date_range::build_filter;
use crate::backend::domain::flavor_service::FlavorService;
use crate::backend::domain::summary::{summarize, totals};
use crate::backend::domain::weight_entry_service::WeightEntryService;
use crate::backend::storage::Connection;

/// Result of an export request. An empty window is reported as `NoData`
/// rather than producing a workbook with only headers.
pub enum ExportOutcome {
    NoData,
    Workbook {
        filename: String,
        bytes: Vec<u8>,
        entry_count: usize,
    },
}

/// Export service that handles all export-related business logic
#[derive(Clone)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a raw filter into entries plus the per-flavor summary, for
    /// display before the operator commits to a download.
    pub async fn build_preview<C: Connection>(
        &self,
        request: ExportPreviewRequest,
        weight_entry_service: &WeightEntryService<C>,
        flavor_service: &FlavorService<C>,
    ) -> Result<ExportPreviewResponse> {
        let filter = build_filter(&request.filter)?;
        let entries = weight_entry_service
            .list_entries(&request.business_id, Some(&filter))
            .await?
            .entries;
        let flavors = flavor_service.list_flavors().await?.flavors;

        let summary = summarize(&entries, &flavors);
        let grand_totals = totals(&summary);
        Ok(ExportPreviewResponse {
            entries,
            summary,
            totals: grand_totals,
        })
    }

    /// Export the weight entries of one business within a filter window as
    /// an xlsx workbook with a summary sheet and a detail sheet.
    pub async fn export_weight_entries<C: Connection>(
        &self,
        business_id: &str,
        filter_request: ExportFilterRequest,
        business_service: &BusinessService<C>,
        weight_entry_service: &WeightEntryService<C>,
        flavor_service: &FlavorService<C>,
    ) -> Result<ExportOutcome> {
        let business = business_service
            .get_business(business_id)
            .await?
            .ok_or_else(|| anyhow!("Business not found: {}", business_id))?;

        let filter = build_filter(&filter_request)?;
        let entries = weight_entry_service
            .list_entries(business_id, Some(&filter))
            .await?
            .entries;
        if entries.is_empty() {
            info!("Export for {}: no entries in window", business.name);
            return Ok(ExportOutcome::NoData);
        }

        let flavors = flavor_service.list_flavors().await?.flavors;
        let summary = summarize(&entries, &flavors);

        let mut workbook = Workbook::new();
        Self::write_summary_sheet(workbook.add_worksheet(), &summary)?;
        Self::write_detail_sheet(workbook.add_worksheet(), &entries, &business, &flavors)?;
        let bytes = workbook.save_to_buffer()?;

        let filename = format!(
            "{}_Gewichtsdaten_{}.xlsx",
            business.name,
            Self::filter_suffix(&filter)
        );
        info!(
            "Export for {}: {} entries -> {}",
            business.name,
            entries.len(),
            filename
        );
        Ok(ExportOutcome::Workbook {
            filename,
            entry_count: entries.len(),
            bytes,
        })
    }

    /// Export the full daily sales history of one business as an xlsx
    /// workbook with one row per recorded day.
    pub async fn export_sales_history<C: Connection>(
        &self,
        business_id: &str,
        business_service: &BusinessService<C>,
        daily_sales_service: &DailySalesService<C>,
        flavor_service: &FlavorService<C>,
    ) -> Result<ExportOutcome> {
        let business = business_service
            .get_business(business_id)
            .await?
            .ok_or_else(|| anyhow!("Business not found: {}", business_id))?;

        let days = daily_sales_service.history(business_id).await?.days;
        if days.is_empty() {
            info!("Sales export for {}: no recorded days", business.name);
            return Ok(ExportOutcome::NoData);
        }

        let flavors = flavor_service.list_flavors().await?.flavors;

        let mut workbook = Workbook::new();
        Self::write_sales_sheet(workbook.add_worksheet(), &days, &flavors)?;
        let bytes = workbook.save_to_buffer()?;

        let filename = format!(
            "{}_Verkaufsdaten_{}.xlsx",
            business.name,
            Local::now().format("%Y-%m-%d")
        );
        info!(
            "Sales export for {}: {} days -> {}",
            business.name,
            days.len(),
            filename
        );
        Ok(ExportOutcome::Workbook {
            filename,
            entry_count: days.len(),
            bytes,
        })
    }

    /// Filename suffix describing the exported window.
    fn filter_suffix(filter: &ExportFilter) -> String {
        match filter {
            ExportFilter::DateRange { start, end } => format!("{}_bis_{}", start, end),
            ExportFilter::Month { month, year } => format!("{}-{:02}", year, month),
            ExportFilter::Year { year } => format!("{}", year),
        }
    }

    fn write_summary_sheet(sheet: &mut Worksheet, summary: &[FlavorSummary]) -> Result<()> {
        let bold = Format::new().set_bold();
        sheet.set_name("Zusammenfassung")?;

        let headers = [
            "Eissorte",
            "Anzahl Einträge",
            "Gesamt Brutto (g)",
            "Gesamt Netto (g)",
            "Durchschnitt Netto (g)",
        ];
        for (col, header) in headers.iter().enumerate() {
            sheet.write_with_format(0, col as u16, *header, &bold)?;
            sheet.set_column_width(col as u16, 22)?;
        }

        let mut row = 1;
        for flavor in summary {
            sheet.write(row, 0, &flavor.name)?;
            sheet.write(row, 1, flavor.count)?;
            sheet.write(row, 2, flavor.total_gross.round())?;
            sheet.write(row, 3, flavor.total_net.round())?;
            sheet.write(row, 4, flavor.average_net() as f64)?;
            row += 1;
        }

        let grand = totals(summary);
        sheet.write_with_format(row, 0, "GESAMT", &bold)?;
        sheet.write_with_format(row, 1, grand.entry_count, &bold)?;
        sheet.write_with_format(row, 2, grand.total_gross.round(), &bold)?;
        sheet.write_with_format(row, 3, grand.total_net.round(), &bold)?;
        if grand.entry_count > 0 {
            let overall_average = (grand.total_net / grand.entry_count as f64).round();
            sheet.write_with_format(row, 4, overall_average, &bold)?;
        }
        Ok(())
    }

    fn write_detail_sheet(
        sheet: &mut Worksheet,
        entries: &[WeightEntry],
        business: &Business,
        flavors: &[Flavor],
    ) -> Result<()> {
        let bold = Format::new().set_bold();
        sheet.set_name("Detaildaten")?;

        let headers = [
            "Datum",
            "Geschäft",
            "Eissorte",
            "Brutto-Gewicht (g)",
            "Behälter-Gewicht (g)",
            "Netto-Gewicht (g)",
            "Erstellt",
        ];
        for (col, header) in headers.iter().enumerate() {
            sheet.write_with_format(0, col as u16, *header, &bold)?;
            sheet.set_column_width(col as u16, 20)?;
        }

        let names: HashMap<&str, &str> = flavors
            .iter()
            .map(|f| (f.id.as_str(), f.name.as_str()))
            .collect();

        for (index, entry) in entries.iter().enumerate() {
            let row = index as u32 + 1;
            let flavor_name = names
                .get(entry.flavor_id.as_str())
                .copied()
                .unwrap_or(entry.flavor_id.as_str());
            sheet.write(row, 0, &entry.date)?;
            sheet.write(row, 1, &business.name)?;
            sheet.write(row, 2, flavor_name)?;
            sheet.write(row, 3, entry.gross_weight)?;
            sheet.write(row, 4, entry.container_weight)?;
            sheet.write(row, 5, entry.net_weight)?;
            sheet.write(row, 6, Self::format_created_at(&entry.created_at))?;
        }
        Ok(())
    }

    fn write_sales_sheet(
        sheet: &mut Worksheet,
        days: &[DailySales],
        flavors: &[Flavor],
    ) -> Result<()> {
        let bold = Format::new().set_bold();
        sheet.set_name("Verkaufsdaten")?;

        sheet.write_with_format(0, 0, "Datum", &bold)?;
        sheet.write_with_format(0, 1, "Gesamt", &bold)?;
        for (index, flavor) in flavors.iter().enumerate() {
            sheet.write_with_format(0, index as u16 + 2, &flavor.name, &bold)?;
        }
        sheet.set_column_width(0, 14)?;

        for (index, day) in days.iter().enumerate() {
            let row = index as u32 + 1;
            sheet.write(row, 0, &day.date)?;
            sheet.write(row, 1, day.total_units())?;
            for (col, flavor) in flavors.iter().enumerate() {
                let count = day.sales.get(&flavor.id).copied().unwrap_or(0);
                sheet.write(row, col as u16 + 2, count)?;
            }
        }
        Ok(())
    }

    /// Render an RFC 3339 timestamp as a local, human-readable string.
    /// Falls back to the raw value if it does not parse.
    fn format_created_at(created_at: &str) -> String {
        match DateTime::parse_from_rfc3339(created_at) {
            Ok(parsed) => parsed
                .with_timezone(&Local)
                .format("%d.%m.%Y, %H:%M:%S")
                .to_string(),
            Err(_) => created_at.to_string(),
        }
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::DbConnection;
    use shared::{
        CreateBusinessRequest, CreateFlavorRequest, CreateWeightEntryRequest, ExportMode,
        SaveDailySalesRequest,
    };

    struct Services {
        business: BusinessService<DbConnection>,
        flavor: FlavorService<DbConnection>,
        weight: WeightEntryService<DbConnection>,
        daily_sales: DailySalesService<DbConnection>,
        export: ExportService,
    }

    async fn setup_services() -> Services {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        Services {
            business: BusinessService::new(&db),
            flavor: FlavorService::new(&db),
            weight: WeightEntryService::new(&db),
            daily_sales: DailySalesService::new(&db),
            export: ExportService::new(),
        }
    }

    async fn seed_business(services: &Services, name: &str) -> String {
        services
            .business
            .create_business(CreateBusinessRequest {
                name: name.to_string(),
                description: String::new(),
                color: "from-sky-200 to-sky-300".to_string(),
                icon: "🏖️".to_string(),
                is_active: true,
            })
            .await
            .unwrap()
            .id
    }

    fn current_month_filter() -> ExportFilterRequest {
        let today = Local::now();
        ExportFilterRequest {
            mode: ExportMode::Month,
            start_date: None,
            end_date: None,
            month: Some(today.format("%m").to_string().parse().unwrap()),
            year: Some(today.format("%Y").to_string().parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn test_export_empty_window_reports_no_data() {
        let services = setup_services().await;
        let business_id = seed_business(&services, "Strandkiosk").await;

        let outcome = services
            .export
            .export_weight_entries(
                &business_id,
                current_month_filter(),
                &services.business,
                &services.weight,
                &services.flavor,
            )
            .await
            .unwrap();
        assert!(matches!(outcome, ExportOutcome::NoData));
    }

    #[tokio::test]
    async fn test_export_produces_xlsx_workbook() {
        let services = setup_services().await;
        let business_id = seed_business(&services, "Strandkiosk").await;
        let flavor = services
            .flavor
            .create_flavor(CreateFlavorRequest {
                name: "Vanille".to_string(),
                icon: "🍨".to_string(),
                color: "from-amber-100 to-amber-200".to_string(),
            })
            .await
            .unwrap();
        services
            .weight
            .create_entry(CreateWeightEntryRequest {
                business_id: business_id.clone(),
                flavor_id: flavor.id.clone(),
                gross_weight: 1200.0,
                container_weight: None,
            })
            .await
            .unwrap();

        let outcome = services
            .export
            .export_weight_entries(
                &business_id,
                current_month_filter(),
                &services.business,
                &services.weight,
                &services.flavor,
            )
            .await
            .unwrap();

        match outcome {
            ExportOutcome::Workbook {
                filename,
                bytes,
                entry_count,
            } => {
                assert!(filename.starts_with("Strandkiosk_Gewichtsdaten_"));
                assert!(filename.ends_with(".xlsx"));
                assert_eq!(entry_count, 1);
                // xlsx files are zip archives
                assert_eq!(&bytes[0..4], b"PK\x03\x04");
            }
            ExportOutcome::NoData => panic!("expected a workbook"),
        }
    }

    #[tokio::test]
    async fn test_export_workbook_is_writable_to_disk() {
        let services = setup_services().await;
        let business_id = seed_business(&services, "Strandkiosk").await;
        services
            .daily_sales
            .save_tally(SaveDailySalesRequest {
                date: "2025-06-30".to_string(),
                customer_profile_id: business_id.clone(),
                sales: [("vanilla".to_string(), 4)].into_iter().collect(),
            })
            .await
            .unwrap();

        let outcome = services
            .export
            .export_sales_history(
                &business_id,
                &services.business,
                &services.daily_sales,
                &services.flavor,
            )
            .await
            .unwrap();

        let ExportOutcome::Workbook { bytes, .. } = outcome else {
            panic!("expected a workbook");
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.xlsx");
        std::fs::write(&path, &bytes).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[tokio::test]
    async fn test_preview_summarizes_entries() {
        let services = setup_services().await;
        let business_id = seed_business(&services, "Strandkiosk").await;
        let flavor = services
            .flavor
            .create_flavor(CreateFlavorRequest {
                name: "Vanille".to_string(),
                icon: "🍨".to_string(),
                color: "from-amber-100 to-amber-200".to_string(),
            })
            .await
            .unwrap();
        for gross in [1200.0, 1400.0] {
            services
                .weight
                .create_entry(CreateWeightEntryRequest {
                    business_id: business_id.clone(),
                    flavor_id: flavor.id.clone(),
                    gross_weight: gross,
                    container_weight: None,
                })
                .await
                .unwrap();
        }

        let preview = services
            .export
            .build_preview(
                ExportPreviewRequest {
                    business_id: business_id.clone(),
                    filter: current_month_filter(),
                },
                &services.weight,
                &services.flavor,
            )
            .await
            .unwrap();

        assert_eq!(preview.entries.len(), 2);
        assert_eq!(preview.summary.len(), 1);
        assert_eq!(preview.summary[0].count, 2);
        assert_eq!(preview.summary[0].total_net, 1200.0);
        assert_eq!(preview.totals.entry_count, 2);
        assert_eq!(preview.totals.flavor_count, 1);
    }

    #[test]
    fn test_summary_sheet_writes_total_row() {
        let summary = vec![
            FlavorSummary {
                flavor_id: "vanilla".to_string(),
                name: "Vanille".to_string(),
                icon: "🍨".to_string(),
                color: "from-amber-100 to-amber-200".to_string(),
                count: 2,
                total_gross: 2400.0,
                total_net: 1000.0,
            },
            FlavorSummary {
                flavor_id: "mango".to_string(),
                name: "Mango".to_string(),
                icon: "🥭".to_string(),
                color: "from-orange-100 to-orange-200".to_string(),
                count: 1,
                total_gross: 900.0,
                total_net: 200.0,
            },
        ];

        // GESAMT row carries the overall average: 1200 / 3 = 400
        let grand = totals(&summary);
        assert_eq!((grand.total_net / grand.entry_count as f64).round(), 400.0);

        let mut sheet = Worksheet::new();
        ExportService::write_summary_sheet(&mut sheet, &summary).unwrap();
    }

    #[test]
    fn test_summary_sheet_handles_empty_summary() {
        let mut sheet = Worksheet::new();
        ExportService::write_summary_sheet(&mut sheet, &[]).unwrap();
    }

    #[test]
    fn test_filter_suffix_shapes() {
        assert_eq!(
            ExportService::filter_suffix(&ExportFilter::DateRange {
                start: "2025-06-01".to_string(),
                end: "2025-06-30".to_string(),
            }),
            "2025-06-01_bis_2025-06-30"
        );
        assert_eq!(
            ExportService::filter_suffix(&ExportFilter::Month {
                month: 6,
                year: 2025
            }),
            "2025-06"
        );
        assert_eq!(
            ExportService::filter_suffix(&ExportFilter::Year { year: 2025 }),
            "2025"
        );
    }
}
