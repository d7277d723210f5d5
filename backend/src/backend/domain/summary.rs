//! Per-flavor aggregation over weight entries.
//!
//! Produces the summary shown on the export preview screen and, restricted
//! to a single day, the today's-sales badges in the calculator view. Stored
//! weights stay unrounded floating-point grams; rounding to whole grams
//! happens only at presentation and export time.

use std::collections::HashMap;

use shared::{Flavor, FlavorSummary, SummaryTotals, WeightEntry};

/// Placeholder icon for entries whose flavor was deleted from the catalog.
pub const UNKNOWN_FLAVOR_ICON: &str = "🍦";
/// Placeholder card color for deleted flavors.
pub const UNKNOWN_FLAVOR_COLOR: &str = "from-stone-200 to-stone-300";

/// Group entries by flavor, resolving name/icon/color from the catalog.
///
/// Deleted flavors fall back to the raw id as name plus the generic
/// placeholder icon and color; history stays readable after a flavor is
/// gone. The result is sorted descending by total net weight; ties keep
/// their first-seen order (stable sort).
pub fn summarize(entries: &[WeightEntry], catalog: &[Flavor]) -> Vec<FlavorSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<FlavorSummary> = Vec::new();

    for entry in entries {
        let slot = match index.get(entry.flavor_id.as_str()) {
            Some(&slot) => slot,
            None => {
                let flavor = catalog.iter().find(|f| f.id == entry.flavor_id);
                summaries.push(FlavorSummary {
                    flavor_id: entry.flavor_id.clone(),
                    name: flavor
                        .map(|f| f.name.clone())
                        .unwrap_or_else(|| entry.flavor_id.clone()),
                    icon: flavor
                        .map(|f| f.icon.clone())
                        .unwrap_or_else(|| UNKNOWN_FLAVOR_ICON.to_string()),
                    color: flavor
                        .map(|f| f.color.clone())
                        .unwrap_or_else(|| UNKNOWN_FLAVOR_COLOR.to_string()),
                    count: 0,
                    total_gross: 0.0,
                    total_net: 0.0,
                });
                index.insert(entry.flavor_id.as_str(), summaries.len() - 1);
                summaries.len() - 1
            }
        };

        let summary = &mut summaries[slot];
        summary.count += 1;
        summary.total_gross += entry.gross_weight;
        summary.total_net += entry.net_weight;
    }

    // Vec::sort_by is stable, so equal totals retain input order
    summaries.sort_by(|a, b| b.total_net.total_cmp(&a.total_net));
    summaries
}

/// Grand totals derived from the per-flavor summaries. Equals the sums
/// over the raw entry list by construction.
pub fn totals(summary: &[FlavorSummary]) -> SummaryTotals {
    SummaryTotals {
        entry_count: summary.iter().map(|s| s.count).sum(),
        total_gross: summary.iter().map(|s| s.total_gross).sum(),
        total_net: summary.iter().map(|s| s.total_net).sum(),
        flavor_count: summary.len() as u32,
    }
}

/// Net grams sold for one flavor within the given entries, rounded for the
/// badge display.
pub fn net_for_flavor(entries: &[WeightEntry], flavor_id: &str) -> i64 {
    entries
        .iter()
        .filter(|e| e.flavor_id == flavor_id)
        .map(|e| e.net_weight)
        .sum::<f64>()
        .round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flavor(id: &str, name: &str) -> Flavor {
        Flavor {
            id: id.to_string(),
            name: name.to_string(),
            icon: "🍨".to_string(),
            color: "from-amber-100 to-amber-300".to_string(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    fn entry(flavor_id: &str, gross: f64, net: f64) -> WeightEntry {
        WeightEntry {
            id: format!("entry-{}-{}", flavor_id, gross),
            business_id: "business-1".to_string(),
            flavor_id: flavor_id.to_string(),
            gross_weight: gross,
            net_weight: net,
            container_weight: gross - net,
            date: "2025-06-30".to_string(),
            created_at: "2025-06-30T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_groups_entries_by_flavor() {
        let catalog = vec![flavor("vanilla", "Vanille"), flavor("choc", "Schokolade")];
        let entries = vec![
            entry("vanilla", 1200.0, 500.0),
            entry("choc", 900.0, 200.0),
            entry("vanilla", 1000.0, 300.0),
        ];

        let summary = summarize(&entries, &catalog);
        assert_eq!(summary.len(), 2);

        let vanilla = summary.iter().find(|s| s.flavor_id == "vanilla").unwrap();
        assert_eq!(vanilla.name, "Vanille");
        assert_eq!(vanilla.count, 2);
        assert_eq!(vanilla.total_gross, 2200.0);
        assert_eq!(vanilla.total_net, 800.0);
        assert_eq!(vanilla.average_net(), 400);
    }

    #[test]
    fn test_sorted_descending_by_total_net() {
        let catalog = vec![flavor("a", "A"), flavor("b", "B"), flavor("c", "C")];
        let entries = vec![
            entry("a", 800.0, 100.0),
            entry("b", 1500.0, 800.0),
            entry("c", 1000.0, 300.0),
        ];

        let summary = summarize(&entries, &catalog);
        let order: Vec<&str> = summary.iter().map(|s| s.flavor_id.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let catalog = vec![flavor("first", "First"), flavor("second", "Second")];
        let entries = vec![
            entry("first", 1000.0, 300.0),
            entry("second", 1000.0, 300.0),
        ];

        let summary = summarize(&entries, &catalog);
        assert_eq!(summary[0].flavor_id, "first");
        assert_eq!(summary[1].flavor_id, "second");
    }

    #[test]
    fn test_deleted_flavor_falls_back_to_placeholder() {
        let entries = vec![entry("gone-flavor", 1200.0, 500.0)];

        let summary = summarize(&entries, &[]);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].name, "gone-flavor");
        assert_eq!(summary[0].icon, UNKNOWN_FLAVOR_ICON);
        assert_eq!(summary[0].color, UNKNOWN_FLAVOR_COLOR);
    }

    #[test]
    fn test_totals_round_trip_against_raw_entries() {
        let catalog = vec![flavor("a", "A"), flavor("b", "B")];
        let entries = vec![
            entry("a", 1234.5, 534.5),
            entry("b", 987.25, 287.25),
            entry("a", 701.0, 1.0),
            entry("b", 2000.0, 1300.0),
        ];

        let summary = summarize(&entries, &catalog);
        let totals = totals(&summary);

        let raw_net: f64 = entries.iter().map(|e| e.net_weight).sum();
        let raw_gross: f64 = entries.iter().map(|e| e.gross_weight).sum();

        assert_eq!(totals.entry_count, entries.len() as u32);
        assert!((totals.total_net - raw_net).abs() < 1e-9);
        assert!((totals.total_gross - raw_gross).abs() < 1e-9);
        assert_eq!(totals.flavor_count, 2);
    }

    #[test]
    fn test_empty_input_yields_empty_summary() {
        let summary = summarize(&[], &[]);
        assert!(summary.is_empty());
        let totals = totals(&summary);
        assert_eq!(totals.entry_count, 0);
        assert_eq!(totals.total_net, 0.0);
    }

    #[test]
    fn test_net_for_flavor_rounds_for_display() {
        let entries = vec![
            entry("vanilla", 1200.4, 500.4),
            entry("vanilla", 1000.3, 300.3),
            entry("choc", 900.0, 200.0),
        ];
        assert_eq!(net_for_flavor(&entries, "vanilla"), 801);
        assert_eq!(net_for_flavor(&entries, "choc"), 200);
        assert_eq!(net_for_flavor(&entries, "missing"), 0);
    }
}
