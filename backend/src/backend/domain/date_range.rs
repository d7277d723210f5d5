//! Date range resolution for exports and bulk deletes.
//!
//! Translates the operator's chosen time window (explicit range, month+year
//! or year) into an inclusive calendar date range. Validation happens here,
//! before any query runs.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use shared::{ExportFilter, ExportFilterRequest, ExportMode};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(anyhow!("End date must not be before start date"));
        }
        Ok(Self { start, end })
    }

    /// The 1st through the actual last day of the given month, accounting
    /// for month length and leap years.
    pub fn month(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Month must be between 1 and 12, got {}", month));
        }
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| anyhow!("Invalid month {}-{}", year, month))?;
        let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
            .ok_or_else(|| anyhow!("Invalid month {}-{}", year, month))?;
        Ok(Self { start, end })
    }

    /// January 1st through December 31st of the given year.
    pub fn year(year: i32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| anyhow!("Invalid year {}", year))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| anyhow!("Invalid year {}", year))?;
        Ok(Self { start, end })
    }

    pub fn from_filter(filter: &ExportFilter) -> Result<Self> {
        match filter {
            ExportFilter::DateRange { start, end } => {
                Self::new(parse_date(start)?, parse_date(end)?)
            }
            ExportFilter::Month { month, year } => Self::month(*year, *month),
            ExportFilter::Year { year } => Self::year(*year),
        }
    }

    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

/// Validate the raw export form fields into a closed filter value.
///
/// Each mode requires its own fields; a missing field is a validation
/// error and no query is executed.
pub fn build_filter(request: &ExportFilterRequest) -> Result<ExportFilter> {
    match request.mode {
        ExportMode::Date => {
            let start = request
                .start_date
                .clone()
                .ok_or_else(|| anyhow!("Start date is required for a date range export"))?;
            let end = request
                .end_date
                .clone()
                .ok_or_else(|| anyhow!("End date is required for a date range export"))?;
            parse_date(&start)?;
            parse_date(&end)?;
            Ok(ExportFilter::DateRange { start, end })
        }
        ExportMode::Month => {
            let month = request
                .month
                .ok_or_else(|| anyhow!("Month is required for a monthly export"))?;
            let year = request
                .year
                .ok_or_else(|| anyhow!("Year is required for a monthly export"))?;
            if !(1..=12).contains(&month) {
                return Err(anyhow!("Month must be between 1 and 12, got {}", month));
            }
            Ok(ExportFilter::Month { month, year })
        }
        ExportMode::Year => {
            let year = request
                .year
                .ok_or_else(|| anyhow!("Year is required for a yearly export"))?;
            Ok(ExportFilter::Year { year })
        }
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| anyhow!("Invalid date '{}', expected yyyy-mm-dd", value))
}

/// Get the number of days in a given month and year.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Check if a year is a leap year.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_february_leap_year() {
        let range = DateRange::month(2024, 2).unwrap();
        assert_eq!(range.start_str(), "2024-02-01");
        assert_eq!(range.end_str(), "2024-02-29");
    }

    #[test]
    fn test_february_non_leap_year() {
        let range = DateRange::month(2023, 2).unwrap();
        assert_eq!(range.end_str(), "2023-02-28");
    }

    #[test]
    fn test_century_leap_rules() {
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2025));
    }

    #[test]
    fn test_thirty_day_month() {
        let range = DateRange::month(2025, 4).unwrap();
        assert_eq!(range.end_str(), "2025-04-30");
    }

    #[test]
    fn test_month_out_of_range_rejected() {
        assert!(DateRange::month(2025, 0).is_err());
        assert!(DateRange::month(2025, 13).is_err());
    }

    #[test]
    fn test_year_range() {
        let range = DateRange::year(2025).unwrap();
        assert_eq!(range.start_str(), "2025-01-01");
        assert_eq!(range.end_str(), "2025-12-31");
    }

    #[test]
    fn test_inverted_range_rejected() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(DateRange::new(start, end).is_err());
    }

    #[test]
    fn test_build_filter_date_mode_requires_both_bounds() {
        let request = ExportFilterRequest {
            mode: ExportMode::Date,
            start_date: Some("2025-06-01".to_string()),
            end_date: None,
            month: None,
            year: None,
        };
        assert!(build_filter(&request).is_err());

        let request = ExportFilterRequest {
            mode: ExportMode::Date,
            start_date: Some("2025-06-01".to_string()),
            end_date: Some("2025-06-30".to_string()),
            month: None,
            year: None,
        };
        let filter = build_filter(&request).unwrap();
        assert_eq!(
            filter,
            ExportFilter::DateRange {
                start: "2025-06-01".to_string(),
                end: "2025-06-30".to_string(),
            }
        );
    }

    #[test]
    fn test_build_filter_month_mode_requires_month_and_year() {
        let request = ExportFilterRequest {
            mode: ExportMode::Month,
            start_date: None,
            end_date: None,
            month: Some(6),
            year: None,
        };
        assert!(build_filter(&request).is_err());

        let request = ExportFilterRequest {
            mode: ExportMode::Month,
            start_date: None,
            end_date: None,
            month: Some(6),
            year: Some(2025),
        };
        assert_eq!(
            build_filter(&request).unwrap(),
            ExportFilter::Month {
                month: 6,
                year: 2025
            }
        );
    }

    #[test]
    fn test_build_filter_year_mode() {
        let request = ExportFilterRequest {
            mode: ExportMode::Year,
            start_date: None,
            end_date: None,
            month: None,
            year: Some(2024),
        };
        assert_eq!(
            build_filter(&request).unwrap(),
            ExportFilter::Year { year: 2024 }
        );
    }

    #[test]
    fn test_malformed_date_rejected() {
        let request = ExportFilterRequest {
            mode: ExportMode::Date,
            start_date: Some("01.06.2025".to_string()),
            end_date: Some("2025-06-30".to_string()),
            month: None,
            year: None,
        };
        assert!(build_filter(&request).is_err());
    }
}
