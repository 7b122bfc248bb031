//! Dataset Summary
//!
//! Overview of a loaded menu dataset: size, columns, per-category row counts
//! and the period covered by the date column.

use super::types::{Dataset, MenuColumns};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// First and last date found in the date column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl std::fmt::Display for DataPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ~ {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Row count for one category value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub rows: usize,
}

/// Overview of a dataset
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub row_count: usize,
    pub columns: Vec<String>,
    pub encoding: String,
    /// Empty when the category column is absent
    pub categories: Vec<CategoryCount>,
    /// None when the date column is absent or holds no parseable dates
    pub period: Option<DataPeriod>,
    /// Leading rows, for a quick look at the raw data
    pub preview: Vec<Vec<String>>,
}

/// Summarize a dataset using the menu column layout
pub fn summarize(dataset: &Dataset, columns: &MenuColumns, preview_rows: usize) -> DatasetSummary {
    let categories = dataset
        .value_counts(&columns.category)
        .map(|counts| {
            counts
                .into_iter()
                .map(|(category, rows)| CategoryCount { category, rows })
                .collect()
        })
        .unwrap_or_default();

    let period = columns
        .date
        .as_deref()
        .and_then(|name| data_period(dataset, name));

    DatasetSummary {
        row_count: dataset.len(),
        columns: dataset.headers().to_vec(),
        encoding: dataset.encoding().to_string(),
        categories,
        period,
        preview: dataset.rows().iter().take(preview_rows).cloned().collect(),
    }
}

/// Min and max parseable date of a column
pub fn data_period(dataset: &Dataset, column: &str) -> Option<DataPeriod> {
    let idx = dataset.column_index(column)?;

    let mut dates = dataset
        .rows()
        .iter()
        .filter_map(|row| parse_date(&row[idx]));

    let first = dates.next()?;
    let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));

    Some(DataPeriod { start, end })
}

/// Parse a date cell, accepting the formats public datasets commonly use
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y.%m.%d.", "%m/%d/%Y"];
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M"];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
