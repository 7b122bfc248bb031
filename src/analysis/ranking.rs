//! Column ranking
//!
//! Top-N rows of a dataset by one numeric column, e.g. the countries with
//! the highest share of a given MBTI type.

use crate::dataset::{Dataset, DatasetResult};
use serde::{Deserialize, Serialize};

/// A labelled value in a ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub label: String,
    pub value: f64,
}

/// Parse a numeric cell. A trailing `%` is accepted; non-finite values and
/// anything unparseable yield None.
pub fn parse_value(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    let number = cell.strip_suffix('%').unwrap_or(cell).trim();
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Every column other than the label column, in header order
pub fn value_columns(dataset: &Dataset, label_column: &str) -> DatasetResult<Vec<String>> {
    dataset.require_column(label_column)?;
    Ok(dataset
        .headers()
        .iter()
        .filter(|h| h.as_str() != label_column)
        .cloned()
        .collect())
}

/// Rank rows by `value_column`, highest first, and keep the first `top_n`
///
/// Rows with an empty or non-numeric value are skipped. Equal values keep
/// row order.
pub fn rank_column(
    dataset: &Dataset,
    label_column: &str,
    value_column: &str,
    top_n: usize,
) -> DatasetResult<Vec<RankedEntry>> {
    let label_idx = dataset.require_column(label_column)?;
    let value_idx = dataset.require_column(value_column)?;

    let mut entries: Vec<RankedEntry> = dataset
        .rows()
        .iter()
        .filter_map(|row| {
            parse_value(&row[value_idx]).map(|value| RankedEntry {
                label: row[label_idx].clone(),
                value,
            })
        })
        .collect();

    let skipped = dataset.len() - entries.len();
    if skipped > 0 {
        tracing::debug!("Skipped {} rows without a numeric '{}' value", skipped, value_column);
    }

    entries.sort_by(|a, b| b.value.total_cmp(&a.value));
    entries.truncate(top_n);

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetError;

    fn mbti() -> Dataset {
        let rows = [
            ["Korea", "0.051", "0.12"],
            ["Japan", "0.048", "n/a"],
            ["Brazil", "0.039", "0.10"],
            ["Finland", "0.051", "0.09"],
            ["Chile", "", "0.11"],
        ];
        Dataset::new(
            vec!["Country".to_string(), "INTJ".to_string(), "ENFP".to_string()],
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value(" 0.25 "), Some(0.25));
        assert_eq!(parse_value("12.5%"), Some(12.5));
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("NaN"), None);
        assert_eq!(parse_value("abc"), None);
    }

    #[test]
    fn test_value_columns() {
        assert_eq!(value_columns(&mbti(), "Country").unwrap(), vec!["INTJ", "ENFP"]);
    }

    #[test]
    fn test_rank_column_sorted_and_truncated() {
        let ranked = rank_column(&mbti(), "Country", "INTJ", 3).unwrap();
        let labels: Vec<&str> = ranked.iter().map(|e| e.label.as_str()).collect();

        // Korea and Finland tie; row order decides
        assert_eq!(labels, vec!["Korea", "Finland", "Japan"]);
        assert!(ranked.windows(2).all(|w| w[0].value >= w[1].value));
    }

    #[test]
    fn test_rank_column_skips_non_numeric() {
        let ranked = rank_column(&mbti(), "Country", "ENFP", 10).unwrap();
        assert_eq!(ranked.len(), 4);
        assert!(ranked.iter().all(|e| e.label != "Japan"));
    }

    #[test]
    fn test_rank_column_with_short_rows() {
        let ds = Dataset::new(
            vec!["Country".to_string(), "INTJ".to_string(), "ENFP".to_string()],
            vec![
                vec!["Korea".to_string(), "0.05".to_string()],
                vec!["Japan".to_string(), "0.06".to_string(), "0.08".to_string()],
            ],
        );

        let ranked = rank_column(&ds, "Country", "ENFP", 5).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].label, "Japan");
    }

    #[test]
    fn test_rank_unknown_type() {
        let err = rank_column(&mbti(), "Country", "XXXX", 5).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { .. }));
    }
}
