//! Core data types for loaded datasets
//!
//! - `Dataset`: a decoded CSV table (header row plus string cells)
//! - `MenuColumns` / `MbtiColumns`: which columns each dashboard reads
//! - `MenuRecord`: one row of a menu dataset, projected onto those columns

use super::error::{DatasetError, DatasetResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A decoded tabular dataset
///
/// Rows are padded (or cut) to the header width on construction, so every
/// row has exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    /// Name of the encoding the payload was decoded with
    encoding: String,
}

impl Dataset {
    /// Create a dataset from a header row and data rows
    ///
    /// Short rows are padded with empty cells.
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        for row in &mut rows {
            row.resize(headers.len(), String::new());
        }

        Self {
            headers,
            rows,
            encoding: "UTF-8".to_string(),
        }
    }

    /// Builder method: record the encoding used to decode the payload
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Number of data rows (header excluded)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by exact header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of a column, or `MissingColumn` listing the actual headers
    pub fn require_column(&self, name: &str) -> DatasetResult<usize> {
        self.column_index(name)
            .ok_or_else(|| DatasetError::MissingColumn {
                column: name.to_string(),
                available: self.headers.clone(),
            })
    }

    /// Distinct non-empty values of a column, in first-encounter order
    pub fn distinct_values(&self, column: &str) -> DatasetResult<Vec<String>> {
        Ok(self
            .value_counts(column)?
            .into_iter()
            .map(|(value, _)| value)
            .collect())
    }

    /// Distinct non-empty values of a column with their row counts,
    /// in first-encounter order
    pub fn value_counts(&self, column: &str) -> DatasetResult<Vec<(String, usize)>> {
        let idx = self.require_column(column)?;

        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(String, usize)> = Vec::new();

        for row in &self.rows {
            let value = row[idx].as_str();
            if value.is_empty() {
                continue;
            }
            match positions.get(value) {
                Some(&pos) => counts[pos].1 += 1,
                None => {
                    positions.insert(value, counts.len());
                    counts.push((value.to_string(), 1));
                }
            }
        }

        Ok(counts)
    }

    /// Project the rows onto menu records
    ///
    /// Fails with `MissingColumn` if the category column or any meal-slot
    /// column is absent. A configured date column that is absent is not an
    /// error; records simply carry no date.
    pub fn menu_records(&self, columns: &MenuColumns) -> DatasetResult<Vec<MenuRecord>> {
        let category_idx = self.require_column(&columns.category)?;
        let slot_idx = columns
            .slots
            .iter()
            .map(|name| self.require_column(name))
            .collect::<DatasetResult<Vec<_>>>()?;
        let date_idx = columns
            .date
            .as_deref()
            .and_then(|name| self.column_index(name));

        Ok(self
            .rows
            .iter()
            .map(|row| MenuRecord {
                date: date_idx.map(|i| row[i].clone()),
                category: row[category_idx].clone(),
                slots: slot_idx.iter().map(|&i| row[i].clone()).collect(),
            })
            .collect())
    }
}

/// Column names read by the menu dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuColumns {
    /// Diet category label column
    #[serde(default = "default_category_column")]
    pub category: String,

    /// Meal-slot columns (breakfast, lunch, dinner)
    #[serde(default = "default_slot_columns")]
    pub slots: Vec<String>,

    /// Optional date column, used for the data period summary
    #[serde(default = "default_date_column")]
    pub date: Option<String>,
}

fn default_category_column() -> String {
    "식이구분".to_string()
}

fn default_slot_columns() -> Vec<String> {
    vec!["조식".to_string(), "중식".to_string(), "석식".to_string()]
}

fn default_date_column() -> Option<String> {
    Some("날짜".to_string())
}

impl Default for MenuColumns {
    fn default() -> Self {
        Self {
            category: default_category_column(),
            slots: default_slot_columns(),
            date: default_date_column(),
        }
    }
}

/// Column names read by the MBTI ranking dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MbtiColumns {
    /// Row label column; every other column is a selectable type
    #[serde(default = "default_label_column")]
    pub label: String,
}

fn default_label_column() -> String {
    "Country".to_string()
}

impl Default for MbtiColumns {
    fn default() -> Self {
        Self {
            label: default_label_column(),
        }
    }
}

/// One row of a menu dataset: a date, a diet category and its meal slots
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuRecord {
    pub date: Option<String>,
    pub category: String,
    /// Raw slot cells, each holding zero or more items joined by a delimiter
    pub slots: Vec<String>,
}

impl MenuRecord {
    pub fn new(category: impl Into<String>, slots: Vec<String>) -> Self {
        Self {
            date: None,
            category: category.into(),
            slots,
        }
    }

    /// Builder method: set the date text
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            vec![
                "날짜".to_string(),
                "식이구분".to_string(),
                "조식".to_string(),
                "중식".to_string(),
                "석식".to_string(),
            ],
            vec![
                vec!["2025-03-01", "일반식", "쌀밥+된장국", "", "잡곡밥+김구이"],
                vec!["2025-03-01", "당뇨식", "잡곡밥", "미역국", ""],
                vec!["2025-03-02", "일반식", "흰죽", "", ""],
            ]
            .into_iter()
            .map(|r| r.into_iter().map(String::from).collect())
            .collect(),
        )
    }

    #[test]
    fn test_value_counts_keep_encounter_order() {
        let ds = sample();
        let counts = ds.value_counts("식이구분").unwrap();
        assert_eq!(
            counts,
            vec![("일반식".to_string(), 2), ("당뇨식".to_string(), 1)]
        );
    }

    #[test]
    fn test_menu_records_projection() {
        let ds = sample();
        let records = ds.menu_records(&MenuColumns::default()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].date.as_deref(), Some("2025-03-01"));
        assert_eq!(records[0].category, "일반식");
        assert_eq!(records[0].slots, vec!["쌀밥+된장국", "", "잡곡밥+김구이"]);
    }

    #[test]
    fn test_menu_records_missing_slot_column() {
        let ds = sample();
        let columns = MenuColumns {
            slots: vec!["조식".to_string(), "간식".to_string()],
            ..Default::default()
        };

        let err = ds.menu_records(&columns).unwrap_err();
        match err {
            DatasetError::MissingColumn { column, available } => {
                assert_eq!(column, "간식");
                assert_eq!(available.len(), 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_rows_padded_on_construction() {
        let ds = Dataset::new(
            vec![
                "식이구분".to_string(),
                "조식".to_string(),
                "중식".to_string(),
                "석식".to_string(),
            ],
            vec![vec!["일반식".to_string(), "쌀밥".to_string()]],
        );

        assert_eq!(ds.rows()[0], vec!["일반식", "쌀밥", "", ""]);

        let records = ds.menu_records(&MenuColumns::default()).unwrap();
        assert_eq!(records[0].slots, vec!["쌀밥", "", ""]);
        assert!(records[0].date.is_none());
        assert!(ds.value_counts("석식").unwrap().is_empty());
    }

    #[test]
    fn test_absent_date_column_is_not_an_error() {
        let ds = sample();
        let columns = MenuColumns {
            date: Some("일자".to_string()),
            ..Default::default()
        };

        let records = ds.menu_records(&columns).unwrap();
        assert!(records.iter().all(|r| r.date.is_none()));
    }
}
