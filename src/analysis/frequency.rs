//! Menu Frequency Analyzer
//!
//! Counts how often each menu item is served to one diet category.
//!
//! # Pipeline
//!
//! ```text
//! records → filter(category) → split('+') → normalize → count
//!         → drop excluded staples → drop short items → stable sort by count
//! ```

use super::normalize::{item_len, normalize_cell};
use crate::dataset::MenuRecord;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Staples removed by default: rice and porridge variants
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "쌀밥",
    "잡곡밥",
    "보리밥",
    "흑미밥",
    "흰죽",
    "쌀죽",
    "야채죽",
    "새우살죽",
    "흑임자죽",
];

/// Analyzer settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Character joining items inside a meal-slot cell
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Normalized items always removed from the count
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Items shorter than this many characters are discarded
    #[serde(default = "default_min_item_chars")]
    pub min_item_chars: usize,
}

fn default_delimiter() -> char {
    '+'
}

fn default_exclude() -> Vec<String> {
    DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_min_item_chars() -> usize {
    2
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            exclude: default_exclude(),
            min_item_chars: default_min_item_chars(),
        }
    }
}

/// One row of a frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub item: String,
    pub count: usize,
}

/// Menu items ranked by count, descending; ties keep first-encounter order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyTable {
    category: String,
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` highest-ranked entries (all of them if fewer)
    pub fn top(&self, n: usize) -> &[FrequencyEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Sum of all counts
    pub fn total_count(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Count for one item, if present
    pub fn count_of(&self, item: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.item == item).map(|e| e.count)
    }

    /// Warning to show instead of a chart when nothing was counted
    pub fn warning(&self) -> Option<AnalysisWarning> {
        if self.entries.is_empty() {
            Some(AnalysisWarning::NoMatchingCategory {
                category: self.category.clone(),
            })
        } else {
            None
        }
    }
}

/// Non-fatal analysis outcomes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisWarning {
    /// The category matched no rows, or every item was filtered out
    NoMatchingCategory { category: String },
}

impl std::fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisWarning::NoMatchingCategory { category } => write!(
                f,
                "No menu data found for '{}', or too few items to analyze",
                category
            ),
        }
    }
}

/// Counts normalized menu items per diet category
pub struct MenuFrequencyAnalyzer {
    config: AnalysisConfig,
    exclude: HashSet<String>,
}

impl Default for MenuFrequencyAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl MenuFrequencyAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        let exclude = config.exclude.iter().cloned().collect();
        Self { config, exclude }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// All normalized items for a category, in encounter order, before the
    /// exclusion and length filters
    ///
    /// The category match is exact: case-sensitive, no trimming.
    pub fn extract_items(&self, records: &[MenuRecord], category: &str) -> Vec<String> {
        records
            .iter()
            .filter(|r| r.category == category)
            .flat_map(|r| r.slots.iter())
            .flat_map(|cell| normalize_cell(cell, self.config.delimiter))
            .collect()
    }

    /// True if an item survives the exclusion set and the length filter
    pub fn is_countable(&self, item: &str) -> bool {
        !self.exclude.contains(item) && item_len(item) >= self.config.min_item_chars
    }

    /// Build the frequency table for a category
    ///
    /// An unknown category produces an empty table, not an error.
    pub fn analyze(&self, records: &[MenuRecord], category: &str) -> FrequencyTable {
        let items = self.extract_items(records, category);

        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<FrequencyEntry> = Vec::new();

        for item in items {
            match positions.get(&item) {
                Some(&pos) => entries[pos].count += 1,
                None => {
                    positions.insert(item.clone(), entries.len());
                    entries.push(FrequencyEntry { item, count: 1 });
                }
            }
        }

        entries.retain(|e| self.is_countable(&e.item));

        // sort_by is stable, so ties stay in encounter order
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        tracing::debug!(
            category = %category,
            distinct_items = entries.len(),
            "Menu frequency computed"
        );

        FrequencyTable {
            category: category.to_string(),
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalize::normalize_item;

    fn record(category: &str, slots: [&str; 3]) -> MenuRecord {
        MenuRecord::new(category, slots.iter().map(|s| s.to_string()).collect())
    }

    fn sample_records() -> Vec<MenuRecord> {
        vec![
            record("일반식", ["쌀밥+포기김치(1/2)+계란말이", "잡곡밥+된장국+포기김치", "쌀밥+백김치"]),
            record("일반식", ["흰죽+백김치", "쌀밥+된장국+깍두기", "보리밥+포기김치+소"]),
            record("당뇨식", ["잡곡밥+멸치볶음", "잡곡밥+오이생채+멸치볶음", ""]),
            record("연식", ["흰죽+백김치", "", "쌀죽+들깨나물+백김치"]),
        ]
    }

    #[test]
    fn test_rice_excluded_from_single_row() {
        let records = vec![record("general", ["쌀밥+포기김치(1/2)", "", "된장국"])];
        let analyzer = MenuFrequencyAnalyzer::default();

        assert_eq!(
            analyzer.extract_items(&records, "general"),
            vec!["쌀밥", "포기김치", "된장국"]
        );

        let table = analyzer.analyze(&records, "general");
        assert_eq!(
            table.entries(),
            &[
                FrequencyEntry { item: "포기김치".to_string(), count: 1 },
                FrequencyEntry { item: "된장국".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_ranked_with_stable_ties() {
        let table = MenuFrequencyAnalyzer::default().analyze(&sample_records(), "일반식");

        let ranked: Vec<(&str, usize)> = table
            .entries()
            .iter()
            .map(|e| (e.item.as_str(), e.count))
            .collect();

        assert_eq!(
            ranked,
            vec![
                ("포기김치", 3),
                ("된장국", 2),
                ("백김치", 2),
                ("계란말이", 1),
                ("깍두기", 1),
            ]
        );
    }

    #[test]
    fn test_excluded_and_short_items_dropped() {
        let records = vec![record("연식", ["흑미밥(1/2)+소", "새우살죽", "무나물"])];
        let table = MenuFrequencyAnalyzer::default().analyze(&records, "연식");

        assert_eq!(table.count_of("흑미밥"), None);
        assert_eq!(table.count_of("새우살죽"), None);
        assert_eq!(table.count_of("소"), None);
        assert_eq!(table.count_of("무나물"), Some(1));
    }

    #[test]
    fn test_unknown_category_is_empty_not_error() {
        let table = MenuFrequencyAnalyzer::default().analyze(&sample_records(), "저염식");
        assert!(table.is_empty());
        assert_eq!(
            table.warning(),
            Some(AnalysisWarning::NoMatchingCategory {
                category: "저염식".to_string()
            })
        );
    }

    #[test]
    fn test_category_match_is_exact() {
        let table = MenuFrequencyAnalyzer::default().analyze(&sample_records(), " 일반식");
        assert!(table.is_empty());
    }

    #[test]
    fn test_total_matches_countable_tokens() {
        let analyzer = MenuFrequencyAnalyzer::default();
        let records = sample_records();

        for category in ["일반식", "당뇨식", "연식", "없음"] {
            let table = analyzer.analyze(&records, category);
            let countable = analyzer
                .extract_items(&records, category)
                .iter()
                .filter(|item| analyzer.is_countable(item))
                .count();

            assert_eq!(table.total_count(), countable, "category {category}");
        }
    }

    #[test]
    fn test_counts_never_increase() {
        let table = MenuFrequencyAnalyzer::default().analyze(&sample_records(), "일반식");
        assert!(table
            .entries()
            .windows(2)
            .all(|pair| pair[0].count >= pair[1].count));
    }

    #[test]
    fn test_custom_exclusions_and_threshold() {
        let config = AnalysisConfig {
            exclude: vec!["포기김치".to_string(), "백김치".to_string(), "깍두기".to_string()],
            min_item_chars: 4,
            ..Default::default()
        };
        let table = MenuFrequencyAnalyzer::new(config).analyze(&sample_records(), "일반식");

        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].item, "계란말이");
    }

    #[test]
    fn test_default_exclusions_survive_normalization() {
        // An exclusion that normalization rewrites could never match
        for item in DEFAULT_EXCLUSIONS {
            assert_eq!(normalize_item(item), *item);
        }

        let records = vec![record("일반식", ["쌀밥1/2+계란찜", "", ""])];
        let table = MenuFrequencyAnalyzer::default().analyze(&records, "일반식");
        assert_eq!(table.count_of("쌀밥"), None);
        assert_eq!(table.count_of("계란찜"), Some(1));
    }

    #[test]
    fn test_top_n() {
        let table = MenuFrequencyAnalyzer::default().analyze(&sample_records(), "일반식");
        assert_eq!(table.top(2).len(), 2);
        assert_eq!(table.top(100).len(), table.len());
        assert_eq!(table.top(2)[0].item, "포기김치");
    }
}
