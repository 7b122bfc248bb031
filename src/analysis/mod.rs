//! Mealscope Analysis
//!
//! - **normalize**: menu item cleanup (annotations, portion markers)
//! - **frequency**: per-category menu item counts
//! - **ranking**: top-N rows by a numeric column

pub mod frequency;
pub mod normalize;
pub mod ranking;

pub use frequency::{
    AnalysisConfig, AnalysisWarning, FrequencyEntry, FrequencyTable, MenuFrequencyAnalyzer,
    DEFAULT_EXCLUSIONS,
};
pub use normalize::{normalize_cell, normalize_item, split_items};
pub use ranking::{parse_value, rank_column, value_columns, RankedEntry};
