//! # Mealscope
//!
//! Menu Frequency Dashboard - load a tabular dataset (hospital meal menus or
//! MBTI survey shares) from a local file or URL, rank what appears most, and
//! render it as a bar chart and table.
//!
//! ## Features
//!
//! - **Flexible sources**: local paths and HTTP(S) URLs behind one `DataSource`
//! - **Encoding fallback**: UTF-8 first, then EUC-KR/CP949 (configurable)
//! - **Menu normalization**: strips `(...)`, `[...]` and `1/2` annotations
//! - **Explicit caching**: datasets cached by source identity until invalidated
//!
//! ## Modules
//!
//! - [`dataset`]: loading, decoding, caching and summarizing datasets
//! - [`analysis`]: menu frequency and column ranking
//! - [`dashboard`]: per-interaction views over a cached dataset
//! - [`report`]: chart, table, JSON and CSV rendering
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mealscope::{Config, Dashboard, OutputFormat, render_menu_view};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dashboard = Dashboard::new(Config::load_default())?;
//!
//!     for category in dashboard.categories().await? {
//!         let view = dashboard.menu_frequency(&category, Some(10)).await?;
//!         print!("{}", render_menu_view(&view, OutputFormat::Table, 40)?);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod report;

// Re-export top-level types for convenience
pub use dataset::{
    DataSource, Dataset, DatasetCache, DatasetError, DatasetLoader, DatasetResult,
    DatasetSummary, LoaderConfig, MbtiColumns, MenuColumns, MenuRecord,
};

pub use analysis::{
    AnalysisConfig, AnalysisWarning, FrequencyEntry, FrequencyTable, MenuFrequencyAnalyzer,
    RankedEntry,
};

pub use dashboard::{Dashboard, MenuView, RankView};

pub use report::{
    render_categories, render_menu_view, render_rank_view, render_summary, render_types,
    OutputFormat, RenderError,
};

pub use config::{Config, ConfigError, DisplayConfig, LoggingConfig, SourceConfig};
