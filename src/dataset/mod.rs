//! Mealscope Dataset Layer
//!
//! This module acquires and holds the tabular input:
//!
//! - **types**: `Dataset`, `MenuRecord` and the column layouts
//! - **source**: `DataSource` (local path or URL) and encoding fallback
//! - **loader**: fetch + decode + CSV parse
//! - **cache**: in-memory datasets keyed by source identity
//! - **summary**: row counts, categories and the data period
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use mealscope::dataset::{DataSource, DatasetCache, DatasetLoader, LoaderConfig, MenuColumns};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = DatasetLoader::new(LoaderConfig::default())?;
//!     let cache = DatasetCache::new();
//!
//!     let source = DataSource::parse("menu.csv");
//!     let dataset = cache.get_or_load(&source, &loader).await?;
//!     let records = dataset.menu_records(&MenuColumns::default())?;
//!
//!     println!("{} menu rows", records.len());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod error;
pub mod loader;
pub mod source;
pub mod summary;
pub mod types;

// Re-export commonly used types
pub use cache::DatasetCache;
pub use error::{DatasetError, DatasetResult};
pub use loader::{parse_csv, DatasetLoader, LoaderConfig};
pub use source::{decode_with_fallback, DataSource, DEFAULT_ENCODINGS};
pub use summary::{data_period, parse_date, summarize, CategoryCount, DataPeriod, DatasetSummary};
pub use types::{Dataset, MbtiColumns, MenuColumns, MenuRecord};
