//! Dashboard Session
//!
//! Ties configuration, the loader and the dataset cache together and answers
//! one interaction at a time: list categories, compute a menu frequency view,
//! rank a type column, summarize the data.

use crate::analysis::{rank_column, value_columns, FrequencyEntry, MenuFrequencyAnalyzer, RankedEntry};
use crate::config::Config;
use crate::dataset::{
    summarize, DataSource, Dataset, DatasetCache, DatasetLoader, DatasetResult, DatasetSummary,
};
use serde::Serialize;
use std::sync::Arc;

/// Menu frequency result, ready to render
#[derive(Debug, Clone, Serialize)]
pub struct MenuView {
    pub category: String,
    pub top_n: usize,
    /// Distinct countable items before the top-N cut
    pub distinct_items: usize,
    pub entries: Vec<FrequencyEntry>,
    pub commentary: Option<String>,
}

impl MenuView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Column ranking result, ready to render
#[derive(Debug, Clone, Serialize)]
pub struct RankView {
    pub label_column: String,
    pub value_column: String,
    pub top_n: usize,
    pub entries: Vec<RankedEntry>,
}

/// One user's dashboard over one data source
pub struct Dashboard {
    config: Config,
    source: DataSource,
    loader: DatasetLoader,
    cache: DatasetCache,
    analyzer: MenuFrequencyAnalyzer,
}

impl Dashboard {
    /// Create a dashboard for the configured source
    pub fn new(config: Config) -> DatasetResult<Self> {
        let source = DataSource::parse(&config.source.location);
        let loader = DatasetLoader::new(config.source.loader_config())?;
        let analyzer = MenuFrequencyAnalyzer::new(config.analysis.clone());

        Ok(Self {
            config,
            source,
            loader,
            cache: DatasetCache::new(),
            analyzer,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Point the dashboard at another source. Cached datasets of other
    /// sources stay cached.
    pub fn set_source(&mut self, source: DataSource) {
        tracing::info!("Switching data source to {}", source);
        self.source = source;
    }

    /// The current source's dataset, from cache when possible
    pub async fn dataset(&self) -> DatasetResult<Arc<Dataset>> {
        self.cache.get_or_load(&self.source, &self.loader).await
    }

    /// Drop the current source from the cache and load it again
    pub async fn reload(&self) -> DatasetResult<Arc<Dataset>> {
        self.cache.invalidate(&self.source).await;
        self.dataset().await
    }

    /// Selectable diet categories, in first-encounter order
    pub async fn categories(&self) -> DatasetResult<Vec<String>> {
        let dataset = self.dataset().await?;
        dataset.distinct_values(&self.config.columns.menu.category)
    }

    /// Menu frequency for one category, cut to top-N
    ///
    /// `top_n` is clamped into the configured range; None means the
    /// configured default.
    pub async fn menu_frequency(
        &self,
        category: &str,
        top_n: Option<usize>,
    ) -> DatasetResult<MenuView> {
        let dataset = self.dataset().await?;
        let records = dataset.menu_records(&self.config.columns.menu)?;
        let top_n = self.config.display.clamp_top_n(top_n);

        let table = self.analyzer.analyze(&records, category);
        if let Some(warning) = table.warning() {
            tracing::warn!("{}", warning);
        }

        Ok(MenuView {
            category: table.category().to_string(),
            top_n,
            distinct_items: table.len(),
            entries: table.top(top_n).to_vec(),
            commentary: self.commentary(category).map(String::from),
        })
    }

    /// Selectable type columns of an MBTI-style dataset
    pub async fn types(&self) -> DatasetResult<Vec<String>> {
        let dataset = self.dataset().await?;
        value_columns(&dataset, &self.config.columns.mbti.label)
    }

    /// Top-N labels by one type column
    pub async fn rank(&self, value_column: &str, top_n: Option<usize>) -> DatasetResult<RankView> {
        let dataset = self.dataset().await?;
        let label_column = &self.config.columns.mbti.label;
        let top_n = self.config.display.clamp_top_n(top_n);

        let entries = rank_column(&dataset, label_column, value_column, top_n)?;

        Ok(RankView {
            label_column: label_column.clone(),
            value_column: value_column.to_string(),
            top_n,
            entries,
        })
    }

    /// Size, columns, categories and period of the current dataset
    pub async fn summary(&self) -> DatasetResult<DatasetSummary> {
        let dataset = self.dataset().await?;
        Ok(summarize(
            &dataset,
            &self.config.columns.menu,
            self.config.display.preview_rows,
        ))
    }

    /// Configured commentary for a category
    pub fn commentary(&self, category: &str) -> Option<&str> {
        self.config.commentary.get(category).map(String::as_str)
    }
}
