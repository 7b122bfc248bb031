//! Dataset Cache
//!
//! Keeps loaded datasets in memory for the lifetime of the process, keyed by
//! source identity (the path or URL string). Entries never expire on their
//! own; callers invalidate them explicitly.

use super::error::DatasetResult;
use super::loader::DatasetLoader;
use super::source::DataSource;
use super::types::Dataset;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Explicitly invalidated dataset cache
#[derive(Clone, Default)]
pub struct DatasetCache {
    entries: Arc<RwLock<HashMap<String, Arc<Dataset>>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached dataset for a source, if any
    pub async fn get(&self, source: &DataSource) -> Option<Arc<Dataset>> {
        self.entries.read().await.get(&source.identity()).cloned()
    }

    /// Store a dataset, replacing any previous entry for the same source
    pub async fn insert(&self, source: &DataSource, dataset: Dataset) -> Arc<Dataset> {
        let dataset = Arc::new(dataset);
        self.entries
            .write()
            .await
            .insert(source.identity(), Arc::clone(&dataset));
        dataset
    }

    /// Return the cached dataset or load and cache it
    ///
    /// Failed loads are not cached, so the next call retries.
    pub async fn get_or_load(
        &self,
        source: &DataSource,
        loader: &DatasetLoader,
    ) -> DatasetResult<Arc<Dataset>> {
        if let Some(dataset) = self.get(source).await {
            tracing::debug!("Cache hit for {}", source);
            return Ok(dataset);
        }

        tracing::debug!("Cache miss for {}", source);
        let dataset = loader.load(source).await?;
        Ok(self.insert(source, dataset).await)
    }

    /// Drop the entry for a source. Returns true if one was present.
    pub async fn invalidate(&self, source: &DataSource) -> bool {
        let removed = self.entries.write().await.remove(&source.identity()).is_some();
        if removed {
            tracing::info!("Invalidated cached dataset for {}", source);
        }
        removed
    }

    /// Drop every entry
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::loader::LoaderConfig;
    use crate::dataset::DatasetError;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_get_or_load_caches_by_identity() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("menu.csv");
        std::fs::write(&path, "식이구분,조식\n일반식,쌀밥\n").unwrap();

        let loader = DatasetLoader::new(LoaderConfig::default()).unwrap();
        let cache = DatasetCache::new();
        let source = DataSource::Local(path.clone());

        let first = cache.get_or_load(&source, &loader).await.unwrap();

        // Changing the file does not affect the cached copy
        std::fs::write(&path, "식이구분,조식\n일반식,쌀밥\n연식,흰죽\n").unwrap();
        let second = cache.get_or_load(&source, &loader).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);

        // Until invalidated
        assert!(cache.invalidate(&source).await);
        let third = cache.get_or_load(&source, &loader).await.unwrap();
        assert_eq!(third.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("late.csv");

        let loader = DatasetLoader::new(LoaderConfig::default()).unwrap();
        let cache = DatasetCache::new();
        let source = DataSource::Local(path.clone());

        let err = cache.get_or_load(&source, &loader).await.unwrap_err();
        assert!(matches!(err, DatasetError::FileNotFound { .. }));
        assert!(cache.is_empty().await);

        std::fs::write(&path, "Country,INTJ\nKorea,0.05\n").unwrap();
        let ds = cache.get_or_load(&source, &loader).await.unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = DatasetCache::new();
        let a = DataSource::parse("a.csv");
        let b = DataSource::parse("https://example.com/b.csv");
        let ds = Dataset::new(vec!["x".to_string()], vec![vec!["1".to_string()]]);

        cache.insert(&a, ds.clone()).await;
        cache.insert(&b, ds).await;
        assert_eq!(cache.len().await, 2);

        assert!(!cache.invalidate(&DataSource::parse("c.csv")).await);
        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
