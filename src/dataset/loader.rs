//! Dataset Loader
//!
//! Fetches raw bytes from a `DataSource`, decodes them with the configured
//! encoding fallback chain and parses the text as a CSV table.
//!
//! # Load Pipeline
//!
//! ```text
//! DataSource → fetch (fs / HTTP) → decode (utf-8 → euc-kr → ...) → CSV parse → Dataset
//! ```

use super::error::{DatasetError, DatasetResult};
use super::source::{decode_with_fallback, DataSource, DEFAULT_ENCODINGS};
use super::types::Dataset;
use reqwest::Client;
use std::time::Duration;

/// Loader configuration
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Encoding labels to try, in order
    pub encodings: Vec<String>,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            encodings: DEFAULT_ENCODINGS.iter().map(|s| s.to_string()).collect(),
            timeout_secs: 30,
        }
    }
}

/// Loads datasets from local files and URLs
pub struct DatasetLoader {
    client: Client,
    config: LoaderConfig,
}

impl DatasetLoader {
    /// Create a loader with the given configuration
    pub fn new(config: LoaderConfig) -> DatasetResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load and parse a dataset
    pub async fn load(&self, source: &DataSource) -> DatasetResult<Dataset> {
        tracing::info!("Loading dataset from {}", source);

        let bytes = self.fetch(source).await?;
        let dataset = self.parse_bytes(&bytes, &source.identity())?;

        tracing::info!(
            "Loaded {} rows x {} columns from {} ({})",
            dataset.len(),
            dataset.headers().len(),
            source,
            dataset.encoding()
        );

        Ok(dataset)
    }

    /// Decode and parse a raw payload
    pub fn parse_bytes(&self, bytes: &[u8], location: &str) -> DatasetResult<Dataset> {
        let (text, encoding) = decode_with_fallback(bytes, &self.config.encodings, location)?;

        if encoding != "UTF-8" {
            tracing::warn!("{} is not UTF-8; decoded as {}", location, encoding);
        }

        let dataset = parse_csv(&text)?.with_encoding(encoding);

        if dataset.is_empty() {
            return Err(DatasetError::EmptyDataset {
                location: location.to_string(),
            });
        }

        Ok(dataset)
    }

    async fn fetch(&self, source: &DataSource) -> DatasetResult<Vec<u8>> {
        match source {
            DataSource::Local(path) => match tokio::fs::read(path).await {
                Ok(bytes) => Ok(bytes),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    Err(DatasetError::FileNotFound {
                        location: source.identity(),
                        reason: "no such file".to_string(),
                    })
                }
                Err(e) => Err(DatasetError::Io(e)),
            },
            DataSource::Url(url) => self.fetch_url(url).await,
        }
    }

    async fn fetch_url(&self, url: &str) -> DatasetResult<Vec<u8>> {
        let response = self.client.get(url).send().await.map_err(|e| {
            let reason = if e.is_timeout() {
                "request timed out".to_string()
            } else if e.is_connect() {
                "connection failed".to_string()
            } else {
                e.to_string()
            };
            DatasetError::FileNotFound {
                location: url.to_string(),
                reason,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DatasetError::FileNotFound {
                location: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

/// Parse CSV text with a header row
///
/// Short rows are padded with empty cells. Rows wider than the header and
/// HTML payloads (error pages served in place of a CSV) are rejected.
pub fn parse_csv(text: &str) -> DatasetResult<Dataset> {
    if looks_like_html(text) {
        return Err(DatasetError::Parse(
            "payload is an HTML document, not CSV".to_string(),
        ));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(DatasetError::Parse("missing header row".to_string()));
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (line_num, result) in reader.records().enumerate() {
        let record = result?;

        if record.len() > headers.len() {
            return Err(DatasetError::Parse(format!(
                "line {}: expected {} fields, found {}",
                line_num + 2,
                headers.len(),
                record.len()
            )));
        }

        rows.push(record.iter().map(String::from).collect());
    }

    Ok(Dataset::new(headers, rows))
}

fn looks_like_html(text: &str) -> bool {
    let head: String = text
        .trim_start()
        .chars()
        .take(64)
        .collect::<String>()
        .to_ascii_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html") || head.starts_with("<?xml")
}
