//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::analysis::AnalysisConfig;
use crate::dataset::{LoaderConfig, MbtiColumns, MenuColumns, DEFAULT_ENCODINGS};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default dataset: the national hospital therapeutic-diet menu export
pub const DEFAULT_SOURCE: &str = "보건복지부 국립나주병원_치료식 식단 정보_20250331.csv";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub columns: ColumnsConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    /// Free-text insight shown under the chart, keyed by category
    #[serde(default = "default_commentary")]
    pub commentary: BTreeMap<String, String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the dataset comes from and how to decode it
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Local path or HTTP(S) URL
    #[serde(default = "default_location")]
    pub location: String,

    /// Encoding labels to try, in order
    #[serde(default = "default_encodings")]
    pub encodings: Vec<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_location() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_encodings() -> Vec<String> {
    DEFAULT_ENCODINGS.iter().map(|s| s.to_string()).collect()
}

fn default_timeout() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            encodings: default_encodings(),
            timeout_secs: default_timeout(),
        }
    }
}

impl SourceConfig {
    /// Loader settings derived from this section
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            encodings: self.encodings.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Column layouts for both dashboards
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnsConfig {
    #[serde(default)]
    pub menu: MenuColumns,

    #[serde(default)]
    pub mbti: MbtiColumns,
}

/// Chart and table settings
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_top_n_min")]
    pub top_n_min: usize,

    #[serde(default = "default_top_n_max")]
    pub top_n_max: usize,

    #[serde(default = "default_top_n")]
    pub top_n_default: usize,

    /// Width of the longest bar, in terminal cells
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,

    /// Rows shown by the dataset preview
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

fn default_top_n_min() -> usize {
    5
}

fn default_top_n_max() -> usize {
    30
}

fn default_top_n() -> usize {
    15
}

fn default_bar_width() -> usize {
    40
}

fn default_preview_rows() -> usize {
    5
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top_n_min: default_top_n_min(),
            top_n_max: default_top_n_max(),
            top_n_default: default_top_n(),
            bar_width: default_bar_width(),
            preview_rows: default_preview_rows(),
        }
    }
}

impl DisplayConfig {
    /// Clamp a requested top-N into the configured range
    pub fn clamp_top_n(&self, requested: Option<usize>) -> usize {
        let wanted = requested.unwrap_or(self.top_n_default);
        let clamped = wanted.clamp(self.top_n_min, self.top_n_max);
        if clamped != wanted {
            tracing::warn!(
                "Top-N {} is outside {}..={}, using {}",
                wanted,
                self.top_n_min,
                self.top_n_max,
                clamped
            );
        }
        clamped
    }
}

fn default_commentary() -> BTreeMap<String, String> {
    [
        (
            "일반식",
            "일반식에서는 포기김치, 백김치, 깍두기 같은 김치류와 메추리알장조림 같은 기본 밑반찬이 자주 제공됩니다.",
        ),
        (
            "당뇨식",
            "당뇨식에서도 기본 김치류와 함께 멸치볶음, 오이생채 등 저염/채소 위주의 밑반찬이 높은 빈도를 보입니다.",
        ),
        (
            "연식",
            "연식에서는 백김치가 가장 많고, 들깨나물, 애호박나물 등 부드러운 나물류와 소화가 쉬운 메뉴가 주를 이룹니다.",
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        for path in Self::default_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Candidate config file locations, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("mealscope").join("config.toml")),
            Some(PathBuf::from("./mealscope.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.display;
        if d.top_n_min == 0 || d.top_n_min > d.top_n_max {
            return Err(ConfigError::Invalid(format!(
                "display.top_n_min ({}) must be between 1 and top_n_max ({})",
                d.top_n_min, d.top_n_max
            )));
        }
        if !(d.top_n_min..=d.top_n_max).contains(&d.top_n_default) {
            return Err(ConfigError::Invalid(format!(
                "display.top_n_default ({}) must be within {}..={}",
                d.top_n_default, d.top_n_min, d.top_n_max
            )));
        }
        if self.columns.menu.slots.is_empty() {
            return Err(ConfigError::Invalid(
                "columns.menu.slots must name at least one column".to_string(),
            ));
        }
        if self.source.encodings.is_empty() {
            return Err(ConfigError::Invalid(
                "source.encodings must list at least one encoding".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(location) = std::env::var("MEALSCOPE_SOURCE") {
            self.source.location = location;
        }
        if let Ok(encodings) = std::env::var("MEALSCOPE_ENCODINGS") {
            let labels: Vec<String> = encodings
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !labels.is_empty() {
                self.source.encodings = labels;
            }
        }

        if let Ok(level) = std::env::var("MEALSCOPE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("MEALSCOPE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            columns: ColumnsConfig::default(),
            analysis: AnalysisConfig::default(),
            display: DisplayConfig::default(),
            commentary: default_commentary(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Mealscope Configuration
#
# Environment variables override these settings:
# - MEALSCOPE_SOURCE
# - MEALSCOPE_ENCODINGS (comma-separated)
# - MEALSCOPE_LOG_LEVEL
# - MEALSCOPE_LOG_FORMAT

[source]
# Local path or http(s) URL of the CSV dataset
location = "보건복지부 국립나주병원_치료식 식단 정보_20250331.csv"

# Encodings to try, in order
encodings = ["utf-8", "euc-kr"]

# HTTP timeout in seconds
timeout_secs = 30

[columns.menu]
# Diet category column
category = "식이구분"

# Meal-slot columns (breakfast, lunch, dinner)
slots = ["조식", "중식", "석식"]

# Date column for the data period summary
date = "날짜"

[columns.mbti]
# Row label column; every other column is a type
label = "Country"

[analysis]
# Character joining items inside a meal cell
delimiter = "+"

# Normalized items never counted (staples). Add kimchi varieties here to
# focus on side dishes, e.g. "포기김치", "배추김치", "깍두기".
exclude = ["쌀밥", "잡곡밥", "보리밥", "흑미밥", "흰죽", "쌀죽", "야채죽", "새우살죽", "흑임자죽"]

# Items shorter than this many characters are discarded
min_item_chars = 2

[display]
# Range and default of the top-N selector
top_n_min = 5
top_n_max = 30
top_n_default = 15

# Width of the longest chart bar
bar_width = 40

# Rows shown by `mealscope summary`
preview_rows = 5

[commentary]
# Insight text shown under the chart, keyed by category
"일반식" = "일반식에서는 포기김치, 백김치, 깍두기 같은 김치류와 메추리알장조림 같은 기본 밑반찬이 자주 제공됩니다."
"당뇨식" = "당뇨식에서도 기본 김치류와 함께 멸치볶음, 오이생채 등 저염/채소 위주의 밑반찬이 높은 빈도를 보입니다."
"연식" = "연식에서는 백김치가 가장 많고, 들깨나물, 애호박나물 등 부드러운 나물류와 소화가 쉬운 메뉴가 주를 이룹니다."

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
