//! Configuration file support

use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use topictile_core::{
    CachedEmbedder, DatasetSelector, Embedder, EvenSpacing, HashingEmbedder, SegmentationConfig,
    TilingParams,
};

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// TextTiling hyperparameters
    #[serde(default)]
    pub segmentation: TilingParams,

    /// EVEN baseline spacing
    #[serde(default)]
    pub even: EvenSpacing,

    /// Embedding backend configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Per-dataset overrides, keyed by dataset name
    #[serde(default)]
    pub datasets: BTreeMap<String, DatasetOverride>,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Settings that differ between datasets
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatasetOverride {
    /// Depth threshold tuned for this dataset
    pub threshold: Option<f64>,
}

/// Embedding backends selectable from the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Offline hashed bag of words
    #[default]
    Hashing,
    /// Sentence-transformer models through fastembed
    Fastembed,
}

/// Embedding-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Backend to use
    pub backend: EmbeddingBackend,

    /// Model name for the fastembed backend
    pub model: String,

    /// Vector length for the hashing backend
    pub dimensions: usize,

    /// Model download directory for the fastembed backend
    pub cache_dir: Option<PathBuf>,

    /// Extra attempts after a failed backend call
    pub retries: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::Hashing,
            model: "all-MiniLM-L6-v2".to_string(),
            dimensions: 256,
            cache_dir: None,
            retries: 2,
        }
    }
}

impl EmbeddingConfig {
    /// Build the configured backend wrapped in a cache
    pub fn build(&self) -> Result<Arc<dyn Embedder>> {
        let attempts = self.retries + 1;
        match self.backend {
            EmbeddingBackend::Hashing => {
                let backend = HashingEmbedder::new(self.dimensions)
                    .context("Failed to create hashing embedder")?;
                Ok(Arc::new(CachedEmbedder::new(backend).with_attempts(attempts)))
            }
            #[cfg(feature = "fastembed")]
            EmbeddingBackend::Fastembed => {
                let cache_dir = self
                    .cache_dir
                    .clone()
                    .unwrap_or_else(|| std::env::temp_dir().join("topictile-models"));
                log::info!("Loading embedding model {} from {}", self.model, cache_dir.display());
                let backend = topictile_core::FastEmbedder::new(&self.model, cache_dir)
                    .with_context(|| format!("Failed to load embedding model {}", self.model))?;
                Ok(Arc::new(CachedEmbedder::new(backend).with_attempts(attempts)))
            }
            #[cfg(not(feature = "fastembed"))]
            EmbeddingBackend::Fastembed => {
                Err(CliError::BackendUnavailable("fastembed".to_string()).into())
            }
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            pretty_json: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: CliConfig = toml::from_str(content)?;
        for name in config.datasets.keys() {
            name.parse::<DatasetSelector>()
                .map_err(|e| CliError::ConfigError(e.to_string()))?;
        }
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Segmentation configuration for a dataset, overrides applied
    pub fn segmentation_for(&self, dataset: DatasetSelector) -> Result<SegmentationConfig> {
        let mut tiling = self.segmentation.clone();
        if let Some(threshold) = self
            .datasets
            .get(dataset.name())
            .and_then(|o| o.threshold)
        {
            log::debug!("Using {dataset} threshold override {threshold}");
            tiling.threshold = threshold;
        }

        let config = SegmentationConfig {
            tiling,
            even: self.even,
        };
        config
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(config)
    }

    /// Commented configuration template with every option at its default
    pub fn template() -> String {
        let defaults = TilingParams::default();
        let embedding = EmbeddingConfig::default();
        format!(
            r#"# topictile configuration

# TextTiling hyperparameters
[segmentation]
# Groups on each side of a gap compared for similarity
comparison_window = {comparison_window}
# Half-width of the moving-average smoothing window (0 disables smoothing)
smoothing_window = {smoothing_window}
# Number of smoothing passes
smoothing_passes = {smoothing_passes}
# Normalised depth a gap must exceed to become a boundary
threshold = {threshold:?}
# Depth normalisation: "max" or "z_score"
normalization = "max"

# Boundary cap: "disabled", "fixed" (max_boundaries = N)
# or "average_length" (groups_per_segment = N)
[segmentation.cap]
mode = "disabled"

# EVEN baseline: segment_count = N or interval = N
[even]
segment_count = 5

[embedding]
# "hashing" (offline) or "fastembed" (requires the fastembed feature)
backend = "hashing"
model = "{model}"
dimensions = {dimensions}
# cache_dir = "/path/to/models"
retries = {retries}

# Per-dataset threshold overrides
# [datasets.ami]
# threshold = 0.6

[output]
# "text", "json" or "markdown"
format = "text"
pretty_json = true

[performance]
# Number of worker threads (0 = auto)
worker_threads = 0
"#,
            comparison_window = defaults.comparison_window,
            smoothing_window = defaults.smoothing_window,
            smoothing_passes = defaults.smoothing_passes,
            threshold = defaults.threshold,
            model = embedding.model,
            dimensions = embedding.dimensions,
            retries = embedding.retries,
        )
    }
}
