use anyhow::Context;
use letmecook_core::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration loaded from a YAML file
///
/// ```yaml
/// pipeline:
///   max_size: { width: 800, height: 800 }
///   compression: { quality: 85 }
///   enhancement: { clip_limit: 0.05, bin_count: 128 }
/// model:
///   model: gemini-1.5-flash
/// ```
///
/// The API key is never read from here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Image pre-processing settings
    pub pipeline: PipelineConfig,

    /// Remote vision model settings
    pub model: ModelConfig,
}

/// Where and how to reach the vision model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Base URL of the Generative Language API
    pub endpoint: String,

    /// Model name, e.g. "gemini-1.5-flash"
    pub model: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_secs: 60,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or defaults when no file is given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            max_width = config.pipeline.max_size.width,
            max_height = config.pipeline.max_size.height,
            model = %config.model.model,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse YAML; an empty document yields the defaults
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

/// Pipeline settings that can be overridden from the command line
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PipelineOverrides {
    /// Maximum width of the transmitted image
    #[arg(long, global = true)]
    pub max_width: Option<u32>,

    /// Maximum height of the transmitted image
    #[arg(long, global = true)]
    pub max_height: Option<u32>,

    /// JPEG quality (1-100)
    #[arg(long, global = true)]
    pub quality: Option<u8>,

    /// Contrast clip limit, fraction of tile pixels in (0, 1]
    #[arg(long, global = true)]
    pub clip_limit: Option<f32>,

    /// Histogram bins per tile
    #[arg(long, global = true)]
    pub bins: Option<u32>,
}

impl PipelineOverrides {
    /// Replace the config values for every flag that was given
    pub fn apply(&self, config: &mut PipelineConfig) {
        if let Some(width) = self.max_width {
            config.max_size.width = width;
        }
        if let Some(height) = self.max_height {
            config.max_size.height = height;
        }
        if let Some(quality) = self.quality {
            config.compression.quality = quality;
        }
        if let Some(clip_limit) = self.clip_limit {
            config.enhancement.clip_limit = clip_limit;
        }
        if let Some(bins) = self.bins {
            config.enhancement.bin_count = bins;
        }
    }
}
