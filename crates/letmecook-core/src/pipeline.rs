//! The pre-processing pipeline entry point.
//!
//! Stages run strictly in order: resize, normalize, encode round trip,
//! enhance. The first three are required for transmission and abort the
//! invocation on failure. Enhancement only feeds the display, so its failure
//! is carried in the output instead of failing the whole call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{decode_image, resize_within, FilterType, InputError};
use crate::encode::{encode_and_roundtrip, CompressionSettings, EncodedPayload, EncodingError};
use crate::enhance::{enhance, EnhancementSettings, PreprocessingError};
use crate::normalize::normalize;
use crate::raster::RasterImage;
use crate::Dimensions;

/// Default bounding box for the transmitted image.
pub const DEFAULT_MAX_SIZE: Dimensions = Dimensions::new(800, 800);

/// Invalid pipeline configuration, detected before any stage runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_size must be positive, got {width}x{height}")]
    InvalidMaxSize { width: u32, height: u32 },

    #[error("Invalid compression settings: {0}")]
    Compression(#[source] EncodingError),

    #[error("Invalid enhancement settings: {0}")]
    Enhancement(#[source] PreprocessingError),
}

/// Errors that void a pipeline invocation.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Everything the pipeline needs, with documented defaults.
///
/// Every field falls back to its default when omitted from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Bounding box for the transmitted image (default 800x800).
    pub max_size: Dimensions,
    /// Resampling filter used when shrinking (default Lanczos3).
    pub filter: FilterType,
    /// Recompression settings (default JPEG, quality 85, optimize).
    pub compression: CompressionSettings,
    /// Contrast enhancement settings (default clip 0.05, 128 bins, 8x8 tiles).
    pub enhancement: EnhancementSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            filter: FilterType::default(),
            compression: CompressionSettings::default(),
            enhancement: EnhancementSettings::default(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_size.is_empty() {
            return Err(ConfigError::InvalidMaxSize {
                width: self.max_size.width,
                height: self.max_size.height,
            });
        }
        self.compression
            .validate()
            .map_err(ConfigError::Compression)?;
        self.enhancement
            .validate()
            .map_err(ConfigError::Enhancement)?;
        Ok(())
    }
}

/// Result of one pipeline invocation.
#[derive(Debug)]
pub struct PreprocessOutput {
    /// Compressed bytes for the remote model.
    pub payload: EncodedPayload,
    /// The resized, normalized image as decoded from `payload`.
    pub compressed: RasterImage,
    /// The contrast-enhanced display image, or why it is unavailable.
    pub enhanced: Result<RasterImage, PreprocessingError>,
}

impl PreprocessOutput {
    /// Image to show the user: the enhanced one, or the compressed one when
    /// enhancement failed.
    pub fn display_image(&self) -> &RasterImage {
        self.enhanced.as_ref().unwrap_or(&self.compressed)
    }

    /// Returns true if the enhanced image is available.
    pub fn is_enhanced(&self) -> bool {
        self.enhanced.is_ok()
    }
}

/// Run the full pipeline on a decoded image.
///
/// # Errors
///
/// Returns `PipelineError::Config` for invalid settings, `PipelineError::Input`
/// for an invalid source image and `PipelineError::Encoding` if the codec round
/// trip fails. Enhancement failures never produce an error here.
pub fn preprocess(
    image: &RasterImage,
    config: &PipelineConfig,
) -> Result<PreprocessOutput, PipelineError> {
    config.validate()?;
    image.validate()?;

    let resized = resize_within(image, config.max_size, config.filter)?;
    let normalized = normalize(&resized)?;
    let (payload, compressed) = encode_and_roundtrip(&normalized, &config.compression)?;

    let enhanced = enhance(&compressed, &config.enhancement);
    if let Err(e) = &enhanced {
        tracing::warn!(%e, "Contrast enhancement failed, showing unenhanced image");
    }

    tracing::info!(
        source_width = image.width,
        source_height = image.height,
        width = compressed.width,
        height = compressed.height,
        payload_bytes = payload.len(),
        enhanced = enhanced.is_ok(),
        "Pre-processed image"
    );

    Ok(PreprocessOutput {
        payload,
        compressed,
        enhanced,
    })
}

/// Decode PNG/JPEG bytes and run the full pipeline.
pub fn preprocess_bytes(
    bytes: &[u8],
    config: &PipelineConfig,
) -> Result<PreprocessOutput, PipelineError> {
    config.validate()?;
    let image = decode_image(bytes)?;
    preprocess(&image, config)
}
