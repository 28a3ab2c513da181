//! Let Me Cook Core - Image pre-processing and recipe analysis
//!
//! This crate turns a food photo into a compact JPEG payload for a remote
//! vision model plus a contrast-enhanced preview for the user, and holds the
//! prompt/response handling for ingredient detection and recipe suggestion.

pub mod analysis;
pub mod decode;
pub mod encode;
pub mod enhance;
pub mod normalize;
pub mod pipeline;
pub mod raster;

pub use analysis::{
    detect_ingredients, parse_ingredients, parse_recipes, suggest_recipes, AnalysisError,
    IngredientSelection, ModelError, Recipe, VisionModel,
};
pub use decode::{decode_image, resize_within, FilterType, InputError};
pub use encode::{encode_and_roundtrip, CompressionSettings, EncodedPayload, EncodingError};
pub use enhance::{enhance, EnhancementSettings, PreprocessingError};
pub use normalize::normalize;
pub use pipeline::{
    preprocess, preprocess_bytes, ConfigError, PipelineConfig, PipelineError, PreprocessOutput,
};
pub use raster::{ColorMode, RasterImage};

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check if either side is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Total pixel count
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}
