//! Local contrast enhancement for display.
//!
//! Applies CLAHE to the value channel of an RGB image. Hue and saturation
//! are kept, so food colors stay recognizable while dim or washed-out
//! regions gain local contrast.
//!
//! Enhancement is a display nicety: its failures are reported as
//! [`PreprocessingError`] and the pipeline keeps the unenhanced image.

mod clahe;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::raster::{ColorMode, RasterImage};
use crate::Dimensions;

/// Default clip limit as a fraction of the per-bin maximum.
pub const DEFAULT_CLIP_LIMIT: f32 = 0.05;
/// Default number of histogram bins per tile.
pub const DEFAULT_BIN_COUNT: u32 = 128;
/// Default tile grid: each tile covers an eighth of the image per axis.
pub const DEFAULT_TILE_GRID: Dimensions = Dimensions::new(8, 8);

/// Errors raised by the contrast enhancer.
#[derive(Debug, Error)]
pub enum PreprocessingError {
    /// The image has fewer pixels than tiles along an axis (1x1 images included).
    #[error("Image {width}x{height} is too small for a {tiles_x}x{tiles_y} tile grid")]
    DegenerateImage {
        width: u32,
        height: u32,
        tiles_x: u32,
        tiles_y: u32,
    },

    /// Enhancement settings are out of range.
    #[error("Invalid enhancement settings: {0}")]
    InvalidSettings(String),

    /// Only RGB images are enhanced.
    #[error("Unsupported color mode for enhancement: {0:?}")]
    UnsupportedColorMode(ColorMode),

    /// Pixel buffer length does not match the dimensions.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// Settings for contrast-limited adaptive histogram equalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancementSettings {
    /// Clip level as a fraction of a tile's pixel count, in (0, 1].
    /// Higher values allow stronger contrast.
    pub clip_limit: f32,
    /// Number of histogram bins per tile.
    pub bin_count: u32,
    /// Number of tiles across (width) and down (height).
    pub tile_grid: Dimensions,
}

impl Default for EnhancementSettings {
    fn default() -> Self {
        Self {
            clip_limit: DEFAULT_CLIP_LIMIT,
            bin_count: DEFAULT_BIN_COUNT,
            tile_grid: DEFAULT_TILE_GRID,
        }
    }
}

impl EnhancementSettings {
    pub fn validate(&self) -> Result<(), PreprocessingError> {
        if !(self.clip_limit > 0.0 && self.clip_limit <= 1.0) {
            return Err(PreprocessingError::InvalidSettings(format!(
                "clip_limit must be in (0, 1], got {}",
                self.clip_limit
            )));
        }
        if self.bin_count == 0 {
            return Err(PreprocessingError::InvalidSettings(
                "bin_count must be positive".to_string(),
            ));
        }
        if self.tile_grid.is_empty() {
            return Err(PreprocessingError::InvalidSettings(format!(
                "tile grid must be positive, got {}x{}",
                self.tile_grid.width, self.tile_grid.height
            )));
        }
        Ok(())
    }
}

/// Enhance local contrast of an RGB image.
///
/// Pixels are normalized to [0,1], the HSV value channel (max of R, G, B)
/// is equalized with CLAHE, and each pixel's RGB is scaled by the ratio of
/// new to old value. Black pixels take the new value as a gray level.
/// The result is rescaled to [0,255] as a new image of the same size.
pub fn enhance(
    image: &RasterImage,
    settings: &EnhancementSettings,
) -> Result<RasterImage, PreprocessingError> {
    settings.validate()?;

    if image.mode != ColorMode::Rgb {
        return Err(PreprocessingError::UnsupportedColorMode(image.mode));
    }

    let expected = image.pixel_count() * 3;
    if image.pixels.len() != expected {
        return Err(PreprocessingError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    let grid = settings.tile_grid;
    if image.width < grid.width || image.height < grid.height {
        return Err(PreprocessingError::DegenerateImage {
            width: image.width,
            height: image.height,
            tiles_x: grid.width,
            tiles_y: grid.height,
        });
    }

    let rgb: Vec<f32> = image.pixels.iter().map(|&v| v as f32 / 255.0).collect();
    let value: Vec<f32> = rgb
        .chunks_exact(3)
        .map(|px| px[0].max(px[1]).max(px[2]))
        .collect();

    let equalized = clahe::equalize(
        &value,
        image.width as usize,
        image.height as usize,
        settings,
    );

    let mut pixels = Vec::with_capacity(image.pixels.len());
    for (px, (&old_v, &new_v)) in rgb.chunks_exact(3).zip(value.iter().zip(&equalized)) {
        if old_v > 0.0 {
            let scale = new_v / old_v;
            pixels.extend(px.iter().map(|&c| to_u8(c * scale)));
        } else {
            let gray = to_u8(new_v);
            pixels.extend([gray, gray, gray]);
        }
    }

    tracing::debug!(
        width = image.width,
        height = image.height,
        clip_limit = settings.clip_limit,
        bins = settings.bin_count,
        "Applied adaptive contrast enhancement"
    );
    Ok(RasterImage::new(
        image.width,
        image.height,
        ColorMode::Rgb,
        pixels,
    ))
}

#[inline]
fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}
