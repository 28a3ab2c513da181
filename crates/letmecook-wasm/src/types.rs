//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Let Me Cook
//! types, handling the conversion between Rust and JavaScript data representations.

use letmecook_core::decode::FilterType;
use letmecook_core::{ColorMode, RasterImage};
use wasm_bindgen::prelude::*;

/// A raster image wrapper for JavaScript.
///
/// Holds 8-bit interleaved pixels. Images produced by the pipeline are RGB;
/// images built from a canvas `ImageData` are RGBA until normalized.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsRasterImage {
    inner: RasterImage,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create an RGB image from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterImage {
        Self::from_parts(width, height, ColorMode::Rgb, pixels)
    }

    /// Create an RGBA image, e.g. from `ImageData.data` of a canvas snapshot.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterImage {
        Self::from_parts(width, height, ColorMode::Rgba, pixels)
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Bytes per pixel: 1 (gray), 3 (RGB) or 4 (RGBA)
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.inner.channels() as u8
    }

    /// Color mode name: "gray", "rgb" or "rgba"
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        match self.inner.mode {
            ColorMode::Gray => "gray",
            ColorMode::Rgb => "rgb",
            ColorMode::Rgba => "rgba",
        }
        .to_string()
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Returns pixel data expanded to RGBA, ready for `new ImageData(...)`.
    pub fn to_rgba(&self) -> Vec<u8> {
        match self.inner.mode {
            ColorMode::Rgba => self.inner.pixels.clone(),
            ColorMode::Rgb => self
                .inner
                .pixels
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], 255])
                .collect(),
            ColorMode::Gray => self
                .inner
                .pixels
                .iter()
                .flat_map(|&v| [v, v, v, 255])
                .collect(),
        }
    }
}

impl JsRasterImage {
    // Buffers are not validated here; core functions check them on use.
    fn from_parts(width: u32, height: u32, mode: ColorMode, pixels: Vec<u8>) -> Self {
        Self {
            inner: RasterImage {
                width,
                height,
                mode,
                pixels,
            },
        }
    }

    pub(crate) fn from_raster(img: RasterImage) -> Self {
        Self { inner: img }
    }

    pub(crate) fn as_raster(&self) -> &RasterImage {
        &self.inner
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Lanczos3, the pipeline default.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        1 => FilterType::Bilinear,
        _ => FilterType::Lanczos3,
    }
}

/// Map any displayable error to a JavaScript string value.
pub(crate) fn to_js_error<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}
