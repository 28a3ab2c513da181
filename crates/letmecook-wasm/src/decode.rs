//! Image decoding and resizing WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a PNG or JPEG upload, applying EXIF orientation
//! - [`resize`] - Resize an image to exact dimensions
//! - [`resize_within`] - Shrink an image into a bounding box, never enlarging
//! - [`normalize`] - Convert any image to 3-channel RGB
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, resize_within, normalize } from '@letmecook/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const small = normalize(resize_within(image, 800, 800, 2));
//! console.log(`Working copy: ${small.width}x${small.height}`);
//! ```

use crate::types::{filter_from_u8, to_js_error, JsRasterImage};
use letmecook_core::{decode, normalize as core_normalize, Dimensions};
use wasm_bindgen::prelude::*;

/// Decode a PNG or JPEG image from bytes.
///
/// JPEG EXIF orientation is applied so phone photos come out upright.
/// PNG alpha is kept; use [`normalize`] to drop it.
///
/// # Errors
///
/// Returns an error if the bytes are empty, not a recognizable image, or
/// corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Resize algorithm: 0=Nearest, 1=Bilinear, 2=Lanczos3 (default)
///
/// # Errors
///
/// Returns an error if width or height is zero.
#[wasm_bindgen]
pub fn resize(
    image: &JsRasterImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsRasterImage, JsValue> {
    decode::resize(image.as_raster(), width, height, filter_from_u8(filter))
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Shrink an image to fit within `max_width` x `max_height`.
///
/// Landscape images are bounded by width, all others by height; the other
/// side follows the aspect ratio. Images already inside the box are
/// returned unchanged.
///
/// # Example
///
/// ```typescript
/// const small = resize_within(image, 800, 800, 2);
/// ```
#[wasm_bindgen]
pub fn resize_within(
    image: &JsRasterImage,
    max_width: u32,
    max_height: u32,
    filter: u8,
) -> Result<JsRasterImage, JsValue> {
    decode::resize_within(
        image.as_raster(),
        Dimensions::new(max_width, max_height),
        filter_from_u8(filter),
    )
    .map(JsRasterImage::from_raster)
    .map_err(to_js_error)
}

/// Convert an image to RGB: alpha is dropped and gray is replicated.
///
/// # Errors
///
/// Returns an error if the pixel buffer does not match the dimensions.
#[wasm_bindgen]
pub fn normalize(image: &JsRasterImage) -> Result<JsRasterImage, JsValue> {
    core_normalize(image.as_raster())
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use letmecook_core::{ColorMode, RasterImage};

    #[test]
    fn test_core_normalize_rgba_canvas_data() {
        let img = JsRasterImage::from_rgba(2, 1, vec![10, 20, 30, 0, 40, 50, 60, 255]);
        let out = JsRasterImage::from_raster(core_normalize(img.as_raster()).unwrap());
        assert_eq!(out.mode(), "rgb");
        assert_eq!(out.pixels(), vec![10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_core_normalize_gray() {
        let img = JsRasterImage::from_raster(RasterImage::filled(3, 1, ColorMode::Gray, &[7]));
        let out = JsRasterImage::from_raster(core_normalize(img.as_raster()).unwrap());
        assert_eq!(out.channels(), 3);
        assert_eq!(out.pixels(), vec![7; 9]);
    }

    #[test]
    fn test_core_normalize_rejects_short_canvas_data() {
        let img = JsRasterImage::from_rgba(2, 2, vec![0; 15]);
        assert!(core_normalize(img.as_raster()).is_err());
    }
}
