//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_jpeg`] - Encode RGB pixel data to JPEG bytes
//! - [`encode_jpeg_from_image`] - Encode a JsRasterImage to JPEG bytes
//!
//! # Example
//!
//! ```typescript
//! import { encode_jpeg_from_image } from '@letmecook/wasm';
//!
//! const jpeg = encode_jpeg_from_image(normalized, 85);
//! await fetch('/upload', { method: 'POST', body: new Blob([jpeg], { type: 'image/jpeg' }) });
//! ```

use crate::types::{to_js_error, JsRasterImage};
use letmecook_core::encode::{self, CompressionSettings};
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data as a `Uint8Array` (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, default for model uploads: 85)
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 3
/// - Width or height is zero
/// - Quality is outside 1-100
#[wasm_bindgen]
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(to_js_error)
}

/// Encode a JsRasterImage to JPEG bytes.
///
/// Gray and RGB images are accepted; RGBA must be normalized first.
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsRasterImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_image(image.as_raster(), &CompressionSettings::with_quality(quality))
        .map(|payload| payload.into_bytes())
        .map_err(to_js_error)
}


/// WASM-specific tests that require JsValue.
///
/// These tests use functions that return `Result<T, JsValue>` and can only
/// run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_jpeg_basic() {
        let pixels = vec![128u8; 100 * 100 * 3];
        let jpeg = encode_jpeg(&pixels, 100, 100, 85).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_invalid_dimensions() {
        let pixels = vec![128u8; 100];
        assert!(encode_jpeg(&pixels, 0, 100, 85).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let pixels = vec![128u8; 50 * 50 * 3];
        assert!(encode_jpeg(&pixels, 100, 100, 85).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_from_image() {
        let img = JsRasterImage::new(50, 50, vec![128u8; 50 * 50 * 3]);
        let jpeg = encode_jpeg_from_image(&img, 85).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_from_rgba_errors() {
        let img = JsRasterImage::from_rgba(2, 2, vec![0u8; 16]);
        assert!(encode_jpeg_from_image(&img, 85).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_zero_quality_errors() {
        let img = JsRasterImage::new(4, 4, vec![0u8; 48]);
        assert!(encode_jpeg_from_image(&img, 0).is_err());
    }
}
