//! Full pre-processing pipeline WASM bindings.
//!
//! One call turns an uploaded or captured photo into the JPEG payload for the
//! vision model plus the preview shown to the user.
//!
//! # Example
//!
//! ```typescript
//! import { preprocess_image } from '@letmecook/wasm';
//!
//! const result = preprocess_image(bytes, { max_size: { width: 800, height: 800 } });
//! const preview = result.display();
//! ctx.putImageData(new ImageData(new Uint8ClampedArray(preview.to_rgba()), preview.width), 0, 0);
//! if (!result.is_enhanced) console.warn(result.enhancement_error);
//! ```

use crate::types::{to_js_error, JsRasterImage};
use letmecook_core::{pipeline, PipelineConfig, PreprocessOutput};
use wasm_bindgen::prelude::*;

/// Result of one pipeline run.
#[wasm_bindgen]
pub struct JsPreprocessResult {
    payload: Vec<u8>,
    mime_type: &'static str,
    compressed: JsRasterImage,
    enhanced: Option<JsRasterImage>,
    enhancement_error: Option<String>,
}

#[wasm_bindgen]
impl JsPreprocessResult {
    /// Compressed bytes to send to the model (copied to a `Uint8Array`).
    pub fn payload(&self) -> Vec<u8> {
        self.payload.clone()
    }

    /// MIME type of the payload, e.g. "image/jpeg".
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.to_string()
    }

    /// The resized, normalized image as decoded from the payload.
    pub fn compressed(&self) -> JsRasterImage {
        self.compressed.clone()
    }

    /// The contrast-enhanced image, or `undefined` if enhancement failed.
    pub fn enhanced(&self) -> Option<JsRasterImage> {
        self.enhanced.clone()
    }

    /// The image to show: enhanced when available, compressed otherwise.
    pub fn display(&self) -> JsRasterImage {
        self.enhanced
            .as_ref()
            .unwrap_or(&self.compressed)
            .clone()
    }

    /// Returns true if the enhanced image is available.
    #[wasm_bindgen(getter)]
    pub fn is_enhanced(&self) -> bool {
        self.enhanced.is_some()
    }

    /// Why enhancement was skipped, if it was.
    #[wasm_bindgen(getter)]
    pub fn enhancement_error(&self) -> Option<String> {
        self.enhancement_error.clone()
    }
}

impl From<PreprocessOutput> for JsPreprocessResult {
    fn from(output: PreprocessOutput) -> Self {
        let (enhanced, enhancement_error) = match output.enhanced {
            Ok(img) => (Some(JsRasterImage::from_raster(img)), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            mime_type: output.payload.mime_type(),
            payload: output.payload.into_bytes(),
            compressed: JsRasterImage::from_raster(output.compressed),
            enhanced,
            enhancement_error,
        }
    }
}

/// Run the pipeline on PNG/JPEG bytes.
///
/// `options` is an optional object shaped like the pipeline config
/// (`max_size`, `filter`, `compression`, `enhancement`); omitted fields use
/// their defaults.
///
/// # Errors
///
/// Returns an error for invalid options, undecodable input, or a failed
/// encode round trip. A failed enhancement is not an error; check
/// `is_enhanced` instead.
#[wasm_bindgen]
pub fn preprocess_image(bytes: &[u8], options: JsValue) -> Result<JsPreprocessResult, JsValue> {
    let config = config_from_js(options)?;
    let output = pipeline::preprocess_bytes(bytes, &config).map_err(to_js_error)?;
    Ok(finish(output))
}

/// Run the pipeline on an already decoded image (e.g. a camera frame).
#[wasm_bindgen]
pub fn preprocess_raster(
    image: &JsRasterImage,
    options: JsValue,
) -> Result<JsPreprocessResult, JsValue> {
    let config = config_from_js(options)?;
    let output = pipeline::preprocess(image.as_raster(), &config).map_err(to_js_error)?;
    Ok(finish(output))
}

/// The default pipeline options as a plain object.
#[wasm_bindgen]
pub fn default_options() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&PipelineConfig::default()).map_err(to_js_error)
}

fn config_from_js(options: JsValue) -> Result<PipelineConfig, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(PipelineConfig::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(to_js_error)
}

fn finish(output: PreprocessOutput) -> JsPreprocessResult {
    let result = JsPreprocessResult::from(output);
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(reason) = &result.enhancement_error {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "Contrast enhancement skipped: {reason}"
            )));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use letmecook_core::{preprocess, ColorMode, RasterImage};

    #[test]
    fn test_result_from_enhanced_output() {
        let img = RasterImage::filled(64, 48, ColorMode::Rgb, &[90, 120, 60]);
        let output = preprocess(&img, &PipelineConfig::default()).unwrap();
        let result = JsPreprocessResult::from(output);

        assert!(result.is_enhanced());
        assert!(result.enhancement_error().is_none());
        assert_eq!(result.mime_type(), "image/jpeg");
        assert_eq!(&result.payload()[..2], &[0xFF, 0xD8]);
        assert_eq!(result.display().width(), 64);
        assert_eq!(result.compressed().height(), 48);
    }

    #[test]
    fn test_result_from_fallback_output() {
        let img = RasterImage::filled(1, 1, ColorMode::Rgb, &[90, 120, 60]);
        let output = preprocess(&img, &PipelineConfig::default()).unwrap();
        let result = JsPreprocessResult::from(output);

        assert!(!result.is_enhanced());
        assert!(result.enhanced().is_none());
        assert!(result.enhancement_error().is_some());
        assert_eq!(result.display().pixels(), result.compressed().pixels());
    }
}
