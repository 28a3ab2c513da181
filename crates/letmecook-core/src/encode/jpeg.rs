//! JPEG recompression and the encode/decode round trip.
//!
//! The payload sent to the remote model is a JPEG. The same payload is
//! decoded again so everything shown to the user afterwards carries the
//! artifacts of what was actually transmitted.

use image::ImageFormat;
use jpeg_encoder::{ColorType, Encoder};

use super::{CompressionFormat, CompressionSettings, EncodedPayload, EncodingError};
use crate::raster::{ColorMode, RasterImage};

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Quality Guidelines
///
/// * 90-100: High quality, larger uploads
/// * 80-90: Good quality, recommended for model input (default: 85)
/// * 60-80: Medium quality, small uploads with visible softening
/// * Below 60: Low quality, visible artifacts
///
/// Uses the standard Huffman tables; see [`encode_image`] for optimized ones.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodingError> {
    encode_pixels(pixels, width, height, ColorMode::Rgb, quality, false)
}

/// Encode a Gray or RGB image with the given settings.
///
/// With `settings.optimize` the Huffman tables are built from the image's own
/// symbol statistics, which shrinks the payload without touching pixel data.
///
/// # Errors
///
/// `Rgba` images are rejected with `EncodingError::UnsupportedColorMode`;
/// run the normalizer first.
pub fn encode_image(
    image: &RasterImage,
    settings: &CompressionSettings,
) -> Result<EncodedPayload, EncodingError> {
    settings.validate()?;

    let bytes = match settings.format {
        CompressionFormat::Jpeg => encode_pixels(
            &image.pixels,
            image.width,
            image.height,
            image.mode,
            settings.quality,
            settings.optimize,
        )?,
    };

    tracing::debug!(
        width = image.width,
        height = image.height,
        quality = settings.quality,
        optimize = settings.optimize,
        bytes = bytes.len(),
        "Encoded payload"
    );
    Ok(EncodedPayload::new(bytes, settings.format))
}

/// Decode an encoded payload back into a raster image.
pub fn decode_payload(payload: &EncodedPayload) -> Result<RasterImage, EncodingError> {
    let format = match payload.format() {
        CompressionFormat::Jpeg => ImageFormat::Jpeg,
    };
    let decoded = image::load_from_memory_with_format(payload.as_bytes(), format)
        .map_err(|e| EncodingError::DecodingFailed(e.to_string()))?;
    Ok(RasterImage::from_dynamic(decoded))
}

/// Encode an image and immediately decode the result.
///
/// Returns the payload for transport together with the image exactly as the
/// receiver will see it. Dimensions and channel count are preserved; pixel
/// values carry the codec's lossy artifacts.
pub fn encode_and_roundtrip(
    image: &RasterImage,
    settings: &CompressionSettings,
) -> Result<(EncodedPayload, RasterImage), EncodingError> {
    let payload = encode_image(image, settings)?;
    let decoded = decode_payload(&payload)?;

    if decoded.width != image.width || decoded.height != image.height {
        return Err(EncodingError::DecodingFailed(format!(
            "round trip changed dimensions from {}x{} to {}x{}",
            image.width, image.height, decoded.width, decoded.height
        )));
    }

    Ok((payload, decoded))
}

fn encode_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    mode: ColorMode,
    quality: u8,
    optimize: bool,
) -> Result<Vec<u8>, EncodingError> {
    if width == 0 || height == 0 {
        return Err(EncodingError::InvalidDimensions { width, height });
    }

    // JPEG frame headers store each side in 16 bits
    let (Ok(frame_width), Ok(frame_height)) = (u16::try_from(width), u16::try_from(height))
    else {
        return Err(EncodingError::InvalidDimensions { width, height });
    };

    if !(1..=100).contains(&quality) {
        return Err(EncodingError::InvalidQuality(quality));
    }

    let color_type = match mode {
        ColorMode::Gray => ColorType::Luma,
        ColorMode::Rgb => ColorType::Rgb,
        ColorMode::Rgba => return Err(EncodingError::UnsupportedColorMode(mode)),
    };

    let expected_len = (width as usize) * (height as usize) * mode.channels();
    if pixels.len() != expected_len {
        return Err(EncodingError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Vec::new();
    let mut encoder = Encoder::new(&mut buffer, quality);
    encoder.set_optimized_huffman_tables(optimize);

    encoder
        .encode(pixels, frame_width, frame_height, color_type)
        .map_err(|e| EncodingError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
