//! Image resizing for the transmission-sized working copy.
//!
//! All functions return new `RasterImage` instances without modifying the input.

use super::{FilterType, InputError};
use crate::raster::RasterImage;
use crate::Dimensions;

/// Resize an image to exact dimensions, keeping its color mode.
///
/// # Errors
///
/// Returns `InputError::InvalidDimensions` if a target dimension is zero and
/// `InputError::PixelBufferMismatch` if the source buffer is inconsistent.
pub fn resize(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterImage, InputError> {
    if width == 0 || height == 0 {
        return Err(InputError::InvalidDimensions { width, height });
    }

    image.validate()?;

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let dynamic = image.to_dynamic().ok_or(InputError::PixelBufferMismatch {
        expected: image.pixel_count() * image.channels(),
        actual: image.pixels.len(),
    })?;

    let resized = dynamic.resize_exact(width, height, filter.to_image_filter());
    Ok(RasterImage::from_dynamic(resized))
}

/// Shrink an image into a bounding box while preserving its aspect ratio.
///
/// The image is never enlarged: when it already fits, the computed size
/// equals the source size and a copy is returned without resampling.
///
/// # Errors
///
/// Returns `InputError::InvalidDimensions` for an empty source image or a
/// bounding box with a zero component.
pub fn resize_within(
    image: &RasterImage,
    max_size: Dimensions,
    filter: FilterType,
) -> Result<RasterImage, InputError> {
    if image.width == 0 || image.height == 0 {
        return Err(InputError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }
    if max_size.is_empty() {
        return Err(InputError::InvalidDimensions {
            width: max_size.width,
            height: max_size.height,
        });
    }

    let target = fit_dimensions(image.width, image.height, max_size);
    tracing::debug!(
        from_width = image.width,
        from_height = image.height,
        to_width = target.width,
        to_height = target.height,
        "Resizing to bounding box"
    );

    resize(image, target.width, target.height, filter)
}

/// Calculate the size of an image shrunk into `max_size`.
///
/// The longer side is clamped to its own bound (width for landscape, height
/// for portrait and square images) and the other side is derived from the
/// aspect ratio, rounded to the nearest pixel and never below 1.
pub fn fit_dimensions(width: u32, height: u32, max_size: Dimensions) -> Dimensions {
    if width == 0 || height == 0 {
        return Dimensions::new(0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width > height {
        // Landscape: constrain by width
        let new_width = width.min(max_size.width);
        let new_height = (new_width as f64 / ratio).round() as u32;
        Dimensions::new(new_width, new_height.max(1))
    } else {
        // Portrait or square: constrain by height
        let new_height = height.min(max_size.height);
        let new_width = (new_height as f64 * ratio).round() as u32;
        Dimensions::new(new_width.max(1), new_height)
    }
}
