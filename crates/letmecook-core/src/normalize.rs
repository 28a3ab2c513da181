//! Color mode normalization.
//!
//! JPEG has no alpha channel and the contrast enhancer works on RGB, so every
//! image is brought to three channels before encoding.

use crate::decode::InputError;
use crate::raster::{ColorMode, RasterImage};

/// Convert an image to `Rgb`.
///
/// - `Rgba`: the alpha channel is dropped, color values are kept as stored.
/// - `Gray`: the luma value is replicated into all three channels.
/// - `Rgb`: returned as a copy.
///
/// Idempotent: normalizing an already normalized image is a no-op.
///
/// # Errors
///
/// Returns an error if the image has a zero dimension or its buffer length
/// does not match `width * height * channels`.
pub fn normalize(image: &RasterImage) -> Result<RasterImage, InputError> {
    image.validate()?;

    let pixels = match image.mode {
        ColorMode::Rgb => return Ok(image.clone()),
        ColorMode::Rgba => image
            .pixels
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect(),
        ColorMode::Gray => image.pixels.iter().flat_map(|&v| [v, v, v]).collect(),
    };

    tracing::debug!(from = ?image.mode, "Normalized color mode to RGB");
    Ok(RasterImage::new(image.width, image.height, ColorMode::Rgb, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_drops_alpha() {
        let img = RasterImage::new(
            2,
            1,
            ColorMode::Rgba,
            vec![255, 0, 0, 0, 10, 20, 30, 255],
        );
        let out = normalize(&img).unwrap();

        assert_eq!(out.mode, ColorMode::Rgb);
        assert_eq!(out.pixels, vec![255, 0, 0, 10, 20, 30]);
    }

    #[test]
    fn test_gray_is_replicated() {
        let img = RasterImage::new(3, 1, ColorMode::Gray, vec![0, 128, 255]);
        let out = normalize(&img).unwrap();

        assert_eq!(out.mode, ColorMode::Rgb);
        assert_eq!(out.pixels, vec![0, 0, 0, 128, 128, 128, 255, 255, 255]);
    }

    #[test]
    fn test_rgb_is_untouched() {
        let img = RasterImage::filled(5, 5, ColorMode::Rgb, &[1, 2, 3]);
        assert_eq!(normalize(&img).unwrap(), img);
    }

    #[test]
    fn test_input_not_mutated() {
        let img = RasterImage::filled(2, 2, ColorMode::Rgba, &[4, 5, 6, 7]);
        let before = img.clone();
        let _ = normalize(&img);
        assert_eq!(img, before);
    }

    #[test]
    fn test_short_buffer_rejected() {
        let img = RasterImage {
            width: 2,
            height: 2,
            mode: ColorMode::Rgba,
            pixels: vec![0; 15],
        };
        assert!(matches!(
            normalize(&img),
            Err(InputError::PixelBufferMismatch {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn test_zero_width_rejected() {
        let img = RasterImage {
            width: 0,
            height: 3,
            mode: ColorMode::Gray,
            pixels: Vec::new(),
        };
        assert!(matches!(
            normalize(&img),
            Err(InputError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_dimensions_preserved() {
        let img = RasterImage::filled(17, 9, ColorMode::Gray, &[77]);
        let out = normalize(&img).unwrap();
        assert_eq!(out.dimensions(), img.dimensions());
        assert_eq!(out.pixels.len(), 17 * 9 * 3);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = RasterImage> {
        (
            1u32..=12,
            1u32..=12,
            prop_oneof![
                Just(ColorMode::Gray),
                Just(ColorMode::Rgb),
                Just(ColorMode::Rgba)
            ],
        )
            .prop_flat_map(|(w, h, mode)| {
                let len = (w * h) as usize * mode.channels();
                prop::collection::vec(any::<u8>(), len..=len)
                    .prop_map(move |pixels| RasterImage::new(w, h, mode, pixels))
            })
    }

    proptest! {
        /// Property: normalize(normalize(x)) == normalize(x).
        #[test]
        fn prop_idempotent(img in image_strategy()) {
            let once = normalize(&img).unwrap();
            let twice = normalize(&once).unwrap();
            prop_assert_eq!(once, twice);
        }

        /// Property: output is always RGB with the input's dimensions.
        #[test]
        fn prop_always_rgb(img in image_strategy()) {
            let out = normalize(&img).unwrap();
            prop_assert_eq!(out.mode, ColorMode::Rgb);
            prop_assert_eq!(out.dimensions(), img.dimensions());
            prop_assert_eq!(out.pixels.len(), img.pixel_count() * 3);
        }
    }
}
