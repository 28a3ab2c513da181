//! In-memory raster images shared by every pipeline stage.

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::decode::InputError;
use crate::Dimensions;

/// Channel layout of a [`RasterImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorMode {
    /// Single luma channel.
    Gray,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl ColorMode {
    /// Number of interleaved bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ColorMode::Gray => 1,
            ColorMode::Rgb => 3,
            ColorMode::Rgba => 4,
        }
    }

    /// Returns true if the mode carries transparency.
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, ColorMode::Rgba)
    }
}

/// A decoded image with 8-bit interleaved pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel layout of `pixels`.
    pub mode: ColorMode,
    /// Pixel data in row-major order, `mode.channels()` bytes per pixel.
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Create a new RasterImage with the given dimensions, mode and pixel data.
    pub fn new(width: u32, height: u32, mode: ColorMode, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            expected_len(width, height, mode),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            mode,
            pixels,
        }
    }

    /// Create an image filled with a single pixel value.
    ///
    /// `value` must hold exactly `mode.channels()` bytes.
    pub fn filled(width: u32, height: u32, mode: ColorMode, value: &[u8]) -> Self {
        debug_assert_eq!(value.len(), mode.channels());
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * mode.channels());
        for _ in 0..count {
            pixels.extend_from_slice(value);
        }
        Self::new(width, height, mode, pixels)
    }

    /// Wrap a decoded `image` crate buffer, keeping 8-bit precision.
    ///
    /// Images with any alpha channel become `Rgba`, colour images become
    /// `Rgb` and everything else becomes `Gray`.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let color = img.color();
        if color.has_alpha() {
            let buf = img.into_rgba8();
            let (width, height) = buf.dimensions();
            Self::new(width, height, ColorMode::Rgba, buf.into_raw())
        } else if color.has_color() {
            Self::from_rgb_image(img.into_rgb8())
        } else {
            let buf = img.into_luma8();
            let (width, height) = buf.dimensions();
            Self::new(width, height, ColorMode::Gray, buf.into_raw())
        }
    }

    /// Create an RGB RasterImage from an image::RgbImage.
    pub fn from_rgb_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, ColorMode::Rgb, img.into_raw())
    }

    /// Convert to a DynamicImage for codec and resampling work.
    ///
    /// Returns `None` if the buffer does not match the dimensions.
    pub fn to_dynamic(&self) -> Option<DynamicImage> {
        let pixels = self.pixels.clone();
        match self.mode {
            ColorMode::Gray => {
                GrayImage::from_raw(self.width, self.height, pixels).map(DynamicImage::ImageLuma8)
            }
            ColorMode::Rgb => {
                RgbImage::from_raw(self.width, self.height, pixels).map(DynamicImage::ImageRgb8)
            }
            ColorMode::Rgba => {
                RgbaImage::from_raw(self.width, self.height, pixels).map(DynamicImage::ImageRgba8)
            }
        }
    }

    /// Image dimensions.
    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Number of channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.mode.channels()
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Check the dimension and buffer invariants.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.width == 0 || self.height == 0 {
            return Err(InputError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let expected = expected_len(self.width, self.height, self.mode);
        if self.pixels.len() != expected {
            return Err(InputError::PixelBufferMismatch {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Borrow the channel values of the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let channels = self.channels();
        let start = (y as usize * self.width as usize + x as usize) * channels;
        &self.pixels[start..start + channels]
    }
}

#[inline]
fn expected_len(width: u32, height: u32, mode: ColorMode) -> usize {
    width as usize * height as usize * mode.channels()
}
