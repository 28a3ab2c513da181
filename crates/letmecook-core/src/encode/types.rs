//! Types shared by the encoding round trip.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::raster::ColorMode;

/// Default JPEG quality used for transmission.
pub const DEFAULT_QUALITY: u8 = 85;

/// Errors that can occur while encoding or re-decoding the payload.
///
/// Inside the pipeline these indicate a violated precondition (the image was
/// not normalized) rather than a transient fault.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Quality outside 1..=100
    #[error("Invalid quality {0}: must be between 1 and 100")]
    InvalidQuality(u8),

    /// The codec cannot store this color mode
    #[error("Unsupported color mode for JPEG: {0:?}")]
    UnsupportedColorMode(ColorMode),

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),

    /// The freshly encoded payload could not be decoded again
    #[error("JPEG decoding failed: {0}")]
    DecodingFailed(String),
}

/// Lossy codec used for the transmitted payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionFormat {
    #[default]
    Jpeg,
}

impl CompressionFormat {
    /// MIME type announced to the remote model.
    pub fn mime_type(self) -> &'static str {
        match self {
            CompressionFormat::Jpeg => "image/jpeg",
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            CompressionFormat::Jpeg => "jpg",
        }
    }
}

/// Settings for the lossy recompression step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionSettings {
    /// Codec for the payload.
    pub format: CompressionFormat,
    /// Quality (1-100, where 100 is highest quality). Default 85.
    pub quality: u8,
    /// Request codec-level size optimization. Never changes pixel values.
    pub optimize: bool,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            format: CompressionFormat::Jpeg,
            quality: DEFAULT_QUALITY,
            optimize: true,
        }
    }
}

impl CompressionSettings {
    /// Settings with the given quality and the remaining defaults.
    pub fn with_quality(quality: u8) -> Self {
        Self {
            quality,
            ..Self::default()
        }
    }

    /// Check that the quality is within 1..=100.
    pub fn validate(&self) -> Result<(), EncodingError> {
        if !(1..=100).contains(&self.quality) {
            return Err(EncodingError::InvalidQuality(self.quality));
        }
        Ok(())
    }
}

/// Compressed image bytes ready for transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    bytes: Vec<u8>,
    format: CompressionFormat,
}

impl EncodedPayload {
    pub fn new(bytes: Vec<u8>, format: CompressionFormat) -> Self {
        Self { bytes, format }
    }

    /// The encoded byte stream.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take ownership of the encoded byte stream.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn format(&self) -> CompressionFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = CompressionSettings::default();
        assert_eq!(settings.format, CompressionFormat::Jpeg);
        assert_eq!(settings.quality, 85);
        assert!(settings.optimize);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_quality_bounds() {
        assert!(CompressionSettings::with_quality(1).validate().is_ok());
        assert!(CompressionSettings::with_quality(100).validate().is_ok());
        assert!(matches!(
            CompressionSettings::with_quality(0).validate(),
            Err(EncodingError::InvalidQuality(0))
        ));
        assert!(matches!(
            CompressionSettings::with_quality(101).validate(),
            Err(EncodingError::InvalidQuality(101))
        ));
    }

    #[test]
    fn test_payload_accessors() {
        let payload = EncodedPayload::new(vec![0xFF, 0xD8, 0xFF, 0xD9], CompressionFormat::Jpeg);
        assert_eq!(payload.len(), 4);
        assert!(!payload.is_empty());
        assert_eq!(payload.mime_type(), "image/jpeg");
        assert_eq!(payload.format().extension(), "jpg");
        assert_eq!(payload.into_bytes(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
    }
}
