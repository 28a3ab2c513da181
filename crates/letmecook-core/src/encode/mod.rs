//! Payload encoding for Let Me Cook.
//!
//! This module provides functionality for:
//! - Encoding normalized images to JPEG with configurable quality
//! - Decoding the payload again so display reflects transmission quality
//!
//! # Examples
//!
//! ```ignore
//! use letmecook_core::encode::{encode_and_roundtrip, CompressionSettings};
//!
//! let (payload, transmitted) = encode_and_roundtrip(&image, &CompressionSettings::default())?;
//! println!("Sending {} bytes of {}", payload.len(), payload.mime_type());
//! ```

mod jpeg;
mod types;

pub use jpeg::{decode_payload, encode_and_roundtrip, encode_image, encode_jpeg};
pub use types::{
    CompressionFormat, CompressionSettings, EncodedPayload, EncodingError, DEFAULT_QUALITY,
};
