//! Source image intake for the pre-processing pipeline.
//!
//! This module provides functionality for:
//! - Decoding uploaded or camera-captured PNG/JPEG images
//! - Applying EXIF orientation so photos are processed upright
//! - Shrinking images into a bounding box without ever enlarging them
//!
//! # Examples
//!
//! ```ignore
//! use letmecook_core::decode::{decode_image, resize_within, FilterType};
//! use letmecook_core::Dimensions;
//!
//! let bytes = std::fs::read("fridge.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let small = resize_within(&image, Dimensions::new(800, 800), FilterType::Lanczos3).unwrap();
//! println!("Working copy {}x{}", small.width, small.height);
//! ```

mod resize;
mod source;
mod types;

pub use resize::{fit_dimensions, resize, resize_within};
pub use source::decode_image;
pub use types::{FilterType, InputError};

pub(crate) use types::Orientation;
