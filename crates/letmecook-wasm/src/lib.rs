//! Let Me Cook WASM - WebAssembly bindings for Let Me Cook
//!
//! This crate exposes the letmecook-core pipeline to the browser front end,
//! so uploads and camera snapshots are pre-processed locally before the
//! payload is sent to the vision model.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Decoding, resizing and normalization bindings
//! - `encode` - JPEG encoding bindings
//! - `preprocess` - The full pipeline in one call
//! - `analysis` - Prompt building and response parsing
//!
//! # Usage
//!
//! ```typescript
//! import init, { preprocess_image, ingredient_prompt, parse_ingredients } from '@letmecook/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = preprocess_image(bytes, undefined);
//! const answer = await askModel(ingredient_prompt(), result.payload(), result.mime_type);
//! const ingredients = parse_ingredients(answer);
//! ```

use wasm_bindgen::prelude::*;

mod analysis;
mod decode;
mod encode;
mod preprocess;
mod types;

// Re-export public types
pub use analysis::{
    display_name, ingredient_prompt, parse_ingredients, parse_recipes, recipe_prompt,
};
pub use decode::{decode_image, normalize, resize, resize_within};
pub use encode::{encode_jpeg, encode_jpeg_from_image};
pub use preprocess::{default_options, preprocess_image, preprocess_raster, JsPreprocessResult};
pub use types::JsRasterImage;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
