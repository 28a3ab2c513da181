//! Prompt and response helpers for the ingredient/recipe flow.
//!
//! The browser makes the model call itself; these bindings build the prompts
//! and parse the answers so both front ends behave the same.

use crate::types::to_js_error;
use letmecook_core::analysis;
use wasm_bindgen::prelude::*;

/// The prompt sent alongside the payload image.
#[wasm_bindgen]
pub fn ingredient_prompt() -> String {
    analysis::INGREDIENT_PROMPT.to_string()
}

/// Build the recipe prompt from an array of ingredient names.
#[wasm_bindgen]
pub fn recipe_prompt(ingredients: JsValue) -> Result<String, JsValue> {
    let ingredients: Vec<String> =
        serde_wasm_bindgen::from_value(ingredients).map_err(to_js_error)?;
    Ok(analysis::recipe_prompt(&ingredients))
}

/// Parse the ingredient answer into an array of lower-cased names.
///
/// # Errors
///
/// Throws "No food detected in the image" or "The model returned an empty
/// response" so the UI can show them directly.
#[wasm_bindgen]
pub fn parse_ingredients(text: &str) -> Result<js_sys::Array, JsValue> {
    let names = analysis::parse_ingredients(text).map_err(to_js_error)?;
    Ok(names.iter().map(|name| JsValue::from_str(name)).collect())
}

/// Split the recipe answer into `{ title, body }` objects.
#[wasm_bindgen]
pub fn parse_recipes(text: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&analysis::parse_recipes(text)).map_err(to_js_error)
}

/// Capitalize an ingredient name for display.
#[wasm_bindgen]
pub fn display_name(ingredient: &str) -> String {
    analysis::display_name(ingredient)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_prompt() {
        assert!(ingredient_prompt().contains("no food"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("calamansi"), "Calamansi");
    }
}
