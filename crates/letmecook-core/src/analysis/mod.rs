//! Ingredient detection and recipe suggestion.
//!
//! The pipeline's [`EncodedPayload`] goes to a [`VisionModel`] with a fixed
//! prompt; the comma-separated answer becomes an ingredient list. After the
//! user curates that list, a second prompt asks for recipes, which are
//! split into sections for display.

mod model;
mod prompt;
mod response;
mod selection;

pub use model::{GenerateRequest, InlineImage, ModelError, VisionModel};
pub use prompt::{recipe_prompt, INGREDIENT_PROMPT, RECIPE_COUNT, RECIPE_SEPARATOR};
pub use response::{parse_ingredients, parse_recipes, Recipe};
pub use selection::{display_name, IngredientSelection};

use thiserror::Error;

use crate::encode::EncodedPayload;

/// Errors from the detection and suggestion flow.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The model saw no food in the photo.
    #[error("No food detected in the image")]
    NoFoodDetected,

    /// The model answered with nothing usable.
    #[error("The model returned an empty response")]
    EmptyResponse,

    /// Recipes were requested without any ingredient.
    #[error("No ingredients selected")]
    NoIngredients,

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Ask the model which ingredients are visible in the payload image.
///
/// # Errors
///
/// `AnalysisError::NoFoodDetected` when the model reports no food,
/// `AnalysisError::EmptyResponse` for a blank answer and
/// `AnalysisError::Model` when the call itself fails.
pub fn detect_ingredients<M: VisionModel + ?Sized>(
    model: &M,
    payload: &EncodedPayload,
) -> Result<Vec<String>, AnalysisError> {
    let request = GenerateRequest::with_image(INGREDIENT_PROMPT, payload);
    let answer = model.generate(&request)?;
    let ingredients = parse_ingredients(&answer)?;

    tracing::info!(count = ingredients.len(), "Detected ingredients");
    Ok(ingredients)
}

/// Ask the model for recipes using the given ingredients.
///
/// Returns the raw Markdown answer; use [`parse_recipes`] to split it.
pub fn suggest_recipes<M, S>(model: &M, ingredients: &[S]) -> Result<String, AnalysisError>
where
    M: VisionModel + ?Sized,
    S: AsRef<str>,
{
    if ingredients.is_empty() {
        return Err(AnalysisError::NoIngredients);
    }

    let prompt = recipe_prompt(ingredients);
    let answer = model.generate(&GenerateRequest::text(&prompt))?;
    if answer.trim().is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }

    tracing::info!(
        ingredients = ingredients.len(),
        response_bytes = answer.len(),
        "Received recipe suggestions"
    );
    Ok(answer)
}
