//! Fixed prompts sent to the vision-language model.

/// Asks the model for a bare comma-separated ingredient list.
pub const INGREDIENT_PROMPT: &str = "\
Analyze the following image and list the visible food ingredients.
Provide the list in a comma-separated format, only listing the ingredients.
Do not include any introductory phrases or explanations.
If no food is detected in the image simply return \"no food\".";

/// Number of recipes requested per call.
pub const RECIPE_COUNT: usize = 5;

/// Separator the model is asked to put between recipes.
pub const RECIPE_SEPARATOR: &str = "---";

/// Build the recipe request for the curated ingredient list.
pub fn recipe_prompt<S: AsRef<str>>(ingredients: &[S]) -> String {
    let joined = ingredients
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Suggest {RECIPE_COUNT} numbered recipes using these ingredients: {joined}.
Prioritize Filipino Dishes/Recipes if possible only not necessary.
Don't show any additional messages or thoughts.
For each recipe, only provide the following information in a well-structured Markdown format:

**Recipe Name:** [Name of the Recipe]

**Difficulty Level:** [Easy, Medium, or Hard]

**Cooking Time:** [Estimated cooking time, e.g., 30 minutes]

**Ingredients:**
- [Ingredient 1]
- [Ingredient 2]
- ...

**Instructions:**
1. [Step 1]
2. [Step 2]
3. ...

Make sure each recipe is clearly separated by a horizontal rule ({RECIPE_SEPARATOR})."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_prompt_mentions_no_food() {
        assert!(INGREDIENT_PROMPT.contains("\"no food\""));
        assert!(INGREDIENT_PROMPT.contains("comma-separated"));
    }

    #[test]
    fn test_recipe_prompt_joins_ingredients() {
        let prompt = recipe_prompt(&["garlic", "pork", "soy sauce"]);
        assert!(prompt.contains("using these ingredients: garlic, pork, soy sauce."));
        assert!(prompt.starts_with("Suggest 5 numbered recipes"));
        assert!(prompt.ends_with("horizontal rule (---)."));
    }

    #[test]
    fn test_recipe_prompt_accepts_owned_strings() {
        let ingredients = vec!["egg".to_string()];
        assert!(recipe_prompt(&ingredients).contains("ingredients: egg."));
    }
}
