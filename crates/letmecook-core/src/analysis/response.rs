//! Parsing of model answers.

use serde::{Deserialize, Serialize};

use super::prompt::RECIPE_SEPARATOR;
use super::AnalysisError;

/// Marker the model answers with when the photo shows no food.
const NO_FOOD_MARKER: &str = "no food";

/// Turn the ingredient answer into a clean, lower-cased list.
///
/// # Errors
///
/// `AnalysisError::NoFoodDetected` when the answer contains "no food"
/// (any case), `AnalysisError::EmptyResponse` when nothing usable remains.
pub fn parse_ingredients(text: &str) -> Result<Vec<String>, AnalysisError> {
    let lowered = text.to_lowercase();
    if lowered.contains(NO_FOOD_MARKER) {
        return Err(AnalysisError::NoFoodDetected);
    }

    let ingredients: Vec<String> = lowered
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    if ingredients.is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }
    Ok(ingredients)
}

/// One recipe section of the model's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Header block (name, difficulty, cooking time) with Markdown emphasis removed.
    pub title: String,
    /// Everything else in the section: ingredients and instructions.
    pub body: String,
}

impl Recipe {
    /// The dish name from the first header line, without its label.
    pub fn name(&self) -> &str {
        let first = self.title.lines().next().unwrap_or_default().trim();
        first
            .strip_prefix("Recipe Name:")
            .map(str::trim)
            .unwrap_or(first)
    }
}

/// Split a recipe answer into sections.
///
/// Sections are separated by `---`. A section is kept only if it contains
/// "Recipe" followed later by "Ingredients"; the text between the two is
/// the header, and the body is the section with the header removed.
pub fn parse_recipes(text: &str) -> Vec<Recipe> {
    text.split(RECIPE_SEPARATOR)
        .filter(|section| !section.trim().is_empty())
        .filter_map(parse_section)
        .collect()
}

fn parse_section(section: &str) -> Option<Recipe> {
    let start = section.find("Recipe")?;
    let end = section.find("Ingredients")?;
    if end <= start {
        return None;
    }

    let header = &section[start..end];
    let title = header.replace('*', "").trim().to_string();
    let body = section.replace(header.trim(), "").trim().to_string();
    Some(Recipe { title, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANSWER: &str = "\
**Recipe Name:** Chicken Adobo

**Difficulty Level:** Easy

**Cooking Time:** 45 minutes

**Ingredients:**
- chicken
- soy sauce

**Instructions:**
1. Marinate.
2. Simmer.

---

**Recipe Name:** Garlic Rice

**Difficulty Level:** Easy

**Cooking Time:** 15 minutes

**Ingredients:**
- rice
- garlic

**Instructions:**
1. Fry garlic.
2. Add rice.
---
";

    #[test]
    fn test_parse_ingredients_basic() {
        let list = parse_ingredients("Tomato, Onion ,  garlic,").unwrap();
        assert_eq!(list, vec!["tomato", "onion", "garlic"]);
    }

    #[test]
    fn test_parse_ingredients_no_food() {
        assert!(matches!(
            parse_ingredients("No food."),
            Err(AnalysisError::NoFoodDetected)
        ));
        assert!(matches!(
            parse_ingredients("  NO FOOD  "),
            Err(AnalysisError::NoFoodDetected)
        ));
    }

    #[test]
    fn test_parse_ingredients_empty() {
        assert!(matches!(
            parse_ingredients(""),
            Err(AnalysisError::EmptyResponse)
        ));
        assert!(matches!(
            parse_ingredients(" , ,\n"),
            Err(AnalysisError::EmptyResponse)
        ));
    }

    #[test]
    fn test_parse_ingredients_trims_newlines() {
        let list = parse_ingredients("eggs,\nmilk\n").unwrap();
        assert_eq!(list, vec!["eggs", "milk"]);
    }

    #[test]
    fn test_parse_recipes_sections() {
        let recipes = parse_recipes(ANSWER);
        assert_eq!(recipes.len(), 2);

        let adobo = &recipes[0];
        assert!(adobo.title.starts_with("Recipe Name: Chicken Adobo"));
        assert!(adobo.title.contains("Cooking Time: 45 minutes"));
        assert!(!adobo.title.contains('*'));
        assert!(adobo.body.starts_with("**Ingredients:**"));
        assert!(adobo.body.contains("2. Simmer."));
        assert!(!adobo.body.contains("Difficulty Level"));

        assert_eq!(recipes[1].name(), "Garlic Rice");
    }

    #[test]
    fn test_parse_recipes_skips_unstructured_sections() {
        let text = "Here are some ideas\n---\nIngredients first, Recipe later\n---\n   \n";
        assert!(parse_recipes(text).is_empty());
    }

    #[test]
    fn test_recipe_name_without_label() {
        let recipe = Recipe {
            title: "Recipe 1: Sinigang".to_string(),
            body: String::new(),
        };
        assert_eq!(recipe.name(), "Recipe 1: Sinigang");
    }
}
