//! The user's curation of detected ingredients.

use serde::{Deserialize, Serialize};

/// Detected ingredients with a per-item include flag.
///
/// Every ingredient starts selected; the user unticks what the model got
/// wrong before asking for recipes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientSelection {
    items: Vec<(String, bool)>,
}

impl IngredientSelection {
    /// Select every ingredient. A repeated name keeps its first position.
    pub fn new<I, S>(ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items: Vec<(String, bool)> = Vec::new();
        for name in ingredients {
            let name = name.into();
            if !items.iter().any(|(n, _)| *n == name) {
                items.push((name, true));
            }
        }
        Self { items }
    }

    /// Number of detected ingredients, selected or not.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing was detected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flip one ingredient. Returns the new state, or `None` if unknown.
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        let item = self.items.iter_mut().find(|(n, _)| n == name)?;
        item.1 = !item.1;
        Some(item.1)
    }

    /// Set one ingredient. Returns false if the name is unknown.
    pub fn set(&mut self, name: &str, selected: bool) -> bool {
        match self.items.iter_mut().find(|(n, _)| n == name) {
            Some(item) => {
                item.1 = selected;
                true
            }
            None => false,
        }
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.items.iter().any(|(n, on)| n == name && *on)
    }

    /// Selected ingredients, in detection order.
    pub fn selected(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|(_, on)| *on)
            .map(|(n, _)| n.as_str())
            .collect()
    }

    /// Returns true if the user deselected everything.
    pub fn none_selected(&self) -> bool {
        !self.items.iter().any(|(_, on)| *on)
    }

    /// All ingredients with their flags, in detection order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.items.iter().map(|(n, on)| (n.as_str(), *on))
    }
}

/// Capitalize the first letter for display ("soy sauce" -> "Soy sauce").
pub fn display_name(ingredient: &str) -> String {
    let mut chars = ingredient.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
