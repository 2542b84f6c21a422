//! # Fallback Single-Pass Parser
//!
//! A cheaper, lower-fidelity path for callers that only need a minimal
//! name/ingredients/directions record without confidence scores. One pass,
//! one ingredients/directions flag flipped by header keywords, no
//! normalization, no metric/nutrition/garnish handling.

use serde::{Deserialize, Serialize};

use crate::vocabulary::AMOUNT_PREFIX;

/// Minimal structured record produced by [`quick_parse`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuickRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuickState {
    Ingredients,
    Directions,
}

/// Single-pass parse: first line is the name, header keywords flip the state,
/// and everything else is classified by the current state or a lightweight
/// amount-prefix check.
pub fn quick_parse(text: &str) -> QuickRecipe {
    let mut recipe = QuickRecipe::default();
    let mut state = QuickState::Ingredients;
    let mut saw_name = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !saw_name {
            recipe.name = trimmed.to_string();
            saw_name = true;
            continue;
        }

        let lower = trimmed.to_lowercase();
        if lower.contains("ingredient") {
            state = QuickState::Ingredients;
            continue;
        }
        if lower.contains("direction")
            || lower.contains("instruction")
            || lower.contains("method")
            || lower.contains("steps")
        {
            state = QuickState::Directions;
            continue;
        }

        match state {
            QuickState::Ingredients => recipe.ingredients.push(trimmed.to_string()),
            QuickState::Directions => {
                // Stray amount-led lines after the directions header are still
                // ingredients (out-of-order OCR reading).
                if AMOUNT_PREFIX.is_match(trimmed) {
                    recipe.ingredients.push(trimmed.to_string());
                } else {
                    recipe.directions.push(trimmed.to_string());
                }
            }
        }
    }

    recipe
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_is_name() {
        let recipe = quick_parse("Beef Stew\n2 lb beef");
        assert_eq!(recipe.name, "Beef Stew");
        assert_eq!(recipe.ingredients, vec!["2 lb beef"]);
    }

    #[test]
    fn test_headers_flip_state() {
        let recipe = quick_parse(
            "Beef Stew\nIngredients:\n2 lb beef\n1 onion\nDirections:\nBrown the beef.\nSimmer.",
        );
        assert_eq!(recipe.ingredients, vec!["2 lb beef", "1 onion"]);
        assert_eq!(recipe.directions, vec!["Brown the beef.", "Simmer."]);
    }

    #[test]
    fn test_empty_input() {
        let recipe = quick_parse("");
        assert_eq!(recipe, QuickRecipe::default());
    }
}
