//! # Course Classifier
//!
//! Assigns a course label from keyword density over the whole recognized text.
//! Purely rule-based: four fixed keyword sets checked in a fixed order, first
//! satisfied rule wins, with "Mains" as the default.

use tracing::debug;

/// Dessert vocabulary; two or more hits classify as "Desserts".
const DESSERT_KEYWORDS: &[&str] = &[
    "dessert", "cake", "cookie", "cookies", "frosting", "icing", "brownie",
    "pudding", "custard", "caramel", "pie crust", "ganache", "meringue",
    "sweetened", "vanilla extract", "powdered sugar", "brown sugar",
];

/// Drink vocabulary; two or more hits classify as "Drinks".
const DRINK_KEYWORDS: &[&str] = &[
    "cocktail", "shaker", "muddle", "vodka", "gin", "rum", "tequila", "whiskey",
    "bourbon", "liqueur", "vermouth", "bitters", "ice cubes", "highball",
    "smoothie", "shot glass", "on the rocks",
];

/// Appetizer vocabulary; one hit classifies as "Apps".
const APPETIZER_KEYWORDS: &[&str] = &[
    "appetizer", "appetizers", "hors d'oeuvre", "starter course", "canape",
    "canapé", "dipping sauce", "finger food", "crostini", "bruschetta",
];

/// Side-dish vocabulary; one hit classifies as "Sides".
const SIDE_KEYWORDS: &[&str] = &[
    "side dish", "accompaniment", "goes well with", "serve alongside",
    "pairs with", "coleslaw", "pilaf",
];

fn keyword_hits(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| text.contains(*k)).count()
}

fn density_confidence(count: usize) -> f32 {
    (0.6 + 0.05 * count as f32).min(0.8)
}

/// Classify the course of a recipe from its full text.
///
/// Returns the course label and its confidence. Rules are checked in order;
/// the first satisfied rule wins:
/// dessert ≥2, drink ≥2, appetizer ≥1, side ≥1, else "Mains" at 0.2.
pub fn classify_course(text: &str) -> (String, f32) {
    let lower = text.to_lowercase();

    let dessert = keyword_hits(&lower, DESSERT_KEYWORDS);
    let drink = keyword_hits(&lower, DRINK_KEYWORDS);
    let appetizer = keyword_hits(&lower, APPETIZER_KEYWORDS);
    let side = keyword_hits(&lower, SIDE_KEYWORDS);

    debug!(dessert, drink, appetizer, side, "course keyword hits");

    if dessert >= 2 {
        return ("Desserts".to_string(), density_confidence(dessert));
    }
    if drink >= 2 {
        return ("Drinks".to_string(), density_confidence(drink));
    }
    if appetizer >= 1 {
        return ("Apps".to_string(), 0.5);
    }
    if side >= 1 {
        return ("Sides".to_string(), 0.5);
    }

    ("Mains".to_string(), 0.2)
}
