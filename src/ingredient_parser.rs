//! # Ingredient Line Parser
//!
//! Parses one candidate ingredient line into amount, unit, name, preparation,
//! and alternative. Grammars are attempted in a fixed order, first match wins:
//!
//! 1. Baker's-percentage form: `name, P% – amount (note)`
//! 2. Standard form: `amount unit name`, with an optional `or alternative`
//!    suffix and a parenthetical kept only when it reads as a cross-reference
//!    or optionality note
//! 3. `amount name` with no unit, rejected when the name contains instruction
//!    verbs
//! 4. Fallback: the whole cleaned line as the name, flagged as not looking
//!    like a real ingredient
//!
//! ## Usage
//!
//! ```rust
//! use recipe_import::ingredient_parser::parse_ingredient_line;
//!
//! let line = parse_ingredient_line("2 cups sugar");
//! assert_eq!(line.amount, Some("2".to_string()));
//! assert_eq!(line.unit, Some("cups".to_string()));
//! assert_eq!(line.name, "sugar");
//! ```

use crate::import_model::RawIngredientLine;
use crate::vocabulary::{action_verb_count, contains_action_verb, contains_direction_fragment};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

/// Amount sub-grammar: mixed numbers, ASCII fractions, decimals, vulgar
/// fraction glyphs, and digit+glyph composites. Longest alternatives first.
const AMOUNT: &str = r"\d+\s+\d+/\d+|\d+/\d+|\d+(?:\.\d+)?\s*[¼½¾⅓⅔⅛⅜⅝⅞]|\d+(?:\.\d+)?|[¼½¾⅓⅔⅛⅜⅝⅞]";

lazy_static! {
    /// Surface unit spellings mapped to one canonical token per unit family.
    static ref UNIT_MAPPINGS: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();

        map.insert("cup", "cup");
        map.insert("cups", "cup");
        map.insert("c", "cup");
        map.insert("c.", "cup");

        map.insert("tbsp", "tbsp");
        map.insert("tbsp.", "tbsp");
        map.insert("tbs", "tbsp");
        map.insert("tablespoon", "tbsp");
        map.insert("tablespoons", "tbsp");

        map.insert("tsp", "tsp");
        map.insert("tsp.", "tsp");
        map.insert("teaspoon", "tsp");
        map.insert("teaspoons", "tsp");

        map.insert("oz", "oz");
        map.insert("oz.", "oz");
        map.insert("ounce", "oz");
        map.insert("ounces", "oz");

        map.insert("lb", "lb");
        map.insert("lb.", "lb");
        map.insert("lbs", "lb");
        map.insert("pound", "lb");
        map.insert("pounds", "lb");

        map.insert("g", "g");
        map.insert("g.", "g");
        map.insert("gr", "g");
        map.insert("gram", "g");
        map.insert("grams", "g");

        map.insert("kg", "kg");
        map.insert("kilogram", "kg");
        map.insert("kilograms", "kg");

        map.insert("ml", "ml");
        map.insert("milliliter", "ml");
        map.insert("milliliters", "ml");
        map.insert("millilitre", "ml");
        map.insert("millilitres", "ml");

        map.insert("l", "L");
        map.insert("liter", "L");
        map.insert("liters", "L");
        map.insert("litre", "L");
        map.insert("litres", "L");

        map.insert("part", "part");
        map.insert("parts", "part");

        map
    };

    /// Baker's-percentage notation: "bread flour, 100% – 500 g (see page 42)".
    static ref BAKERS_LINE: Regex = Regex::new(&format!(
        r"^(?P<name>[^,]+),\s*(?P<pct>\d+(?:\.\d+)?)\s*%\s*[–—-]\s*(?P<amount>(?:{AMOUNT})(?:\s*[a-zA-Z.]+)?)\s*(?:\((?P<note>[^)]+)\))?\s*$"
    ))
    .expect("baker's percentage pattern should be valid");

    /// Standard "amount word rest" shape; the word is only accepted as a unit
    /// when it resolves in UNIT_MAPPINGS.
    static ref STANDARD_LINE: Regex = Regex::new(&format!(
        r"^(?P<amount>{AMOUNT})\s+(?P<unit>[a-zA-Z]+\.?)\s+(?P<rest>\S.*)$"
    ))
    .expect("standard ingredient pattern should be valid");

    /// "amount rest" with no unit word.
    static ref BARE_AMOUNT_LINE: Regex = Regex::new(&format!(
        r"^(?P<amount>{AMOUNT})\s+(?P<rest>\S.*)$"
    ))
    .expect("bare amount pattern should be valid");

    static ref PARENTHETICAL: Regex =
        Regex::new(r"\s*\((?P<note>[^)]*)\)").expect("parenthetical pattern should be valid");

    static ref METRIC_EQUIVALENT: Regex =
        Regex::new(r"(?i)\b\d+(?:\.\d+)?\s*(?:g|kg|ml|l)\b").expect("metric pattern should be valid");
}

/// Numeric value of a fraction glyph
fn glyph_value(glyph: char) -> Option<f64> {
    match glyph {
        '¼' => Some(0.25),
        '½' => Some(0.5),
        '¾' => Some(0.75),
        '⅓' => Some(1.0 / 3.0),
        '⅔' => Some(2.0 / 3.0),
        '⅛' => Some(0.125),
        '⅜' => Some(0.375),
        '⅝' => Some(0.625),
        '⅞' => Some(0.875),
        _ => None,
    }
}

/// Numeric value of an amount string: integers, decimals, ASCII fractions,
/// mixed numbers, vulgar glyphs, and digit+glyph composites ("1½").
pub fn amount_value(amount: &str) -> Option<f64> {
    let amount = amount.trim();
    if amount.is_empty() {
        return None;
    }

    // Trailing glyph with an optional numeric prefix.
    if let Some(last) = amount.chars().last() {
        if let Some(fraction) = glyph_value(last) {
            let prefix = amount[..amount.len() - last.len_utf8()].trim();
            if prefix.is_empty() {
                return Some(fraction);
            }
            return prefix.parse::<f64>().ok().map(|whole| whole + fraction);
        }
    }

    // Mixed number or plain ASCII fraction.
    if let Some(slash) = amount.find('/') {
        let (head, denom_text) = amount.split_at(slash);
        let denominator: f64 = denom_text[1..].trim().parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        let head = head.trim();
        let (whole, numerator) = match head.rsplit_once(char::is_whitespace) {
            Some((whole_text, num_text)) => (
                whole_text.trim().parse::<f64>().ok()?,
                num_text.trim().parse::<f64>().ok()?,
            ),
            None => (0.0, head.parse::<f64>().ok()?),
        };
        return Some(whole + numerator / denominator);
    }

    amount.parse::<f64>().ok()
}

/// Canonical unit token for a surface spelling, re-pluralized against the
/// parsed amount. Only the `cup` and `part` families take a plural form; the
/// abbreviation-style tokens stay invariant.
pub fn normalize_unit(surface: &str, amount: Option<f64>) -> Option<String> {
    let canonical = *UNIT_MAPPINGS.get(surface.to_lowercase().as_str())?;
    let plural = amount.map(|v| v > 1.0).unwrap_or(false);
    let token = match (canonical, plural) {
        ("cup", true) => "cups",
        ("part", true) => "parts",
        (token, _) => token,
    };
    Some(token.to_string())
}

/// Whether a parenthetical reads as a cross-reference or optionality note
/// worth keeping as preparation, rather than OCR debris.
fn is_reference_note(note: &str) -> bool {
    let lower = note.to_lowercase();
    lower.contains("page")
        || lower.contains("see ")
        || lower.contains("optional")
        || lower.contains("about")
        || lower.contains("homemade")
        || lower.contains("store-bought")
        || METRIC_EQUIVALENT.is_match(note)
}

/// Clean an ingredient name: strip trailing punctuation, and retitle ALL-CAPS
/// text to Title Case with short words kept lowercase unless digit-led.
pub fn clean_name(name: &str) -> String {
    let trimmed = name
        .trim()
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '-'))
        .trim();

    let has_letters = trimmed.chars().any(|c| c.is_alphabetic());
    let all_caps = has_letters && !trimmed.chars().any(|c| c.is_lowercase());
    if !all_caps {
        return trimmed.to_string();
    }

    trimmed
        .split_whitespace()
        .map(|word| {
            let digit_led = word.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false);
            if word.chars().count() <= 2 && !digit_led {
                word.to_lowercase()
            } else {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether an ingredient-shaped line is more likely a direction: two or more
/// action verbs, or a direction-sentence fragment.
pub fn looks_like_direction(line: &str) -> bool {
    action_verb_count(line) >= 2 || contains_direction_fragment(line)
}

/// Split an "or ..." alternative off the name part, if present.
fn split_alternative(rest: &str) -> (String, Option<String>) {
    let lower = rest.to_lowercase();
    if let Some(pos) = lower.find(" or ") {
        let name = rest[..pos].trim().to_string();
        let alternative = rest[pos + 4..].trim().to_string();
        if !name.is_empty() && !alternative.is_empty() {
            return (name, Some(alternative));
        }
    }
    (rest.trim().to_string(), None)
}

/// Parse one candidate ingredient line. Total: every input yields a record;
/// unparseable lines fall through to the whole-line-as-name form with
/// `looks_like_ingredient` cleared.
pub fn parse_ingredient_line(line: &str) -> RawIngredientLine {
    let line = line.trim();

    // (a) Baker's percentage.
    if let Some(caps) = BAKERS_LINE.captures(line) {
        let mut parsed = RawIngredientLine::new(line)
            .with_name(&clean_name(&caps["name"]))
            .with_amount(caps["amount"].trim())
            .with_bakers_percentage(&format!("{}%", &caps["pct"]));
        if let Some(note) = caps.name("note") {
            parsed = parsed.with_preparation(note.as_str().trim());
        }
        return parsed;
    }

    // (b) Standard amount-unit-name.
    if let Some(caps) = STANDARD_LINE.captures(line) {
        let amount_text = caps["amount"].trim().to_string();
        let value = amount_value(&amount_text);
        if let Some(unit) = normalize_unit(&caps["unit"], value) {
            let mut rest = caps["rest"].to_string();

            let mut preparation: Option<String> = None;
            if let Some(paren) = PARENTHETICAL.captures(&rest) {
                let note = paren["note"].trim().to_string();
                if is_reference_note(&note) {
                    preparation = Some(note);
                }
                rest = PARENTHETICAL.replace(&rest, "").trim().to_string();
            }

            let (mut name_part, alternative) = split_alternative(&rest);

            // A comma tail is a preparation note ("butter, softened").
            if preparation.is_none() {
                if let Some((head, tail)) = name_part.clone().split_once(',') {
                    let tail = tail.trim();
                    if !tail.is_empty() && !head.trim().is_empty() {
                        preparation = Some(tail.to_string());
                        name_part = head.trim().to_string();
                    }
                }
            }

            let mut parsed = RawIngredientLine::new(line)
                .with_name(&clean_name(&name_part))
                .with_amount(&amount_text)
                .with_unit(&unit);
            if let Some(prep) = preparation {
                parsed = parsed.with_preparation(&prep);
            }
            if let Some(alt) = alternative {
                parsed = parsed.with_alternative(&alt);
            }
            return parsed;
        }
    }

    // (c) Amount with no unit ("2 eggs").
    if let Some(caps) = BARE_AMOUNT_LINE.captures(line) {
        let rest = caps["rest"].trim();
        if !contains_action_verb(rest) {
            let (name_part, alternative) = split_alternative(rest);
            let mut parsed = RawIngredientLine::new(line)
                .with_name(&clean_name(&name_part))
                .with_amount(caps["amount"].trim());
            if let Some(alt) = alternative {
                parsed = parsed.with_alternative(&alt);
            }
            return parsed;
        }
    }

    // (d) Fallback: whole cleaned line as the name.
    RawIngredientLine::new(line)
        .with_name(&clean_name(line))
        .with_looks_like_ingredient(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_amount_unit_name() {
        let parsed = parse_ingredient_line("2 cups sugar");
        assert_eq!(parsed.amount, Some("2".to_string()));
        assert_eq!(parsed.unit, Some("cups".to_string()));
        assert_eq!(parsed.name, "sugar");
        assert!(parsed.looks_like_ingredient);
    }

    #[test]
    fn test_unit_stays_singular_at_one_or_less() {
        let parsed = parse_ingredient_line("1 cup milk");
        assert_eq!(parsed.unit, Some("cup".to_string()));

        let parsed = parse_ingredient_line("½ cup milk");
        assert_eq!(parsed.unit, Some("cup".to_string()));

        let parsed = parse_ingredient_line("1½ cups flour");
        assert_eq!(parsed.unit, Some("cups".to_string()));
        assert_eq!(parsed.amount, Some("1½".to_string()));
    }

    #[test]
    fn test_unit_surface_forms_normalize() {
        assert_eq!(
            parse_ingredient_line("2 tablespoons oil").unit,
            Some("tbsp".to_string())
        );
        assert_eq!(
            parse_ingredient_line("3 teaspoons salt").unit,
            Some("tsp".to_string())
        );
        assert_eq!(
            parse_ingredient_line("500 grams flour").unit,
            Some("g".to_string())
        );
        assert_eq!(
            parse_ingredient_line("2 liters stock").unit,
            Some("L".to_string())
        );
        assert_eq!(
            parse_ingredient_line("2 parts gin").unit,
            Some("parts".to_string())
        );
    }

    #[test]
    fn test_alternative_clause() {
        let parsed = parse_ingredient_line("1 cup buttermilk or plain yogurt");
        assert_eq!(parsed.name, "buttermilk");
        assert_eq!(parsed.alternative, Some("plain yogurt".to_string()));
    }

    #[test]
    fn test_reference_parenthetical_kept() {
        let parsed = parse_ingredient_line("2 cups chicken stock (see page 42)");
        assert_eq!(parsed.name, "chicken stock");
        assert_eq!(parsed.preparation, Some("see page 42".to_string()));

        let parsed = parse_ingredient_line("1 cup flour (about 125 g)");
        assert_eq!(parsed.preparation, Some("about 125 g".to_string()));
    }

    #[test]
    fn test_noise_parenthetical_dropped() {
        let parsed = parse_ingredient_line("2 cups flour (xj9)");
        assert_eq!(parsed.name, "flour");
        assert_eq!(parsed.preparation, None);
    }

    #[test]
    fn test_comma_tail_becomes_preparation() {
        let parsed = parse_ingredient_line("1 cup butter, softened");
        assert_eq!(parsed.name, "butter");
        assert_eq!(parsed.preparation, Some("softened".to_string()));
    }

    #[test]
    fn test_bare_amount_without_unit() {
        let parsed = parse_ingredient_line("2 eggs");
        assert_eq!(parsed.amount, Some("2".to_string()));
        assert_eq!(parsed.unit, None);
        assert_eq!(parsed.name, "eggs");
        assert!(parsed.looks_like_ingredient);
    }

    #[test]
    fn test_verb_laden_rest_rejected() {
        let parsed = parse_ingredient_line("2 mix everything and stir well");
        assert!(!parsed.looks_like_ingredient);
    }

    #[test]
    fn test_bakers_percentage() {
        let parsed = parse_ingredient_line("bread flour, 100% – 500 g (see page 12)");
        assert_eq!(parsed.name, "bread flour");
        assert_eq!(parsed.bakers_percentage, Some("100%".to_string()));
        assert_eq!(parsed.amount, Some("500 g".to_string()));
        assert_eq!(parsed.preparation, Some("see page 12".to_string()));
    }

    #[test]
    fn test_fallback_keeps_whole_line() {
        let parsed = parse_ingredient_line("a pinch of nostalgia");
        assert_eq!(parsed.name, "a pinch of nostalgia");
        assert!(!parsed.looks_like_ingredient);
    }

    #[test]
    fn test_amount_values() {
        assert_eq!(amount_value("2"), Some(2.0));
        assert_eq!(amount_value("2.5"), Some(2.5));
        assert_eq!(amount_value("1/2"), Some(0.5));
        assert_eq!(amount_value("1 1/2"), Some(1.5));
        assert_eq!(amount_value("½"), Some(0.5));
        assert_eq!(amount_value("1½"), Some(1.5));
        assert_eq!(amount_value("1 ½"), Some(1.5));
        assert_eq!(amount_value("garnish"), None);
        assert_eq!(amount_value("1/0"), None);
    }

    #[test]
    fn test_clean_name_titlecases_all_caps() {
        assert_eq!(clean_name("GRANULATED SUGAR"), "Granulated Sugar");
        assert_eq!(clean_name("JUICE OF ONE LEMON"), "Juice of One Lemon");
        assert_eq!(clean_name("sugar,"), "sugar");
        // Mixed case is left alone.
        assert_eq!(clean_name("Dijon mustard"), "Dijon mustard");
    }

    #[test]
    fn test_looks_like_direction() {
        assert!(looks_like_direction("2 cups mix and stir the batter"));
        assert!(looks_like_direction("1 cup sugar until dissolved"));
        assert!(!looks_like_direction("2 cups sugar"));
    }
}
