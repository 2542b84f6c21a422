//! # Artifact Normalizer
//!
//! Character-level repair of common OCR misreads in recipe text: fraction glyphs
//! read as letter/digit combinations, missing spaces between digits and unit
//! words, inconsistent unit casing, stylized bullets read as digits in cocktail
//! "parts" ratios, and unit words merged with the following word.
//!
//! Rules are applied in a fixed priority order; each rule may assume the earlier
//! rules already ran. The whole pass is idempotent:
//! `normalize(normalize(x)) == normalize(x)`.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_import::artifact_normalizer::normalize_artifacts;
//!
//! assert_eq!(normalize_artifacts("12 cup sugar"), "½ cup sugar");
//! assert_eq!(normalize_artifacts("500g flour"), "500 g flour");
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

/// Unit words used as right-hand context for amount repairs.
const UNIT_CONTEXT: &str = "cups?|tablespoons?|tbsp|teaspoons?|tsp|ounces?|oz|pounds?|lbs?|grams?|g|kg|ml|liters?|litres?|parts?|pinch(?:es)?|quarts?|pints?";

lazy_static! {
    /// Ordered substitution rules. Order matters: the word-merge, bullet, and
    /// digit/unit spacing splits run first so the fraction and misread repairs
    /// see separated amounts, and a single pass reaches the fixpoint (inputs
    /// like "1/2cup" need the spacing fix before the fraction rule can match).
    static ref RULES: Vec<(Regex, String)> = {
        let unit = UNIT_CONTEXT;
        // The regex crate has no lookaround, so right-hand unit context is
        // captured and carried into the replacement instead.
        let raw: Vec<(String, String)> = vec![
            // 1. Unit word merged with the following word ("2 cupsflour").
            (
                r"(?i)\b(\d\s*(?:cups?|tablespoons?|tbsp|teaspoons?|tsp))([a-z]{3,})\b".to_string(),
                "$1 $2".to_string(),
            ),
            // 2. Stylized bullets misread as the digit in "parts" ratios.
            //    Before the spacing fix, since these can create "1parts".
            (r"[•●○◦·\*](\s*(?i:parts?)\b)".to_string(), "1$1".to_string()),
            (r"(?m)^e(\s+(?i:parts?)\b)".to_string(), "1$1".to_string()),
            // 3. Missing space between a digit and a unit word.
            (format!(r"(\d)((?i:{unit})\b)"), "$1 $2".to_string()),
            // 4. ASCII fractions to vulgar glyphs, mixed numbers first so the
            //    whole part stays attached ("1 1/2" -> "1½").
            (r"\b(\d+)\s+1/2\b".to_string(), "${1}½".to_string()),
            (r"\b(\d+)\s+1/4\b".to_string(), "${1}¼".to_string()),
            (r"\b(\d+)\s+3/4\b".to_string(), "${1}¾".to_string()),
            (r"\b(\d+)\s+1/3\b".to_string(), "${1}⅓".to_string()),
            (r"\b(\d+)\s+2/3\b".to_string(), "${1}⅔".to_string()),
            (r"\b(\d+)\s+2/4\b".to_string(), "${1}½".to_string()),
            (r"\b1/2\b".to_string(), "½".to_string()),
            (r"\b1/4\b".to_string(), "¼".to_string()),
            (r"\b3/4\b".to_string(), "¾".to_string()),
            (r"\b1/3\b".to_string(), "⅓".to_string()),
            (r"\b2/3\b".to_string(), "⅔".to_string()),
            (r"\b2/4\b".to_string(), "½".to_string()),
            // 5. Letter/digit misreads of fraction glyphs, only in amount
            //    position (directly before a unit word).
            (format!(r"\b[VvYy]4(\s+(?i:{unit})\b)"), "¼$1".to_string()),
            (format!(r"\bV2(\s+(?i:{unit})\b)"), "½$1".to_string()),
            (format!(r"\bYa(\s+(?i:{unit})\b)"), "½$1".to_string()),
            (format!(r"\bV[es](\s+(?i:{unit})\b)"), "⅓$1".to_string()),
            (format!(r"\b94(\s+(?i:{unit})\b)"), "¾$1".to_string()),
            (
                r"\b12(\s+(?i:cups?|tablespoons?|tbsp|teaspoons?|tsp)\b)".to_string(),
                "½$1".to_string(),
            ),
            // 6. Lowercase l misread as the digit 1 before a unit word.
            (format!(r"\bl(\s+(?i:{unit})\b)"), "1$1".to_string()),
        ];

        raw.into_iter()
            .map(|(pattern, replacement)| {
                (
                    Regex::new(&pattern).expect("normalization pattern should be valid"),
                    replacement,
                )
            })
            .collect()
    };

    /// Unit words whose casing gets normalized to lowercase.
    static ref UNIT_CASING: Regex = Regex::new(&format!(r"(?i)\b({UNIT_CONTEXT})\b"))
        .expect("unit casing pattern should be valid");
}

/// Applies the ordered OCR artifact repair rules to raw recognized text.
pub struct ArtifactNormalizer;

impl ArtifactNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Run all repair rules over the text in priority order.
    pub fn normalize(&self, text: &str) -> String {
        let mut repaired = text.to_string();

        for (pattern, replacement) in RULES.iter() {
            let before = repaired;
            repaired = pattern.replace_all(&before, replacement.as_str()).to_string();
            if before != repaired {
                trace!("artifact rule '{}' fired", pattern.as_str());
            }
        }

        // Unit casing last, once the amounts and spacing are canonical.
        repaired = UNIT_CASING
            .replace_all(&repaired, |caps: &regex::Captures<'_>| {
                caps[1].to_lowercase()
            })
            .to_string();

        repaired
    }
}

impl Default for ArtifactNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper around [`ArtifactNormalizer::normalize`].
pub fn normalize_artifacts(text: &str) -> String {
    ArtifactNormalizer::new().normalize(text)
}
