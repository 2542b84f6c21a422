//! # Confidence Scorer
//!
//! Deterministic, rule-derived confidence estimates for the extracted
//! ingredient and direction lists. Title, serves, time, and course scores are
//! assigned at their extraction sites; the two list scores live here because
//! they depend on the segmentation outcome as a whole.

use crate::import_model::RawIngredientLine;

/// Fraction of parsed lines that look like real ingredients, scaled to 0.6,
/// plus 0.2 when an explicit ingredients header was seen.
pub fn ingredient_confidence(lines: &[RawIngredientLine], saw_header: bool) -> f32 {
    if lines.is_empty() {
        return 0.0;
    }
    let plausible = lines.iter().filter(|l| l.looks_like_ingredient).count();
    let fraction = plausible as f32 / lines.len() as f32;
    let mut confidence = fraction * 0.6;
    if saw_header {
        confidence += 0.2;
    }
    confidence.clamp(0.0, 1.0)
}

/// 0.4 base when any direction was found, plus 0.2 for an explicit header,
/// plus 0.1 when at least three steps were extracted.
pub fn direction_confidence(count: usize, saw_header: bool) -> f32 {
    if count == 0 {
        return 0.0;
    }
    let mut confidence: f32 = 0.4;
    if saw_header {
        confidence += 0.2;
    }
    if count >= 3 {
        confidence += 0.1;
    }
    confidence.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plausible(text: &str) -> RawIngredientLine {
        RawIngredientLine::new(text)
    }

    fn implausible(text: &str) -> RawIngredientLine {
        let mut line = RawIngredientLine::new(text);
        line.looks_like_ingredient = false;
        line
    }

    #[test]
    fn test_no_ingredients_scores_zero() {
        assert_eq!(ingredient_confidence(&[], true), 0.0);
    }

    #[test]
    fn test_all_plausible_with_header() {
        let lines = vec![plausible("2 cups flour"), plausible("1 cup sugar")];
        let confidence = ingredient_confidence(&lines, true);
        assert!((confidence - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_half_plausible_without_header() {
        let lines = vec![plausible("2 cups flour"), implausible("pinch of salt")];
        let confidence = ingredient_confidence(&lines, false);
        assert!((confidence - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_no_directions_scores_zero() {
        assert_eq!(direction_confidence(0, true), 0.0);
    }

    #[test]
    fn test_direction_base_score() {
        assert!((direction_confidence(1, false) - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn test_direction_full_score() {
        assert!((direction_confidence(4, true) - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_scores_within_unit_interval() {
        for count in 0..10 {
            for saw_header in [false, true] {
                let confidence = direction_confidence(count, saw_header);
                assert!((0.0..=1.0).contains(&confidence));
            }
        }
    }
}
