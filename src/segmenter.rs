//! # Content Segmenter
//!
//! The core state machine of the import pipeline. Splits the normalized body
//! text into ingredient lines, direction lines, garnishes, and nutrition
//! facts, and discards narrative prose.
//!
//! ## Phases
//!
//! 1. **Pre-pass**: line reshaping. Merges probable multi-line ingredient
//!    continuations, splits merged two-column lines, and pairs standalone bare
//!    numbers with adjacent food-noun lines.
//! 2. **Main pass**: each line runs through an ordered rule table until one
//!    rule claims it. Rules switch the segmentation state on section headers
//!    and on classification signals.
//! 3. **Post-pass**: paragraph text is split into sentences, directions are
//!    re-split and filtered, explicitly numbered steps are reordered by their
//!    numeric label, and a buffered metric column is paired positionally with
//!    the parsed ingredients.

use crate::import_model::{NutritionFacts, RawIngredientLine};
use crate::ingredient_parser::{looks_like_direction, parse_ingredient_line};
use crate::vocabulary::{
    contains_action_verb, contains_direction_fragment, is_serves_line,
    narrative_hit_count, starts_with_action_verb, AMOUNT_PREFIX, FOOD_NOUNS, METADATA_WORDS,
    NUMBERED_STEP, SECTION_HEADER, TIP_EXCLUSIONS,
};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::trace;

lazy_static! {
    static ref GARNISH_LINE: Regex =
        Regex::new(r"(?i)^\s*(?:to\s+|for\s+)?garnish\s*(?::\s*(.+)|with\s+(.+))$").unwrap();
    static ref BARE_NUMBER: Regex = Regex::new(r"^\d+$").unwrap();
    static ref METRIC_VALUE: Regex =
        Regex::new(r"(?i)^\s*\d+(?:\.\d+)?\s*(?:g|kg|ml|l|oz|lb)\s*\.?\s*$").unwrap();
    static ref SENTENCE_BOUNDARY: Regex = Regex::new(r"\.\s+[A-Z]").unwrap();
    static ref SERVING_SIZE: Regex =
        Regex::new(r"(?i)\bper\s+(serving|bar|portion|slice|cookie)\b").unwrap();
    static ref NUTRIENT_PATTERNS: Vec<(Nutrient, Regex, Regex)> = {
        let labels: &[(Nutrient, &str)] = &[
            (Nutrient::Calories, r"cal(?:ories)?|kcal"),
            (Nutrient::Fat, r"fat"),
            (Nutrient::Carbohydrates, r"carb(?:ohydrate)?s?"),
            (Nutrient::Protein, r"protein"),
            (Nutrient::Fiber, r"fib(?:er|re)"),
            (Nutrient::Sodium, r"sodium"),
            (Nutrient::Sugar, r"sugars?"),
        ];
        labels
            .iter()
            .map(|(nutrient, label)| {
                let before = Regex::new(&format!(
                    r"(?i)\b(\d+(?:\.\d+)?\s*(?:mg|g)?)\s*(?:of\s+)?(?:{label})\b"
                ))
                .expect("nutrient pattern should be valid");
                let after = Regex::new(&format!(
                    r"(?i)\b(?:{label})\b\s*:?\s*(\d+(?:\.\d+)?\s*(?:mg|g)?)"
                ))
                .expect("nutrient pattern should be valid");
                (*nutrient, before, after)
            })
            .collect()
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nutrient {
    Calories,
    Fat,
    Carbohydrates,
    Protein,
    Fiber,
    Sodium,
    Sugar,
}

/// Segmentation state, advanced by section headers and classification signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SegmentState {
    #[default]
    ScanningPrelude,
    InIngredients,
    InDirections,
    InMetricColumn,
}

/// Everything the segmenter extracted from the body text.
#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    pub ingredients: Vec<RawIngredientLine>,
    pub directions: Vec<String>,
    pub garnishes: Vec<String>,
    pub nutrition: Option<NutritionFacts>,
    pub saw_ingredient_header: bool,
    pub saw_direction_header: bool,
}

/// Per-invocation working state. Created fresh for every call to [`segment`],
/// never shared.
#[derive(Debug, Default)]
pub struct ContentSegmenter {
    state: SegmentState,
    current_section: Option<String>,
    ingredients: Vec<RawIngredientLine>,
    directions: Vec<(Option<u32>, String)>,
    garnishes: Vec<String>,
    nutrition: NutritionFacts,
    paragraph_buffer: Vec<String>,
    metric_buffer: Vec<String>,
    saw_ingredient_header: bool,
    saw_direction_header: bool,
}

type Predicate = fn(&ContentSegmenter, &str) -> bool;
type Action = fn(&mut ContentSegmenter, &str);

/// One classification rule. The table order is the documented priority order;
/// the first matching rule consumes the line.
struct Rule {
    name: &'static str,
    matches: Predicate,
    apply: Action,
}

const RULES: &[Rule] = &[
    Rule {
        name: "serving-count",
        matches: |_, line| is_serves_line(line),
        apply: |_, _| {},
    },
    Rule {
        name: "section-header",
        matches: |_, line| SECTION_HEADER.is_match(line),
        apply: ContentSegmenter::switch_section,
    },
    Rule {
        name: "garnish",
        matches: |_, line| GARNISH_LINE.is_match(line),
        apply: ContentSegmenter::take_garnish,
    },
    Rule {
        name: "nutrition-fact",
        matches: |_, line| is_nutrition_line(line),
        apply: ContentSegmenter::take_nutrition,
    },
    Rule {
        name: "narrative-prose",
        matches: |_, line| narrative_hit_count(line) >= 2,
        apply: |_, line| trace!(line, "discarding narrative prose"),
    },
    Rule {
        name: "direction-continuation",
        matches: |segmenter, line| {
            !segmenter.directions.is_empty() && is_direction_continuation(line)
        },
        apply: ContentSegmenter::extend_last_direction,
    },
    Rule {
        name: "numbered-step",
        matches: |_, line| NUMBERED_STEP.is_match(line),
        apply: ContentSegmenter::take_numbered_step,
    },
    Rule {
        name: "leading-action-verb",
        matches: |_, line| starts_with_action_verb(line),
        apply: |segmenter, line| segmenter.push_direction(None, line),
    },
    Rule {
        name: "paragraph-direction",
        matches: |_, line| line.chars().count() > 80 && SENTENCE_BOUNDARY.is_match(line),
        apply: |segmenter, line| segmenter.paragraph_buffer.push(line.to_string()),
    },
    Rule {
        name: "metric-column-value",
        matches: |segmenter, line| {
            METRIC_VALUE.is_match(line)
                && (!segmenter.ingredients.is_empty()
                    || segmenter.state == SegmentState::InMetricColumn)
        },
        apply: |segmenter, line| segmenter.metric_buffer.push(line.trim().to_string()),
    },
    Rule {
        name: "ingredient-grammar",
        matches: |_, line| AMOUNT_PREFIX.is_match(line) && !looks_like_direction(line),
        apply: ContentSegmenter::take_ingredient,
    },
    Rule {
        name: "ambiguous-fallback",
        matches: |_, _| true,
        apply: ContentSegmenter::resolve_ambiguous,
    },
];

impl ContentSegmenter {
    fn switch_section(&mut self, line: &str) {
        let lower = line.trim().to_lowercase();
        if lower.starts_with("for the") {
            self.current_section = Some(line.trim().trim_end_matches(':').to_string());
            self.state = SegmentState::InIngredients;
        } else if lower.contains("metric") {
            self.state = SegmentState::InMetricColumn;
        } else if lower.contains("ingredient") {
            self.state = SegmentState::InIngredients;
            self.saw_ingredient_header = true;
        } else {
            self.state = SegmentState::InDirections;
            self.saw_direction_header = true;
        }
        trace!(line, state = ?self.state, "section header");
    }

    fn take_garnish(&mut self, line: &str) {
        if let Some(caps) = GARNISH_LINE.captures(line) {
            let text = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().trim().trim_end_matches('.'))
                .unwrap_or_default();
            if !text.is_empty() {
                self.garnishes.push(text.to_string());
            }
        }
    }

    fn take_nutrition(&mut self, line: &str) {
        if let Some(caps) = SERVING_SIZE.captures(line) {
            self.nutrition.serving_size = Some(caps[1].to_string());
        }
        for (nutrient, value_before, value_after) in NUTRIENT_PATTERNS.iter() {
            let value = value_before
                .captures(line)
                .or_else(|| value_after.captures(line))
                .map(|c| c[1].trim().to_string());
            let Some(value) = value else {
                continue;
            };
            let slot = match nutrient {
                Nutrient::Calories => &mut self.nutrition.calories,
                Nutrient::Fat => &mut self.nutrition.fat,
                Nutrient::Carbohydrates => &mut self.nutrition.carbohydrates,
                Nutrient::Protein => &mut self.nutrition.protein,
                Nutrient::Fiber => &mut self.nutrition.fiber,
                Nutrient::Sodium => &mut self.nutrition.sodium,
                Nutrient::Sugar => &mut self.nutrition.sugar,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
    }

    fn extend_last_direction(&mut self, line: &str) {
        if let Some((_, text)) = self.directions.last_mut() {
            text.push(' ');
            text.push_str(line.trim());
        }
    }

    fn take_numbered_step(&mut self, line: &str) {
        if let Some(caps) = NUMBERED_STEP.captures(line) {
            let number = caps
                .get(1)
                .or_else(|| caps.get(2))
                .and_then(|m| m.as_str().parse().ok());
            self.push_direction(number, &caps[3]);
        }
    }

    fn push_direction(&mut self, number: Option<u32>, text: &str) {
        self.state = SegmentState::InDirections;
        self.directions.push((number, text.trim().to_string()));
    }

    fn take_ingredient(&mut self, line: &str) {
        let mut parsed = parse_ingredient_line(line);
        parsed.section = self.current_section.clone();
        trace!(line, name = %parsed.name, "classified as ingredient");
        self.ingredients.push(parsed);
        if self.state == SegmentState::ScanningPrelude {
            self.state = SegmentState::InIngredients;
        }
    }

    fn resolve_ambiguous(&mut self, line: &str) {
        match self.state {
            SegmentState::InIngredients => self.take_ingredient(line),
            SegmentState::InDirections => self.push_direction(None, line),
            SegmentState::InMetricColumn => {
                if METRIC_VALUE.is_match(line) {
                    self.metric_buffer.push(line.trim().to_string());
                }
            }
            SegmentState::ScanningPrelude => {
                // Short verb-free prelude lines are most likely ingredients;
                // everything else is buffered as prose for sentence splitting.
                if line.chars().count() < 60 && !contains_action_verb(line) {
                    self.take_ingredient(line);
                } else {
                    self.paragraph_buffer.push(line.to_string());
                }
            }
        }
    }

    fn finish(mut self) -> Segmentation {
        self.flush_paragraph_buffer();
        self.resplit_directions();
        let directions = self.reconcile_numbered_steps();
        self.pair_metric_column();

        Segmentation {
            ingredients: self.ingredients,
            directions,
            garnishes: self.garnishes,
            nutrition: if self.nutrition.is_empty() {
                None
            } else {
                Some(self.nutrition)
            },
            saw_ingredient_header: self.saw_ingredient_header,
            saw_direction_header: self.saw_direction_header,
        }
    }

    /// Split buffered paragraph text into sentences, dropping tips and
    /// storytelling, keeping sentences that read like steps.
    fn flush_paragraph_buffer(&mut self) {
        if self.paragraph_buffer.is_empty() {
            return;
        }
        let joined = self.paragraph_buffer.join(" ");
        self.paragraph_buffer.clear();
        for sentence in split_sentences(&joined) {
            let lower = sentence.to_lowercase();
            if TIP_EXCLUSIONS.iter().any(|t| lower.contains(t)) {
                continue;
            }
            if contains_action_verb(&sentence) || sentence.chars().count() < 50 {
                self.directions.push((None, sentence));
            }
        }
    }

    /// Re-split accumulated directions on sentence boundaries, dropping short
    /// fragments, prose, and metadata phrases that are not actual steps.
    fn resplit_directions(&mut self) {
        let mut resplit: Vec<(Option<u32>, String)> = Vec::new();
        for (number, text) in self.directions.drain(..) {
            for sentence in split_sentences(&text) {
                if sentence.chars().count() < 5 || narrative_hit_count(&sentence) >= 2 {
                    continue;
                }
                let lower = sentence.to_lowercase();
                if METADATA_WORDS.iter().any(|w| lower.contains(w))
                    || TIP_EXCLUSIONS.iter().any(|t| lower.contains(t))
                {
                    continue;
                }
                resplit.push((number, sentence));
            }
        }
        self.directions = resplit;
    }

    /// Emit explicitly numbered steps in ascending label order, concatenating
    /// duplicate labels (a step OCR split in two), then unnumbered directions
    /// in discovery order.
    fn reconcile_numbered_steps(&mut self) -> Vec<String> {
        let mut numbered: BTreeMap<u32, String> = BTreeMap::new();
        let mut unnumbered: Vec<String> = Vec::new();

        for (number, text) in self.directions.drain(..) {
            match number {
                Some(n) => match numbered.get_mut(&n) {
                    Some(existing) => {
                        existing.push(' ');
                        existing.push_str(&text);
                    }
                    None => {
                        numbered.insert(n, text);
                    }
                },
                None => unnumbered.push(text),
            }
        }

        let mut directions: Vec<String> = numbered.into_values().collect();
        directions.extend(unnumbered);
        directions
    }

    /// Append buffered metric values positionally to the parsed ingredients
    /// when the counts plausibly line up.
    fn pair_metric_column(&mut self) {
        if self.metric_buffer.is_empty() || self.ingredients.is_empty() {
            return;
        }
        let metric_count = self.metric_buffer.len();
        let ingredient_count = self.ingredients.len();
        let diff = metric_count.abs_diff(ingredient_count);
        let ratio = metric_count as f64 / ingredient_count as f64;
        if diff > 2 && !(0.7..=1.3).contains(&ratio) {
            debug!(
                "discarding metric column: {} values for {} ingredients",
                metric_count, ingredient_count
            );
            self.metric_buffer.clear();
            return;
        }
        for (ingredient, metric) in self.ingredients.iter_mut().zip(self.metric_buffer.drain(..)) {
            ingredient.push_preparation(&metric);
        }
    }
}

fn is_direction_continuation(line: &str) -> bool {
    const CONNECTORS: &[&str] = &["then ", "and ", "continue ", "meanwhile", "repeat "];
    let lower = line.to_lowercase();
    if CONNECTORS.iter().any(|c| lower.starts_with(c)) {
        return true;
    }
    line.chars().next().is_some_and(|c| c.is_lowercase() && c.is_alphabetic())
}

fn is_nutrition_line(line: &str) -> bool {
    if SERVING_SIZE.is_match(line) {
        return true;
    }
    if !line.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    const NUTRITION_WORDS: &[&str] = &[
        "cal", "fat", "carb", "protein", "fiber", "fibre", "sodium", "sugar",
    ];
    let lower = line.to_lowercase();
    NUTRITION_WORDS.iter().filter(|w| lower.contains(*w)).count() >= 2
}

/// Split text at "period + whitespace + capital" boundaries. The period stays
/// with the preceding sentence.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for found in SENTENCE_BOUNDARY.find_iter(text) {
        let boundary = found.start() + 1;
        let sentence = text[start..boundary].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        start = found.end() - 1;
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

fn is_all_caps_fragment(line: &str) -> bool {
    line.chars().count() < 30
        && line.chars().any(|c| c.is_alphabetic())
        && !line.chars().any(|c| c.is_lowercase())
        && !contains_action_verb(&line.to_lowercase())
}

/// Whether a short follow-up line should be merged into the pending
/// ingredient line above it.
fn is_ingredient_continuation(line: &str) -> bool {
    if line.chars().count() >= 50
        || AMOUNT_PREFIX.is_match(line)
        || line.chars().next().is_some_and(|c| c.is_ascii_digit())
        || contains_direction_fragment(line)
    {
        return false;
    }
    let lower = line.to_lowercase();
    let padded = format!(" {lower} ");
    line.starts_with('(')
        || padded.contains(" or ")
        || lower.contains("page")
        || lower.contains("optional")
        || lower.contains("unsweetened")
        || lower.contains("homemade")
        || lower.contains("store-bought")
        || is_all_caps_fragment(line)
}

/// Split a merged two-column line into its ingredient and direction parts.
/// Prefers a run of two or more spaces; falls back to a space before a
/// capitalized word past the line's midpoint, so a capitalized word inside
/// the ingredient name does not trigger the split.
fn split_two_column_line(line: &str) -> Option<(String, String)> {
    let total = line.chars().count();
    if total <= 50 || !AMOUNT_PREFIX.is_match(line) || !contains_action_verb(line) {
        return None;
    }
    if let Some(index) = line.find("  ") {
        let (left, right) = line.split_at(index);
        return Some((left.trim().to_string(), right.trim().to_string()));
    }
    let midpoint = total / 2;
    let mut previous_space = false;
    for (position, (index, c)) in line.char_indices().enumerate() {
        if previous_space && c.is_uppercase() && position > midpoint {
            let (left, right) = line.split_at(index);
            return Some((left.trim().to_string(), right.trim().to_string()));
        }
        previous_space = c == ' ';
    }
    None
}

/// Pre-pass line reshaping over trimmed, non-empty lines.
fn reshape_lines(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut reshaped: Vec<String> = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];

        if let Some((ingredient_part, direction_part)) = split_two_column_line(line) {
            trace!(line, "splitting two-column line");
            reshaped.push(ingredient_part);
            reshaped.push(direction_part);
            index += 1;
            continue;
        }

        // A bare number next to a standalone food noun, in either order, is a
        // vertically misaligned ingredient.
        if index + 1 < lines.len() {
            let next = lines[index + 1];
            if BARE_NUMBER.is_match(line) && FOOD_NOUNS.contains(&next.to_lowercase().as_str()) {
                reshaped.push(format!("{line} {next}"));
                index += 2;
                continue;
            }
            if FOOD_NOUNS.contains(&line.to_lowercase().as_str()) && BARE_NUMBER.is_match(next) {
                reshaped.push(format!("{next} {line}"));
                index += 2;
                continue;
            }
        }

        if is_ingredient_continuation(line) {
            if let Some(previous) = reshaped.last_mut() {
                if AMOUNT_PREFIX.is_match(previous) {
                    previous.push(' ');
                    previous.push_str(line);
                    index += 1;
                    continue;
                }
            }
        }

        reshaped.push(line.to_string());
        index += 1;
    }

    reshaped
}

/// Segment the normalized body text. Always succeeds; unclassifiable lines
/// fall through to the ambiguous-line default.
pub fn segment(text: &str) -> Segmentation {
    let mut segmenter = ContentSegmenter::default();

    for line in reshape_lines(text) {
        for rule in RULES {
            if (rule.matches)(&segmenter, &line) {
                trace!(line = %line, rule = rule.name, "rule claimed line");
                (rule.apply)(&mut segmenter, &line);
                break;
            }
        }
    }

    segmenter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_switches_state() {
        let segmentation = segment("Ingredients:\n2 cups flour\nDirections:\nMix well.");
        assert_eq!(segmentation.ingredients.len(), 1);
        assert_eq!(segmentation.ingredients[0].name, "flour");
        assert_eq!(segmentation.directions, vec!["Mix well."]);
        assert!(segmentation.saw_ingredient_header);
        assert!(segmentation.saw_direction_header);
    }

    #[test]
    fn test_ingredient_without_header() {
        let segmentation = segment("2 cups sugar");
        assert_eq!(segmentation.ingredients.len(), 1);
        assert_eq!(segmentation.ingredients[0].amount.as_deref(), Some("2"));
        assert_eq!(segmentation.ingredients[0].unit.as_deref(), Some("cups"));
        assert_eq!(segmentation.ingredients[0].name, "sugar");
        assert!(!segmentation.saw_ingredient_header);
    }

    #[test]
    fn test_serves_line_skipped() {
        let segmentation = segment("Serves 4\n2 cups flour");
        assert_eq!(segmentation.ingredients.len(), 1);
        assert!(segmentation.directions.is_empty());
    }

    #[test]
    fn test_numbered_steps_reordered_by_label() {
        let segmentation = segment("2. Mix flour.\n1. Preheat oven.");
        assert_eq!(
            segmentation.directions,
            vec!["Preheat oven.", "Mix flour."]
        );
    }

    #[test]
    fn test_duplicate_step_numbers_concatenate() {
        let segmentation =
            segment("1. Preheat oven\n1. to 350 degrees and grease the pan well");
        assert_eq!(segmentation.directions.len(), 1);
        assert!(segmentation.directions[0].starts_with("Preheat oven"));
        assert!(segmentation.directions[0].contains("350 degrees"));
    }

    #[test]
    fn lowercase_short_line_extends_previous_step() {
        let segmentation = segment("Whisk the eggs with the sugar\nuntil pale and thick");
        assert_eq!(
            segmentation.directions,
            vec!["Whisk the eggs with the sugar until pale and thick"]
        );
    }

    #[test]
    fn test_garnish_line_collected() {
        let segmentation = segment("2 parts gin\nGarnish: lime wheel");
        assert_eq!(segmentation.garnishes, vec!["lime wheel"]);
        assert_eq!(segmentation.ingredients.len(), 1);
    }

    #[test]
    fn test_garnish_with_form() {
        let segmentation = segment("Garnish with a sprig of mint.");
        assert_eq!(segmentation.garnishes, vec!["a sprig of mint"]);
    }

    #[test]
    fn test_nutrition_line_harvested() {
        let segmentation = segment("Per serving: 250 calories, 12 g fat, 8 g protein");
        let nutrition = segmentation.nutrition.unwrap();
        assert_eq!(nutrition.serving_size.as_deref(), Some("serving"));
        assert_eq!(nutrition.calories.as_deref(), Some("250"));
        assert_eq!(nutrition.fat.as_deref(), Some("12 g"));
        assert_eq!(nutrition.protein.as_deref(), Some("8 g"));
        assert!(segmentation.ingredients.is_empty());
        assert!(segmentation.directions.is_empty());
    }

    #[test]
    fn test_narrative_prose_discarded() {
        let segmentation =
            segment("My grandmother made this every Christmas holiday\n2 cups flour");
        assert_eq!(segmentation.ingredients.len(), 1);
        assert!(segmentation.directions.is_empty());
    }

    #[test]
    fn test_long_verbless_prelude_dropped_as_prose() {
        let segmentation =
            segment("This recipe has been passed down in our family for three generations.");
        assert!(segmentation.ingredients.is_empty());
        assert!(segmentation.directions.is_empty());
    }

    #[test]
    fn test_continuation_merged_into_ingredient() {
        let segmentation = segment("1 cup cocoa powder\nunsweetened, page 42");
        assert_eq!(segmentation.ingredients.len(), 1);
        assert!(segmentation.ingredients[0].text.contains("unsweetened"));
    }

    #[test]
    fn test_bare_number_pairs_with_food_noun() {
        let segmentation = segment("3\neggs");
        assert_eq!(segmentation.ingredients.len(), 1);
        assert_eq!(segmentation.ingredients[0].amount.as_deref(), Some("3"));
        assert_eq!(segmentation.ingredients[0].name, "eggs");
    }

    #[test]
    fn test_two_column_line_split() {
        let text = "2 cups flour  Preheat the oven to 350 degrees and grease the pan";
        let segmentation = segment(text);
        assert_eq!(segmentation.ingredients.len(), 1);
        assert_eq!(segmentation.ingredients[0].name, "flour");
        assert_eq!(segmentation.directions.len(), 1);
        assert!(segmentation.directions[0].starts_with("Preheat"));
    }

    #[test]
    fn test_single_space_column_split_past_midpoint() {
        let text = "1 cup roasted unsalted peanuts chopped very fine Toss with the dressing";
        let segmentation = segment(text);
        assert_eq!(segmentation.ingredients.len(), 1);
        assert!(segmentation.ingredients[0].text.starts_with("1 cup"));
        assert_eq!(segmentation.directions.len(), 1);
        assert!(segmentation.directions[0].starts_with("Toss"));
    }

    #[test]
    fn test_capital_before_midpoint_does_not_split() {
        let text = "1 teaspoon Dijon mustard Mix with a small pinch of cayenne pepper";
        let segmentation = segment(text);
        assert_eq!(segmentation.ingredients.len(), 1);
        assert!(segmentation.directions.is_empty());
    }

    #[test]
    fn test_metric_column_paired_positionally() {
        let text = "2 cups flour\n1 cup sugar\nMetric\n250 g\n200 g";
        let segmentation = segment(text);
        assert_eq!(segmentation.ingredients.len(), 2);
        assert_eq!(
            segmentation.ingredients[0].preparation.as_deref(),
            Some("250 g")
        );
        assert_eq!(
            segmentation.ingredients[1].preparation.as_deref(),
            Some("200 g")
        );
    }

    #[test]
    fn test_unreliable_metric_column_discarded() {
        let text = "2 cups flour\nMetric\n250 g\n200 g\n100 g\n50 g\n25 g\n10 g";
        let segmentation = segment(text);
        assert_eq!(segmentation.ingredients.len(), 1);
        assert!(segmentation.ingredients[0].preparation.is_none());
    }

    #[test]
    fn test_paragraph_split_into_sentences() {
        let text = "Cream the butter and sugar until fluffy. Add the eggs one at a time. Fold in the flour gently until just combined.";
        let segmentation = segment(text);
        assert_eq!(segmentation.directions.len(), 3);
        assert_eq!(segmentation.directions[0], "Cream the butter and sugar until fluffy.");
    }

    #[test]
    fn test_tip_sentence_dropped_from_paragraph() {
        let text = "Bake for 30 minutes until golden on top and springy. Tip: can be stored in an airtight tin for up to a week easily.";
        let segmentation = segment(text);
        assert_eq!(segmentation.directions.len(), 1);
        assert!(segmentation.directions[0].starts_with("Bake"));
    }

    #[test]
    fn test_metadata_phrase_dropped_on_resplit() {
        let segmentation = segment("Mix the dough well. Hands on time 20 minutes.");
        assert_eq!(segmentation.directions, vec!["Mix the dough well."]);
    }

    #[test]
    fn test_for_the_header_sets_section() {
        let segmentation = segment("For the frosting:\n1 cup powdered sugar");
        assert_eq!(segmentation.ingredients.len(), 1);
        assert_eq!(
            segmentation.ingredients[0].section.as_deref(),
            Some("For the frosting")
        );
    }

    #[test]
    fn test_ambiguous_short_line_in_ingredients_state() {
        let segmentation = segment("Ingredients:\npinch of salt");
        assert_eq!(segmentation.ingredients.len(), 1);
        assert!(!segmentation.ingredients[0].looks_like_ingredient);
        assert_eq!(segmentation.ingredients[0].text, "pinch of salt");
    }

    #[test]
    fn test_empty_input() {
        let segmentation = segment("");
        assert!(segmentation.ingredients.is_empty());
        assert!(segmentation.directions.is_empty());
        assert!(segmentation.garnishes.is_empty());
        assert!(segmentation.nutrition.is_none());
    }

    #[test]
    fn test_split_sentences_boundaries() {
        let sentences = split_sentences("First step here. Second step there. third not split");
        assert_eq!(
            sentences,
            vec!["First step here.", "Second step there. third not split"]
        );
    }

    #[test]
    fn test_state_record_is_per_invocation() {
        let first = segment("Directions:\nMix well.");
        let second = segment("2 cups flour");
        assert_eq!(first.directions.len(), 1);
        assert!(second.directions.is_empty());
        assert_eq!(second.ingredients.len(), 1);
    }
}
