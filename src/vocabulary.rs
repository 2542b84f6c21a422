//! # Shared Vocabulary and Patterns
//!
//! Keyword sets and regex patterns shared across the pipeline stages: cooking
//! action verbs, narrative/story vocabulary, direction fragments, measurement
//! words, and the amount-prefix grammar that triggers ingredient classification.
//!
//! All patterns are compiled once into lazy statics to avoid recompilation.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// Cooking action verbs that mark a line as a direction when leading it, and
/// contribute to action-verb density checks elsewhere.
pub const ACTION_VERBS: &[&str] = &[
    "preheat", "heat", "mix", "stir", "combine", "whisk", "beat", "cream", "fold",
    "add", "pour", "cook", "bake", "roast", "grill", "fry", "saute", "sauté",
    "simmer", "boil", "reduce", "bring", "melt", "dissolve", "knead", "roll",
    "spread", "sprinkle", "drizzle", "season", "toss", "arrange", "place", "put",
    "transfer", "remove", "drain", "strain", "set", "let", "allow", "cover",
    "chill", "refrigerate", "freeze", "cool", "rest", "grease", "line", "divide",
    "shape", "cut", "slice", "chop", "dice", "mince", "grate", "blend", "process",
    "puree", "purée", "shake", "muddle", "top", "serve", "repeat", "flip", "turn",
    "press", "brush", "coat", "dust", "fill", "spoon", "scrape", "wash", "rinse",
    "pat", "trim", "discard", "reserve", "soak", "marinate", "whip", "temper",
];

/// Fragments that are typical of the middle of a direction sentence. A line
/// matching one of these is never merged into a pending ingredient, and an
/// ingredient-shaped line containing one is flagged as a likely direction.
pub const DIRECTION_FRAGMENTS: &[&str] = &[
    "until", "set aside", "to the boil", "from the heat", "over medium",
    "over high", "over low", "for about", "at a time", "to a boil", "in a bowl",
    "in a pan", "in a saucepan", "on a baking sheet", "to taste and", "if needed",
    "before serving", "while whisking", "occasionally", "constantly",
];

/// Historical/story vocabulary; two or more hits on a line mark it as narrative
/// prose to discard.
pub const NARRATIVE_WORDS: &[&str] = &[
    "grandmother", "grandma", "family", "tradition", "traditional", "childhood",
    "favorite", "favourite", "remember", "memories", "originally", "history",
    "century", "version", "classic", "restaurant", "chef", "cookbook", "village",
    "holiday", "holidays", "christmas", "thanksgiving", "always", "growing up",
    "my mother", "my father", "years ago", "first time", "friends", "loved",
];

/// Sentences matching one of these are tips or storytelling, not steps, and are
/// dropped during paragraph splitting.
pub const TIP_EXCLUSIONS: &[&str] = &[
    "tip:", "note:", "can be stored", "keeps for", "will keep", "make ahead",
    "leftovers", "variation:", "chef's note", "did you know", "fun fact",
];

/// Metadata phrases that look like steps after sentence re-splitting but are not
/// actual instructions.
pub const METADATA_WORDS: &[&str] = &[
    "hands on", "hands-on", "prep time", "cook time", "total time", "bake time",
    "refrigerate in", "store in an airtight", "nutrition per", "per serving",
];

/// Measurement words used to reject a candidate subtitle line.
pub const MEASUREMENT_WORDS: &[&str] = &[
    "cup", "cups", "tablespoon", "tablespoons", "tbsp", "teaspoon", "teaspoons",
    "tsp", "ounce", "ounces", "oz", "pound", "pounds", "lb", "gram", "grams",
    "kg", "ml", "liter", "litre", "pinch", "dash", "quart", "pint", "gallon",
];

/// Cookbook chapter/category headers that are never recipe titles.
pub const CHAPTER_HEADERS: &[&str] = &[
    "appetizers", "starters", "desserts", "mains", "main courses", "sides",
    "side dishes", "drinks", "cocktails", "breakfast", "brunch", "salads",
    "soups", "breads", "basics",
];

/// Standalone food nouns that pair with an adjacent bare number into one
/// ingredient line (vertically misaligned OCR output).
pub const FOOD_NOUNS: &[&str] = &[
    "egg", "eggs", "egg yolks", "egg whites", "apple", "apples", "onion",
    "onions", "lemon", "lemons", "lime", "limes", "orange", "oranges", "banana",
    "bananas", "carrot", "carrots", "potato", "potatoes", "tomato", "tomatoes",
    "shallot", "shallots", "garlic cloves", "scallions", "avocado", "avocados",
];

lazy_static! {
    static ref ACTION_VERB_SET: HashSet<&'static str> = ACTION_VERBS.iter().copied().collect();

    /// The ingredient-amount prefix grammar: a digit amount, ASCII fraction,
    /// mixed number, or vulgar fraction glyph at the start of a line.
    pub static ref AMOUNT_PREFIX: Regex = Regex::new(
        r"^\s*(?:\d+\s+\d+/\d+|\d+/\d+|\d+(?:\.\d+)?[¼½¾⅓⅔⅛⅜⅝⅞]?|[¼½¾⅓⅔⅛⅜⅝⅞])\s*[^\s.)]"
    )
    .expect("amount prefix pattern should be valid");

    /// Section header lines that switch the segmentation state.
    pub static ref SECTION_HEADER: Regex = Regex::new(
        r"(?i)^\s*(?:for the .{1,40}:?|(?:ingredients?|directions?|instructions?|method|steps|metric)\s*:?)\s*$"
    )
    .expect("section header pattern should be valid");

    /// Serving-count patterns in priority order: makes/yields, serves, N servings,
    /// N portions.
    pub static ref SERVES_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)\b(?:makes|yields?)\s+(?:about\s+)?(\d+)").unwrap(),
        Regex::new(r"(?i)\bserves\s+(?:about\s+)?(\d+)").unwrap(),
        Regex::new(r"(?i)\b(\d+)\s+servings\b").unwrap(),
        Regex::new(r"(?i)\b(\d+)\s+portions\b").unwrap(),
    ];

    /// Numbered direction step prefix: "3.", "3)", "Step 3:".
    pub static ref NUMBERED_STEP: Regex =
        Regex::new(r"(?i)^\s*(?:step\s+(\d+)\s*[:.]?|(\d+)\s*[.)])\s+(\S.*)$")
            .expect("numbered step pattern should be valid");
}

/// Lowercased first word of a line, punctuation stripped
fn first_word(line: &str) -> Option<String> {
    line.split_whitespace().next().map(|w| {
        w.trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase()
    })
}

/// Whether the line leads with a cooking action verb
pub fn starts_with_action_verb(line: &str) -> bool {
    first_word(line)
        .map(|w| ACTION_VERB_SET.contains(w.as_str()))
        .unwrap_or(false)
}

/// Number of cooking action verbs appearing anywhere in the line
pub fn action_verb_count(line: &str) -> usize {
    line.split_whitespace()
        .filter_map(|w| {
            let clean = w
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            ACTION_VERB_SET.contains(clean.as_str()).then_some(())
        })
        .count()
}

/// Whether the line contains any cooking action verb
pub fn contains_action_verb(line: &str) -> bool {
    action_verb_count(line) > 0
}

/// Whether the line contains a direction-sentence fragment
pub fn contains_direction_fragment(line: &str) -> bool {
    let lower = line.to_lowercase();
    DIRECTION_FRAGMENTS.iter().any(|f| lower.contains(f))
}

/// Number of narrative vocabulary hits in the line
pub fn narrative_hit_count(line: &str) -> usize {
    let lower = line.to_lowercase();
    NARRATIVE_WORDS.iter().filter(|w| lower.contains(*w)).count()
}

/// Whether the line contains a measurement word
pub fn contains_measurement_word(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .any(|w| MEASUREMENT_WORDS.contains(&w))
}

/// Whether the line matches the serving-count grammar
pub fn is_serves_line(line: &str) -> bool {
    SERVES_PATTERNS.iter().any(|p| p.is_match(line))
}

/// Whether the trimmed line is a known cookbook chapter/category header
pub fn is_chapter_header(line: &str) -> bool {
    let lower = line.trim().trim_end_matches(':').to_lowercase();
    CHAPTER_HEADERS.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_prefix_shapes() {
        assert!(AMOUNT_PREFIX.is_match("2 cups sugar"));
        assert!(AMOUNT_PREFIX.is_match("1/2 cup milk"));
        assert!(AMOUNT_PREFIX.is_match("1 1/2 cups flour"));
        assert!(AMOUNT_PREFIX.is_match("½ tsp salt"));
        assert!(AMOUNT_PREFIX.is_match("1½ cups flour"));
        assert!(AMOUNT_PREFIX.is_match("2.5 oz gin"));

        assert!(!AMOUNT_PREFIX.is_match("Preheat oven to 350"));
        assert!(!AMOUNT_PREFIX.is_match("sugar"));
        assert!(!AMOUNT_PREFIX.is_match("2"));
        assert!(!AMOUNT_PREFIX.is_match("1. Preheat oven."));
        assert!(!AMOUNT_PREFIX.is_match("2) Mix flour."));
    }

    #[test]
    fn test_section_headers() {
        assert!(SECTION_HEADER.is_match("Ingredients"));
        assert!(SECTION_HEADER.is_match("INGREDIENTS:"));
        assert!(SECTION_HEADER.is_match("Method"));
        assert!(SECTION_HEADER.is_match("Steps"));
        assert!(SECTION_HEADER.is_match("Metric"));
        assert!(SECTION_HEADER.is_match("For the frosting:"));

        assert!(!SECTION_HEADER.is_match("Mix the ingredients together"));
        assert!(!SECTION_HEADER.is_match("2 cups flour"));
    }

    #[test]
    fn test_action_verbs() {
        assert!(starts_with_action_verb("Preheat the oven to 375°F."));
        assert!(starts_with_action_verb("mix well"));
        assert!(!starts_with_action_verb("2 cups flour"));
        assert!(!starts_with_action_verb("Butter for greasing"));

        assert_eq!(action_verb_count("Mix and stir until combined"), 2);
        assert_eq!(action_verb_count("salt and pepper"), 0);
    }

    #[test]
    fn test_numbered_step_shapes() {
        for line in ["1. Preheat oven.", "2) Mix flour.", "Step 3: Bake."] {
            assert!(NUMBERED_STEP.is_match(line), "should match: {line}");
        }
        assert!(!NUMBERED_STEP.is_match("Preheat oven."));
        assert!(!NUMBERED_STEP.is_match("12 cups stock"));
    }

    #[test]
    fn test_serves_detection() {
        assert!(is_serves_line("Serves 4"));
        assert!(is_serves_line("Makes 24 cookies"));
        assert!(is_serves_line("Yields 12"));
        assert!(is_serves_line("6 servings"));
        assert!(!is_serves_line("2 cups flour"));
    }

    #[test]
    fn test_chapter_headers() {
        assert!(is_chapter_header("Desserts"));
        assert!(is_chapter_header("APPETIZERS"));
        assert!(is_chapter_header("Mains:"));
        assert!(!is_chapter_header("Grandma's Apple Pie"));
    }

    #[test]
    fn test_narrative_hits() {
        assert!(narrative_hit_count("My grandmother made this every christmas") >= 2);
        assert_eq!(narrative_hit_count("2 cups flour"), 0);
    }
}
