//! # Import Data Model
//!
//! This module defines the data structures produced by the recipe import pipeline:
//! raw per-line parse records, cleaned ingredient entities, opportunistically
//! harvested nutrition facts, and the final confidence-scored import result.
//!
//! ## Core Concepts
//!
//! - **RawIngredientLine**: one candidate ingredient line as parsed, kept for
//!   review/debugging
//! - **StructuredIngredient**: the cleaned entity handed to downstream recipe
//!   construction
//! - **NutritionFacts**: per-serving nutrient values, each independently optional
//! - **ImportResult**: the full structured draft plus a per-field confidence score
//!
//! ## Usage
//!
//! ```rust
//! use recipe_import::import_model::RawIngredientLine;
//!
//! let line = RawIngredientLine::new("2 cups sugar")
//!     .with_name("sugar")
//!     .with_amount("2")
//!     .with_unit("cups");
//!
//! assert!(line.looks_like_ingredient);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// One candidate ingredient line with everything the grammar parser extracted from it.
///
/// The original text is always retained so the review UI can show what the parse was
/// based on. Fraction glyphs in `amount` are preserved as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIngredientLine {
    /// The original line text, unmodified
    pub text: String,

    /// The parsed ingredient name (e.g., "sugar", "all-purpose flour")
    pub name: String,

    /// Numeric/fraction amount text with glyphs preserved (e.g., "2", "1½", "¾")
    pub amount: Option<String>,

    /// Normalized unit token (e.g., "cups", "tbsp", "g")
    pub unit: Option<String>,

    /// Preparation note: free text such as a page reference, "optional", or a
    /// positionally paired metric equivalent
    pub preparation: Option<String>,

    /// Alternative ingredient text taken from an "or ..." clause
    pub alternative: Option<String>,

    /// Baker's-percentage text if the line used that notation (e.g., "65%")
    pub bakers_percentage: Option<String>,

    /// Whether the parse looks like a real ingredient (drives the ingredient
    /// confidence score)
    pub looks_like_ingredient: bool,

    /// Optional section/group marker (e.g., "For the frosting")
    pub section: Option<String>,
}

impl RawIngredientLine {
    /// Create a new raw line record; the whole text doubles as the name until a
    /// grammar rule replaces it
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            name: text.to_string(),
            amount: None,
            unit: None,
            preparation: None,
            alternative: None,
            bakers_percentage: None,
            looks_like_ingredient: true,
            section: None,
        }
    }

    /// Set the parsed ingredient name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the amount text
    pub fn with_amount(mut self, amount: &str) -> Self {
        self.amount = Some(amount.to_string());
        self
    }

    /// Set the normalized unit token
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    /// Set the preparation note
    pub fn with_preparation(mut self, preparation: &str) -> Self {
        self.preparation = Some(preparation.to_string());
        self
    }

    /// Set the alternative ingredient text
    pub fn with_alternative(mut self, alternative: &str) -> Self {
        self.alternative = Some(alternative.to_string());
        self
    }

    /// Set the baker's-percentage text
    pub fn with_bakers_percentage(mut self, pct: &str) -> Self {
        self.bakers_percentage = Some(pct.to_string());
        self
    }

    /// Mark whether the parse looks like a real ingredient
    pub fn with_looks_like_ingredient(mut self, flag: bool) -> Self {
        self.looks_like_ingredient = flag;
        self
    }

    /// Set the section/group marker
    pub fn with_section(mut self, section: &str) -> Self {
        self.section = Some(section.to_string());
        self
    }

    /// Append text to the preparation note, creating it if absent
    pub fn push_preparation(&mut self, extra: &str) {
        match &mut self.preparation {
            Some(prep) => {
                prep.push_str(", ");
                prep.push_str(extra);
            }
            None => self.preparation = Some(extra.to_string()),
        }
    }
}

/// The cleaned ingredient entity handed to downstream recipe construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredIngredient {
    /// The ingredient name
    pub name: String,

    /// Amount text, glyphs preserved
    pub amount: Option<String>,

    /// Normalized unit token
    pub unit: Option<String>,

    /// Preparation note
    pub preparation: Option<String>,
}

impl StructuredIngredient {
    /// Build the cleaned entity from a raw parsed line
    pub fn from_raw(raw: &RawIngredientLine) -> Self {
        Self {
            name: raw.name.clone(),
            amount: raw.amount.clone(),
            unit: raw.unit.clone(),
            preparation: raw.preparation.clone(),
        }
    }
}

impl fmt::Display for StructuredIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(amount) = &self.amount {
            write!(f, "{amount} ")?;
        }
        if let Some(unit) = &self.unit {
            write!(f, "{unit} ")?;
        }
        write!(f, "{}", self.name)?;
        if let Some(prep) = &self.preparation {
            write!(f, " ({prep})")?;
        }
        Ok(())
    }
}

/// Per-serving nutrition facts harvested opportunistically from the source text.
///
/// Every field is independently optional; a value is only filled in when a
/// nutrition-fact line yielded it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub serving_size: Option<String>,
    pub calories: Option<String>,
    pub fat: Option<String>,
    pub carbohydrates: Option<String>,
    pub protein: Option<String>,
    pub fiber: Option<String>,
    pub sodium: Option<String>,
    pub sugar: Option<String>,
}

impl NutritionFacts {
    /// True when no nutrient value was extracted at all
    pub fn is_empty(&self) -> bool {
        self.serving_size.is_none()
            && self.calories.is_none()
            && self.fat.is_none()
            && self.carbohydrates.is_none()
            && self.protein.is_none()
            && self.fiber.is_none()
            && self.sodium.is_none()
            && self.sugar.is_none()
    }
}

/// The structured import result handed to the review UI.
///
/// Every confidence lies in [0, 1]. Ingredient and direction lists preserve
/// discovery order, except that explicitly numbered directions are reordered by
/// their numeric label. The result is produced once per invocation and never
/// mutated afterward except to attach source image identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    /// Extracted recipe title
    pub title: String,
    pub title_confidence: f32,

    /// Course label ("Mains", "Desserts", "Drinks", "Apps", "Sides")
    pub course: String,
    pub course_confidence: f32,

    /// Serving count text (e.g., "4")
    pub serves: String,
    pub serves_confidence: f32,

    /// Total time text (e.g., "1 hr 15 min")
    pub total_time: String,
    pub time_confidence: f32,

    /// Intro/subtitle notes collected from the lines under the title
    pub notes: String,

    /// Cleaned ingredients in discovery order
    pub ingredients: Vec<StructuredIngredient>,
    pub ingredients_confidence: f32,

    /// Direction steps, numbered steps reordered by their label
    pub directions: Vec<String>,
    pub directions_confidence: f32,

    /// Garnish entries
    pub garnishes: Vec<String>,

    /// Nutrition facts, when a nutrition block was present
    pub nutrition: Option<NutritionFacts>,

    /// The raw recognized text this result was produced from
    pub raw_text: String,

    /// Layout-block text fragments from the recognition engine (stored, not parsed)
    pub raw_blocks: Vec<String>,

    /// Per-line parse records for review/debugging
    pub raw_ingredient_lines: Vec<RawIngredientLine>,

    /// Cuisine detection is not attempted; always 0
    pub cuisine_confidence: f32,

    /// Source tag describing where this import came from
    pub source: String,

    /// Source image identifiers, attached after processing completes
    pub source_images: Option<Vec<String>>,
}

impl ImportResult {
    /// Create an empty result for the given raw input with all confidences at 0
    pub fn empty(raw_text: &str, raw_blocks: &[String]) -> Self {
        Self {
            title: String::new(),
            title_confidence: 0.0,
            course: String::new(),
            course_confidence: 0.0,
            serves: String::new(),
            serves_confidence: 0.0,
            total_time: String::new(),
            time_confidence: 0.0,
            notes: String::new(),
            ingredients: Vec::new(),
            ingredients_confidence: 0.0,
            directions: Vec::new(),
            directions_confidence: 0.0,
            garnishes: Vec::new(),
            nutrition: None,
            raw_text: raw_text.to_string(),
            raw_blocks: raw_blocks.to_vec(),
            raw_ingredient_lines: Vec::new(),
            cuisine_confidence: 0.0,
            source: "photo".to_string(),
            source_images: None,
        }
    }

    /// Attach the identifiers of the photographed source images.
    ///
    /// This is the only mutation permitted after the pipeline has produced the
    /// result.
    pub fn attach_source_images(&mut self, ids: Vec<String>) {
        self.source_images = Some(ids);
    }

    /// All confidence values carried by this result, for invariant checks
    pub fn confidences(&self) -> [f32; 7] {
        [
            self.title_confidence,
            self.course_confidence,
            self.serves_confidence,
            self.time_confidence,
            self.ingredients_confidence,
            self.directions_confidence,
            self.cuisine_confidence,
        ]
    }
}
