//! # Import Pipeline
//!
//! Ties the stages together: artifact normalization, optional multi-source
//! merge, metadata extraction, course classification, content segmentation,
//! and confidence scoring. The whole pipeline is a pure synchronous transform;
//! each invocation owns its working state for its duration only.

use crate::artifact_normalizer::normalize_artifacts;
use crate::confidence::{direction_confidence, ingredient_confidence};
use crate::course::classify_course;
use crate::import_errors::ImportError;
use crate::import_model::{ImportResult, StructuredIngredient};
use crate::metadata::extract_metadata;
use crate::segmenter::segment;
use crate::source_merger::merge_sources;
use log::info;
use tracing::debug;

/// Recognized text from one photographed page: the raw text plus the layout
/// block fragments the recognition engine reported alongside it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceText {
    pub text: String,
    pub blocks: Vec<String>,
}

impl SourceText {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            blocks: Vec::new(),
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<String>) -> Self {
        self.blocks = blocks;
        self
    }
}

/// The recipe import pipeline. Stateless; safe to reuse across imports.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeImporter;

impl RecipeImporter {
    pub fn new() -> Self {
        Self
    }

    /// Run the full pipeline over one recognized text. Empty input is a valid
    /// outcome and produces an empty result with all confidences at zero.
    pub fn import(&self, raw_text: &str, raw_blocks: &[String]) -> ImportResult {
        if raw_text.trim().is_empty() {
            debug!("empty input text; returning empty result");
            return ImportResult::empty(raw_text, raw_blocks);
        }

        let normalized = normalize_artifacts(raw_text);
        let metadata = extract_metadata(&normalized);
        let (course, course_confidence) = classify_course(&normalized);

        // Segment everything below the title so title lines are not
        // re-classified; a low-confidence fallback title stays in the body.
        let lines: Vec<&str> = normalized
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let body = if metadata.title_confidence >= 0.6 {
            lines[metadata.title_end_index..].join("\n")
        } else {
            lines.join("\n")
        };
        let segmentation = segment(&body);

        let ingredients: Vec<StructuredIngredient> = segmentation
            .ingredients
            .iter()
            .filter(|l| l.looks_like_ingredient)
            .map(StructuredIngredient::from_raw)
            .collect();
        let ingredients_confidence = ingredient_confidence(
            &segmentation.ingredients,
            segmentation.saw_ingredient_header,
        );
        let directions_confidence = direction_confidence(
            segmentation.directions.len(),
            segmentation.saw_direction_header,
        );

        info!(
            "import finished: {} ingredients, {} directions, title \"{}\"",
            ingredients.len(),
            segmentation.directions.len(),
            metadata.title
        );

        ImportResult {
            title: metadata.title,
            title_confidence: metadata.title_confidence,
            course,
            course_confidence,
            serves: metadata.serves,
            serves_confidence: metadata.serves_confidence,
            total_time: metadata.total_time,
            time_confidence: metadata.time_confidence,
            notes: metadata.notes,
            ingredients,
            ingredients_confidence,
            directions: segmentation.directions,
            directions_confidence,
            garnishes: segmentation.garnishes,
            nutrition: segmentation.nutrition,
            raw_text: raw_text.to_string(),
            raw_blocks: raw_blocks.to_vec(),
            raw_ingredient_lines: segmentation.ingredients,
            cuisine_confidence: 0.0,
            source: "photo".to_string(),
            source_images: None,
        }
    }

    /// Merge several per-page texts into one logical document, then run the
    /// full pipeline over it. Zero usable sources is an error.
    pub fn import_sources(&self, sources: &[SourceText]) -> Result<ImportResult, ImportError> {
        let texts: Vec<String> = sources.iter().map(|s| s.text.clone()).collect();
        let merged = merge_sources(&texts)?;
        let blocks: Vec<String> = sources.iter().flat_map(|s| s.blocks.clone()).collect();
        Ok(self.import(&merged, &blocks))
    }
}
