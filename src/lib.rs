//! # Recipe Import
//!
//! Turns OCR text recognized from recipe photos into a structured,
//! confidence-scored recipe draft for human review. Purely rule-based and
//! deterministic: no statistical classification, no network, no persistence.

pub mod artifact_normalizer;
pub mod confidence;
pub mod course;
pub mod import_errors;
pub mod import_model;
pub mod ingredient_parser;
pub mod metadata;
pub mod pipeline;
pub mod quick_parser;
pub mod segmenter;
pub mod source_merger;
pub mod vocabulary;

pub use import_errors::ImportError;
pub use import_model::{ImportResult, NutritionFacts, RawIngredientLine, StructuredIngredient};
pub use pipeline::{RecipeImporter, SourceText};
