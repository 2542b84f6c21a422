//! # Multi-Source Merger
//!
//! When a recipe spans several photographed pages, each page yields its own
//! recognized text. The merger groups every source's lines by section using
//! header keywords, then rebuilds one logical document: the first source's
//! title, all ingredients under one header, all directions under one header,
//! all notes under one header, in source order.

use crate::import_errors::ImportError;
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceSection {
    Other,
    Ingredients,
    Directions,
    Notes,
}

#[derive(Debug, Default)]
struct GroupedSource {
    other: Vec<String>,
    ingredients: Vec<String>,
    directions: Vec<String>,
    notes: Vec<String>,
}

fn header_section(line: &str) -> Option<SourceSection> {
    let lower = line.to_lowercase();
    if lower.contains("ingredient") {
        Some(SourceSection::Ingredients)
    } else if lower.contains("direction")
        || lower.contains("instruction")
        || lower.contains("method")
        || lower.contains("steps")
    {
        Some(SourceSection::Directions)
    } else if lower.contains("note") || lower.contains("tip") {
        Some(SourceSection::Notes)
    } else {
        None
    }
}

fn group_lines(text: &str) -> GroupedSource {
    let mut grouped = GroupedSource::default();
    let mut section = SourceSection::Other;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(next) = header_section(trimmed) {
            section = next;
            continue;
        }
        let bucket = match section {
            SourceSection::Other => &mut grouped.other,
            SourceSection::Ingredients => &mut grouped.ingredients,
            SourceSection::Directions => &mut grouped.directions,
            SourceSection::Notes => &mut grouped.notes,
        };
        bucket.push(trimmed.to_string());
    }

    grouped
}

fn looks_like_title(line: &str) -> bool {
    line.chars().count() < 50
        && header_section(line).is_none()
        && !line.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Merge per-image texts into one logical document. Returns
/// [`ImportError::NoUsableSources`] when no source contributes any text.
pub fn merge_sources(sources: &[String]) -> Result<String, ImportError> {
    let grouped: Vec<GroupedSource> = sources
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| group_lines(s))
        .collect();

    if grouped.is_empty() {
        return Err(ImportError::NoUsableSources);
    }

    let mut merged: Vec<String> = Vec::new();

    // Pre-header lines are page furniture except a plausible title on the
    // first source's first line.
    if let Some(first_line) = grouped[0].other.first().filter(|l| looks_like_title(l)) {
        merged.push(first_line.clone());
    }

    let ingredients: Vec<&String> = grouped.iter().flat_map(|g| &g.ingredients).collect();
    if !ingredients.is_empty() {
        merged.push("Ingredients:".to_string());
        merged.extend(ingredients.into_iter().cloned());
    }

    let directions: Vec<&String> = grouped.iter().flat_map(|g| &g.directions).collect();
    if !directions.is_empty() {
        merged.push("Directions:".to_string());
        merged.extend(directions.into_iter().cloned());
    }

    let notes: Vec<&String> = grouped.iter().flat_map(|g| &g.notes).collect();
    if !notes.is_empty() {
        merged.push("Notes:".to_string());
        merged.extend(notes.into_iter().cloned());
    }

    debug!(
        "merged {} sources into {} lines",
        grouped.len(),
        merged.len()
    );
    info!("multi-source merge complete");

    Ok(merged.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_source_passes_through_sections() {
        let sources = vec![
            "Lemon Tart\nIngredients:\n2 cups flour\nDirections:\nMix well.".to_string(),
        ];
        let merged = merge_sources(&sources).unwrap();
        assert_eq!(
            merged,
            "Lemon Tart\nIngredients:\n2 cups flour\nDirections:\nMix well."
        );
    }

    #[test]
    fn test_ingredients_concatenate_in_source_order() {
        let sources = vec![
            "Ingredients:\n2 cups flour".to_string(),
            "Ingredients:\n1 cup sugar".to_string(),
            "Ingredients:\n3 eggs".to_string(),
        ];
        let merged = merge_sources(&sources).unwrap();
        let lines: Vec<&str> = merged.lines().collect();
        assert_eq!(
            lines,
            vec!["Ingredients:", "2 cups flour", "1 cup sugar", "3 eggs"]
        );
    }

    #[test]
    fn test_directions_from_second_page_follow_first() {
        let sources = vec![
            "Beef Stew\nIngredients:\n2 lb beef\nDirections:\nBrown the beef.".to_string(),
            "Directions:\nSimmer for two hours.".to_string(),
        ];
        let merged = merge_sources(&sources).unwrap();
        let direction_index = merged.find("Directions:").unwrap();
        let tail = &merged[direction_index..];
        assert!(tail.contains("Brown the beef.\nSimmer for two hours."));
    }

    #[test]
    fn test_notes_grouped_last() {
        let sources = vec![
            "Ingredients:\n2 cups flour\nNotes:\nBest served warm.".to_string(),
        ];
        let merged = merge_sources(&sources).unwrap();
        assert!(merged.ends_with("Notes:\nBest served warm."));
    }

    #[test]
    fn test_numeric_leading_first_line_not_title() {
        let sources = vec![
            "2 cups flour\nIngredients:\n1 cup sugar".to_string(),
        ];
        let merged = merge_sources(&sources).unwrap();
        assert!(!merged.contains("2 cups flour"));
        assert!(merged.starts_with("Ingredients:"));
    }

    #[test]
    fn test_empty_sources_error() {
        let err = merge_sources(&[]).unwrap_err();
        assert!(matches!(err, ImportError::NoUsableSources));

        let blank = vec!["   ".to_string(), "\n".to_string()];
        let err = merge_sources(&blank).unwrap_err();
        assert!(matches!(err, ImportError::NoUsableSources));
    }
}
