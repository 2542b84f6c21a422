//! # Title & Metadata Extractor
//!
//! Finds the recipe title, intro/subtitle notes, serving count, and total time
//! in the normalized text. All extraction is regex-driven over a bounded line
//! prefix, with fixed confidence values per branch.

use crate::vocabulary::{
    contains_measurement_word, is_chapter_header, is_serves_line, AMOUNT_PREFIX, NUMBERED_STEP,
    SECTION_HEADER, SERVES_PATTERNS,
};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

/// How many leading lines are considered when looking for a title.
const TITLE_SCAN_LINES: usize = 5;

/// How many lines below the title are scanned for subtitle/intro notes.
const NOTES_SCAN_LINES: usize = 12;

lazy_static! {
    static ref HANDS_ON: Regex =
        Regex::new(r"(?i)\bhands[- ]?on\b(?:\s*time)?\s*:?\s*([^\n]*)").unwrap();
    static ref BAKE_TIME: Regex =
        Regex::new(r"(?i)\bbak(?:e|ing)\b[^:\n]*?:?\s*(\d[^\n]*)").unwrap();
    static ref PREP_TIME: Regex =
        Regex::new(r"(?i)\bprep(?:aration)?(?:\s*time)?\b[:\s]+([^\n]*)").unwrap();
    static ref COOK_TIME: Regex =
        Regex::new(r"(?i)\bcook(?:ing)?(?:\s*time)?\b[:\s]+([^\n]*)").unwrap();
    static ref HOURS: Regex = Regex::new(r"(?i)(\d+)\s*(?:hours?|hrs?|hr)\b").unwrap();
    static ref MINUTES: Regex = Regex::new(r"(?i)(\d+)\s*(?:minutes?|mins?|min)\b").unwrap();
}

/// Title extraction outcome. `end_index` is the index just past the last line
/// consumed as a title part, so the notes scan knows where to start.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleExtraction {
    pub title: String,
    pub confidence: f32,
    pub end_index: usize,
}

/// Extracted title/serves/time/notes bundle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    pub title: String,
    pub title_confidence: f32,
    /// Index just past the last title line, for skipping it downstream
    pub title_end_index: usize,
    pub serves: String,
    pub serves_confidence: f32,
    pub total_time: String,
    pub time_confidence: f32,
    pub notes: String,
}

fn is_title_candidate(line: &str) -> bool {
    let len = line.chars().count();
    (2..=39).contains(&len)
}

fn contains_header_keyword(line: &str) -> bool {
    const HEADER_KEYWORDS: &[&str] =
        &["ingredient", "direction", "instruction", "method", "steps", "metric"];
    let lower = line.to_lowercase();
    HEADER_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

fn rejects_title(line: &str) -> bool {
    line.chars().count() > 80
        || contains_header_keyword(line)
        || is_serves_line(line)
        || is_chapter_header(line)
        || NUMBERED_STEP.is_match(line)
}

/// Scan the first lines of the document for a title: a run of one or two
/// short lines joined with a space. A line matching the ingredient-amount
/// grammar or a section header stops the search; rejected lines are skipped.
///
/// Confidence: 0.7 for one part, 0.6 for two, 0.3 for the first-line fallback.
pub fn extract_title(lines: &[&str]) -> TitleExtraction {
    let mut parts: Vec<&str> = Vec::new();
    let mut end_index = 0;

    for (i, line) in lines.iter().take(TITLE_SCAN_LINES).enumerate() {
        if AMOUNT_PREFIX.is_match(line) || SECTION_HEADER.is_match(line) {
            // An ingredient line or section header this early means the
            // title block is over (or absent).
            break;
        }
        if rejects_title(line) {
            if !parts.is_empty() {
                break;
            }
            continue;
        }
        if is_title_candidate(line) {
            parts.push(line);
            end_index = i + 1;
            if parts.len() == 2 {
                break;
            }
        } else if !parts.is_empty() {
            break;
        }
    }

    match parts.len() {
        1 => TitleExtraction {
            title: parts[0].to_string(),
            confidence: 0.7,
            end_index,
        },
        2 => TitleExtraction {
            title: format!("{} {}", parts[0], parts[1]),
            confidence: 0.6,
            end_index,
        },
        _ => {
            debug!("no qualifying title line; falling back to first line");
            TitleExtraction {
                title: lines.first().map(|l| l.to_string()).unwrap_or_default(),
                confidence: if lines.is_empty() { 0.0 } else { 0.3 },
                end_index: usize::from(!lines.is_empty()),
            }
        }
    }
}

/// Find the serving count. Patterns are tried in priority order, first
/// line-by-line (confidence 0.8), then over the whole text (0.7) to catch
/// values split across lines.
pub fn extract_serves(text: &str) -> (String, f32) {
    for pattern in SERVES_PATTERNS.iter() {
        for line in text.lines() {
            if let Some(caps) = pattern.captures(line) {
                return (caps[1].to_string(), 0.8);
            }
        }
    }
    for pattern in SERVES_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            return (caps[1].to_string(), 0.7);
        }
    }
    (String::new(), 0.0)
}

/// Total minutes expressed by a duration fragment ("1 hour 15 minutes",
/// "45 min").
fn parse_minutes(fragment: &str) -> Option<u32> {
    let hours: u32 = HOURS
        .captures(fragment)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0);
    let minutes: u32 = MINUTES
        .captures(fragment)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0);
    if hours == 0 && minutes == 0 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Render minutes as "H hr M min" at an hour or more, else "M min".
fn format_minutes(total: u32) -> String {
    if total >= 60 {
        let hours = total / 60;
        let rem = total % 60;
        if rem > 0 {
            format!("{hours} hr {rem} min")
        } else {
            format!("{hours} hr")
        }
    } else {
        format!("{total} min")
    }
}

/// Extract the total time. The "hands on X … bake Y" pair sums both at
/// confidence 0.85; otherwise separate "prep X" and "cook Y" labels sum
/// whatever is present at 0.75.
pub fn extract_total_time(text: &str) -> (String, f32) {
    let hands_on = HANDS_ON
        .captures(text)
        .and_then(|c| parse_minutes(&c[1]));
    let bake = BAKE_TIME.captures(text).and_then(|c| parse_minutes(&c[1]));

    if let (Some(hands_on), Some(bake)) = (hands_on, bake) {
        return (format_minutes(hands_on + bake), 0.85);
    }

    let prep = PREP_TIME.captures(text).and_then(|c| parse_minutes(&c[1]));
    let cook = COOK_TIME.captures(text).and_then(|c| parse_minutes(&c[1]));
    let total = prep.unwrap_or(0) + cook.unwrap_or(0);
    if total > 0 {
        return (format_minutes(total), 0.75);
    }

    (String::new(), 0.0)
}

fn is_subtitle_like(line: &str) -> bool {
    let len = line.chars().count();
    if !(2..=60).contains(&len) || contains_measurement_word(line) {
        return false;
    }
    let all_caps = line.chars().any(|c| c.is_alphabetic())
        && !line.chars().any(|c| c.is_lowercase());
    all_caps || is_title_case(line)
}

fn is_title_case(line: &str) -> bool {
    const STOP_WORDS: &[&str] = &["a", "an", "the", "of", "and", "with", "in", "for", "to", "or"];
    let mut words = 0;
    for word in line.split_whitespace() {
        let Some(first) = word.chars().next() else {
            continue;
        };
        if !first.is_alphabetic() {
            return false;
        }
        words += 1;
        if first.is_lowercase() && !STOP_WORDS.contains(&word.to_lowercase().as_str()) {
            return false;
        }
    }
    words >= 2
}

fn is_prose_like(line: &str) -> bool {
    const CONNECTORS: &[&str] = &[" this ", " was ", " my ", " is ", " it ", " of ", " from "];
    if line.chars().count() <= 40 {
        return false;
    }
    let padded = format!(" {} ", line.to_lowercase());
    line.contains(". ")
        || line.ends_with('.')
        || line.contains('!')
        || CONNECTORS.iter().any(|c| padded.contains(c))
}

/// Collect subtitle/intro lines between the title and the first ingredient or
/// section header, within a bounded window. "Makes/serves" lines are skipped
/// without ending the scan.
pub fn extract_notes(lines: &[&str], start: usize) -> String {
    let mut collected: Vec<&str> = Vec::new();

    for line in lines.iter().skip(start).take(NOTES_SCAN_LINES) {
        if SECTION_HEADER.is_match(line) || AMOUNT_PREFIX.is_match(line) {
            break;
        }
        if is_serves_line(line) {
            continue;
        }
        if is_subtitle_like(line) || is_prose_like(line) {
            collected.push(line);
        }
    }

    collected.join(" ")
}

/// Run all metadata extraction over the normalized text.
pub fn extract_metadata(text: &str) -> Metadata {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let title = extract_title(&lines);
    let (serves, serves_confidence) = extract_serves(text);
    let (total_time, time_confidence) = extract_total_time(text);
    let notes = extract_notes(&lines, title.end_index);

    Metadata {
        title: title.title,
        title_confidence: title.confidence,
        title_end_index: title.end_index,
        serves,
        serves_confidence,
        total_time,
        time_confidence,
        notes,
    }
}
