//! Response extractor: turns the AI's free-text recommendation into college cards.
//!
//! The reply is prose with loosely structured lists, so extraction is heuristic:
//! 1. Segment the text into chunks at list markers / institution headings
//! 2. Pull name, location, fees, rating, strengths, requirements out of each chunk
//! 3. Fall back to evenly sized line groups when no chunk looks like an entry
//!
//! `extract` is total: any input (including `""`) yields 0–5 records, never an error.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MAX_CANDIDATES: usize = 5;
const MAX_STRENGTHS: usize = 6;
const MAX_REQUIREMENTS: usize = 5;
/// Chunks shorter than this (after trimming) are noise, not entries.
const MIN_CHUNK_CHARS: usize = 50;
const MAX_DESCRIPTION_CHARS: usize = 200;
const MAX_FALLBACK_DESCRIPTION_CHARS: usize = 150;
const DESCRIPTION_LINES: usize = 3;

pub const LOCATION_NOT_SPECIFIED: &str = "Location not specified";
pub const FEES_NOT_SPECIFIED: &str = "Fees not specified";
pub const GENERIC_DESCRIPTION: &str =
    "A prestigious institution offering quality education and excellent career opportunities.";
const FEES_CURRENCY_SYMBOL: &str = "₹";

const FALLBACK_LOCATION: &str = "India";
const FALLBACK_FEES: &str = "₹2-5 Lakhs";
const FALLBACK_STRENGTHS: &[&str] = &["Quality Education", "Good Placements", "Modern Facilities"];
const FALLBACK_REQUIREMENTS: &[&str] = &["Academic Excellence", "Entrance Exam"];

/// A single college card extracted from the AI response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeCandidate {
    pub name: String,
    pub location: String,
    pub fees: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    /// Synthetic "80%".."99%", not derived from the response content.
    pub match_percentage: String,
    pub strengths: Vec<String>,
    pub admission_requirements: Vec<String>,
    pub description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Patterns
// ────────────────────────────────────────────────────────────────────────────

// Segment boundaries. Both are tested anchored at a candidate position, which
// keeps the boundary text inside the following chunk.
static LIST_MARKER_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*[A-Z]").expect("list marker pattern"));
static INSTITUTION_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\n[A-Z][^:\n]*(?:University|College|Institute|School)")
        .expect("institution heading pattern")
});

static PURE_LIST_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.$").expect("marker"));
static TOP_N_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^top\s+\d+").expect("top n"));
static LEADING_NUMBERING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("numbering"));
static LEADING_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[*#-]+\s*").expect("bullet"));
static NUMBERED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").expect("numbered line"));

static LOCATION_WITH_CONNECTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i:located|situated|based)?\s*(?i:(?:in|at)\b)?\s*([A-Z][a-zA-Z\s,]+?)(?:\.|,|\n|$)",
    )
    .expect("location pattern")
});
static LOCATION_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Z][a-zA-Z\s]+,\s*[A-Z][a-zA-Z\s]+)").expect("city, region pattern")
});

// Up to 20 non-digit filler chars ("fees are ₹") may sit between the anchor and
// the amount; any currency glyph in there is dropped and replaced by `₹`.
static FEES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:fees?|tuition|cost)[^\d\n.]{0,20}?(\d[\d,]*(?:\.\d+)?(?:\s*(?:lakhs?|crores?|thousand|million)\b|[km]\b)?)",
    )
    .expect("fees pattern")
});

static RATING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:rating|ranked|score)[\s:]*(\d+(?:st|nd|rd|th)\b|\d+(?:\.\d+)?(?:/\d+(?:\.\d+)?)?)")
        .expect("rating pattern")
});

static STRENGTH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(?:known for|famous for|specializes in|strengths?[\s:]+)([^.\n]+)")
            .expect("strength pattern"),
        Regex::new(r"(?i)(?:excellent|outstanding|strong)\s+([^.\n]+)").expect("strength pattern"),
        Regex::new(r"(?i)(?:offers?|provides?)\s+([^.\n]+)").expect("strength pattern"),
    ]
});

static REQUIREMENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(?:admission|eligibility|requirements?)[\s:]*([^.\n]+)")
            .expect("requirement pattern"),
        Regex::new(r"(?i)(?:requires?|needs?)\s+([^.\n]+)").expect("requirement pattern"),
        Regex::new(r"(?i)(?:minimum|cutoff)\s+([^.\n]+)").expect("requirement pattern"),
    ]
});

// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

/// Extracts up to 5 college candidates from a raw AI response.
/// Uses the thread-local RNG for the synthetic match percentage.
pub fn extract(raw_text: &str) -> Vec<CollegeCandidate> {
    extract_with_rng(raw_text, &mut rand::thread_rng())
}

/// Same as [`extract`] with an explicit random source, for deterministic callers.
pub fn extract_with_rng<R: Rng>(raw_text: &str, rng: &mut R) -> Vec<CollegeCandidate> {
    let chunks: Vec<&str> = segment(raw_text)
        .into_iter()
        .filter(|chunk| chunk.trim().chars().count() >= MIN_CHUNK_CHARS)
        .collect();

    let mut candidates = if chunks.is_empty() {
        debug!("No usable chunks in AI response, using line-group fallback");
        fallback_candidates(raw_text, rng)
    } else {
        debug!("AI response segmented into {} usable chunks", chunks.len());
        chunks
            .iter()
            .enumerate()
            .map(|(index, chunk)| extract_candidate(chunk, index + 1, rng))
            .collect()
    };

    candidates.truncate(MAX_CANDIDATES);
    candidates
}

// ────────────────────────────────────────────────────────────────────────────
// Segmentation
// ────────────────────────────────────────────────────────────────────────────

/// Splits the text in front of every boundary. Empty pieces are dropped.
fn segment(raw_text: &str) -> Vec<&str> {
    let boundaries = raw_text.char_indices().filter_map(|(i, c)| {
        let rest = &raw_text[i..];
        let is_boundary = match c {
            '\n' => INSTITUTION_BOUNDARY.is_match(rest),
            // Only the first digit of a run opens a marker: "12." splits once.
            c if c.is_ascii_digit() => {
                !raw_text[..i].ends_with(|p: char| p.is_ascii_digit())
                    && LIST_MARKER_BOUNDARY.is_match(rest)
            }
            _ => false,
        };
        is_boundary.then_some(i)
    });

    let mut chunks = Vec::new();
    let mut start = 0;
    for end in boundaries {
        if end > start {
            chunks.push(&raw_text[start..end]);
        }
        start = end;
    }
    if start < raw_text.len() {
        chunks.push(&raw_text[start..]);
    }
    chunks
}

// ────────────────────────────────────────────────────────────────────────────
// Per-chunk field extraction
// ────────────────────────────────────────────────────────────────────────────

fn extract_candidate<R: Rng>(chunk: &str, ordinal: usize, rng: &mut R) -> CollegeCandidate {
    CollegeCandidate {
        name: extract_name(chunk, ordinal),
        location: extract_location(chunk),
        fees: extract_fees(chunk),
        rating: extract_rating(chunk),
        match_percentage: match_percentage(rng),
        strengths: collect_phrases(chunk, &STRENGTH_PATTERNS, 50, MAX_STRENGTHS),
        admission_requirements: collect_phrases(chunk, &REQUIREMENT_PATTERNS, 80, MAX_REQUIREMENTS),
        description: extract_description(chunk),
    }
}

fn extract_name(chunk: &str, ordinal: usize) -> String {
    chunk
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !PURE_LIST_MARKER.is_match(line) && !TOP_N_HEADING.is_match(line))
        .map(clean_heading)
        .find(|name| name.chars().count() > 10)
        .unwrap_or_else(|| format!("College {ordinal}"))
}

/// Strips "1. ", a leading bullet / heading marker and markdown bold.
fn clean_heading(line: &str) -> String {
    let line = LEADING_NUMBERING.replace(line, "");
    let line = LEADING_BULLET.replace(&line, "");
    line.replace("**", "").trim().to_string()
}

fn extract_location(chunk: &str) -> String {
    LOCATION_WITH_CONNECTOR
        .captures(chunk)
        .or_else(|| LOCATION_PAIR.captures(chunk))
        .and_then(|caps| caps.get(1))
        .map(|m| {
            let location = m.as_str().trim();
            location.strip_suffix(',').unwrap_or(location).trim().to_string()
        })
        .filter(|location| !location.is_empty())
        .unwrap_or_else(|| LOCATION_NOT_SPECIFIED.to_string())
}

fn extract_fees(chunk: &str) -> String {
    FEES.captures(chunk)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("{FEES_CURRENCY_SYMBOL}{}", m.as_str().trim_end_matches(',')))
        .unwrap_or_else(|| FEES_NOT_SPECIFIED.to_string())
}

fn extract_rating(chunk: &str) -> Option<String> {
    RATING
        .captures(chunk)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Runs every pattern over the chunk in order and keeps trimmed captures whose
/// length is strictly between 5 and `max_chars`, up to `limit` phrases.
fn collect_phrases(chunk: &str, patterns: &[Regex], max_chars: usize, limit: usize) -> Vec<String> {
    patterns
        .iter()
        .flat_map(|pattern| pattern.captures_iter(chunk))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|phrase| {
            let len = phrase.chars().count();
            len > 5 && len < max_chars
        })
        .take(limit)
        .collect()
}

fn extract_description(chunk: &str) -> String {
    let joined = chunk
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > 20 && !NUMBERED_LINE.is_match(line))
        .take(DESCRIPTION_LINES)
        .collect::<Vec<_>>()
        .join(" ");

    let description = truncate_chars(&joined, MAX_DESCRIPTION_CHARS);
    if description.is_empty() {
        GENERIC_DESCRIPTION.to_string()
    } else {
        description
    }
}

fn match_percentage<R: Rng>(rng: &mut R) -> String {
    format!("{}%", rng.gen_range(80..=99))
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback
// ────────────────────────────────────────────────────────────────────────────

/// Groups non-empty lines into at most 5 contiguous groups of
/// `ceil(lines / 5)` and turns each into a generic candidate.
fn fallback_candidates<R: Rng>(raw_text: &str, rng: &mut R) -> Vec<CollegeCandidate> {
    let lines: Vec<&str> = raw_text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return Vec::new();
    }
    let group_size = lines.len().div_ceil(MAX_CANDIDATES);

    lines
        .chunks(group_size)
        .enumerate()
        .map(|(index, group)| CollegeCandidate {
            name: format!("Recommended College {}", index + 1),
            location: FALLBACK_LOCATION.to_string(),
            fees: FALLBACK_FEES.to_string(),
            rating: None,
            match_percentage: match_percentage(rng),
            strengths: FALLBACK_STRENGTHS.iter().map(|s| s.to_string()).collect(),
            admission_requirements: FALLBACK_REQUIREMENTS.iter().map(|s| s.to_string()).collect(),
            description: format!(
                "{}...",
                truncate_chars(&group.join(" "), MAX_FALLBACK_DESCRIPTION_CHARS)
            ),
        })
        .collect()
}
