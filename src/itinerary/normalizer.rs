//! Turns free-text model output into day sections and a cost summary.
//!
//! The model is asked for `Day N` blocks followed by a `Cost Summary:` block,
//! but nothing enforces that, so this works purely on text heuristics and is
//! total: any input produces some (possibly empty) [`ParsedItinerary`].

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ItineraryParseError;
use crate::models::{DaySection, ParsedItinerary};

static COST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)cost summary:").expect("valid cost marker regex"));

static DAY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)day\s*\d").expect("valid day marker regex"));

/// Characters accepted as a single leading bullet
const BULLETS: &[char] = &['-', '•', '⭐', '🌟'];

/// Currency markers recognized in cost lines by default
pub const DEFAULT_CURRENCY_MARKERS: &[char] = &['$', '€', '£', '¥', '₹'];

const MIN_ITEM_CHARS: usize = 5;
const MAX_ITEM_CHARS: usize = 300;
const MIN_COST_CHARS: usize = 3;

/// Normalizer with a configurable set of currency markers
#[derive(Debug, Clone)]
pub struct ItineraryNormalizer {
    currency_markers: Vec<char>,
}

impl Default for ItineraryNormalizer {
    fn default() -> Self {
        Self {
            currency_markers: DEFAULT_CURRENCY_MARKERS.to_vec(),
        }
    }
}

impl ItineraryNormalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also accept `marker` in cost lines
    #[must_use]
    pub fn with_currency_marker(mut self, marker: char) -> Self {
        if !self.currency_markers.contains(&marker) {
            self.currency_markers.push(marker);
        }
        self
    }

    /// Normalize raw model output. Never fails.
    #[must_use]
    pub fn normalize(&self, text: &str) -> ParsedItinerary {
        let (main_text, cost_text) = match COST_MARKER.find(text) {
            Some(marker) => (&text[..marker.start()], &text[marker.end()..]),
            None => (text, ""),
        };

        // The fragment before the first marker belongs to no day.
        let days = DAY_MARKER
            .split(main_text)
            .skip(1)
            .filter(|fragment| !fragment.is_empty())
            .enumerate()
            .map(|(index, fragment)| DaySection::numbered(index + 1, day_items(fragment)))
            .collect();

        ParsedItinerary {
            days,
            cost_summary: self.cost_lines(cost_text),
        }
    }

    /// Normalize, rejecting output with no usable day content
    pub fn normalize_strict(&self, text: &str) -> Result<ParsedItinerary, ItineraryParseError> {
        let parsed = self.normalize(text);
        if parsed.days.is_empty() {
            return Err(ItineraryParseError::NoDaySections);
        }
        if parsed.activity_count() == 0 {
            return Err(ItineraryParseError::NoActivities {
                sections: parsed.days.len(),
            });
        }
        Ok(parsed)
    }

    fn cost_lines(&self, cost_text: &str) -> Vec<String> {
        cost_text
            .lines()
            .map(clean_line)
            .filter(|line| line.chars().count() > MIN_COST_CHARS)
            .filter(|line| line.contains(self.currency_markers.as_slice()))
            .map(str::to_string)
            .collect()
    }
}

/// Normalize with the default currency markers
#[must_use]
pub fn normalize_itinerary(text: &str) -> ParsedItinerary {
    ItineraryNormalizer::default().normalize(text)
}

fn day_items(fragment: &str) -> Vec<String> {
    fragment
        .lines()
        .map(clean_line)
        .filter(|line| {
            let chars = line.chars().count();
            chars > MIN_ITEM_CHARS && chars < MAX_ITEM_CHARS
        })
        .map(str::to_string)
        .collect()
}

/// Drop leading `*` markdown emphasis, then one bullet, then whitespace
fn clean_line(line: &str) -> &str {
    let line = line.trim_start_matches('*');
    let line = line.strip_prefix(BULLETS).unwrap_or(line);
    line.trim()
}
