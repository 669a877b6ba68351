//! Normalized itinerary structures handed to presentation code

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TripRequest;
use crate::llm::LlmProvider;

/// One day's worth of activity lines
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DaySection {
    /// Positional title, "Day 1", "Day 2", ...
    pub title: String,
    /// Activity lines in the order the model wrote them
    pub items: Vec<String>,
}

impl DaySection {
    /// Section titled by its 1-based position
    #[must_use]
    pub fn numbered(position: usize, items: Vec<String>) -> Self {
        Self {
            title: format!("Day {position}"),
            items,
        }
    }
}

/// Result of normalizing one raw model response
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParsedItinerary {
    pub days: Vec<DaySection>,
    /// Cost lines carrying a currency marker, in source order
    pub cost_summary: Vec<String>,
}

impl ParsedItinerary {
    /// True when there is nothing worth rendering
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cost_summary.is_empty() && self.days.iter().all(|day| day.items.is_empty())
    }

    /// Total number of activity lines across all days
    #[must_use]
    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|day| day.items.len()).sum()
    }

    /// Plain-text rendering for terminal output
    #[must_use]
    pub fn format_text(&self) -> String {
        if self.is_empty() {
            return "No itinerary found.\n".to_string();
        }

        let mut out = String::new();
        for day in &self.days {
            out.push_str(&day.title);
            out.push('\n');
            for item in &day.items {
                out.push_str("  - ");
                out.push_str(item);
                out.push('\n');
            }
        }
        if !self.cost_summary.is_empty() {
            out.push_str("Cost Summary\n");
            for line in &self.cost_summary {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

/// Planner output: a normalized itinerary plus how it was produced
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedItinerary {
    pub request: TripRequest,
    /// Inclusive trip length derived from the request dates
    pub diff_days: u32,
    /// Number of days requested from the model (capped)
    pub total_days: u32,
    pub provider: LlmProvider,
    pub itinerary: ParsedItinerary,
    /// Served from the itinerary cache instead of a fresh generation
    pub cached: bool,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let itinerary = ParsedItinerary {
            days: vec![DaySection::numbered(1, vec!["Visit the old town".into()])],
            cost_summary: vec!["Total: $50".into()],
        };
        let json = serde_json::to_value(&itinerary).unwrap();
        assert_eq!(json["days"][0]["title"], "Day 1");
        assert_eq!(json["costSummary"][0], "Total: $50");
    }

    #[test]
    fn test_is_empty() {
        assert!(ParsedItinerary::default().is_empty());

        let only_blank_day = ParsedItinerary {
            days: vec![DaySection::numbered(1, vec![])],
            cost_summary: vec![],
        };
        assert!(only_blank_day.is_empty());
        assert_eq!(only_blank_day.activity_count(), 0);
    }

    #[test]
    fn test_format_text() {
        let itinerary = ParsedItinerary {
            days: vec![DaySection::numbered(1, vec!["Walk along the river".into()])],
            cost_summary: vec!["Food: $30".into()],
        };
        let text = itinerary.format_text();
        assert!(text.starts_with("Day 1\n  - Walk along the river\n"));
        assert!(text.contains("Cost Summary\n  Food: $30\n"));
        assert_eq!(ParsedItinerary::default().format_text(), "No itinerary found.\n");
    }
}
