//! `travelplanner` - AI-assisted trip itinerary generation
//!
//! This library turns a trip request into a generation prompt, sends it to a
//! generative AI provider, and normalizes the free-text answer into day
//! sections and a cost summary.

pub mod api;
pub mod cache;
pub mod config;
pub mod duration;
pub mod error;
pub mod itinerary;
pub mod llm;
pub mod logging;
pub mod models;
pub mod planner;
pub mod web;

// Re-export core types for public API
pub use cache::PersistentCache;
pub use config::TravelAiConfig;
pub use duration::{TripDuration, prompt_day_count, trip_length_days};
pub use error::{ItineraryParseError, TravelAiError};
pub use itinerary::{ItineraryNormalizer, build_itinerary_prompt, normalize_itinerary};
pub use llm::{LlmClient, LlmProvider};
pub use models::{DaySection, GeneratedItinerary, ParsedItinerary, TripRequest};
pub use planner::{ItineraryPlanner, PlannerSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelAiError>;
