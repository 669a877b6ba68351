//! Itinerary text handling
//!
//! - Prompt construction from a trip request
//! - Normalization of the model's free-text answer

pub mod normalizer;
pub mod prompt;

pub use normalizer::{DEFAULT_CURRENCY_MARKERS, ItineraryNormalizer, normalize_itinerary};
pub use prompt::build_itinerary_prompt;
