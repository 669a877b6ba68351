//! Data models for the travel planner
//!
//! - Trip: the request a user submits from the planning form
//! - Itinerary: normalized day sections and cost summary

pub mod itinerary;
pub mod trip;

pub use itinerary::{DaySection, GeneratedItinerary, ParsedItinerary};
pub use trip::TripRequest;
