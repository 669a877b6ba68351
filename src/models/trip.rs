//! Trip request submitted by the planning form

use serde::{Deserialize, Serialize};

use crate::TravelAiError;

/// Parameters of a trip to plan
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    /// Destination name as typed by the user
    pub location: String,
    /// Inclusive start date, usually `YYYY-MM-DD`
    #[serde(default)]
    pub start_date: Option<String>,
    /// Inclusive end date, usually `YYYY-MM-DD`
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    /// Total budget in the configured currency
    #[serde(default)]
    pub budget: i64,
    #[serde(default = "default_participants")]
    pub participants: u32,
    /// Kind of trip (leisure, adventure, business, ...)
    #[serde(rename = "type", default)]
    pub trip_type: String,
    /// Travel range (local, domestic, international, ...)
    #[serde(default)]
    pub range: String,
}

fn default_participants() -> u32 {
    1
}

impl TripRequest {
    /// Create a request for a location and date span, other fields defaulted
    #[must_use]
    pub fn new(location: impl Into<String>, start_date: Option<&str>, end_date: Option<&str>) -> Self {
        Self {
            location: location.into(),
            start_date: start_date.map(str::to_string),
            end_date: end_date.map(str::to_string),
            participants: default_participants(),
            ..Self::default()
        }
    }

    /// Check the fields generation depends on
    pub fn validate(&self) -> Result<(), TravelAiError> {
        if self.location.trim().is_empty() {
            return Err(TravelAiError::validation("location must not be empty"));
        }
        if self.participants == 0 {
            return Err(TravelAiError::validation("at least one participant is required"));
        }
        if self.budget < 0 {
            return Err(TravelAiError::validation("budget cannot be negative"));
        }
        Ok(())
    }

    /// Stable key for caching generated itineraries of this request
    #[must_use]
    pub fn cache_key(&self, total_days: u32) -> String {
        format!(
            "itinerary:{}:{}:{}:{}:{}:{}:{}:{}:{}:{}",
            self.location.trim().to_lowercase(),
            self.start_date.as_deref().unwrap_or(""),
            self.end_date.as_deref().unwrap_or(""),
            self.start_time,
            self.end_time,
            self.budget,
            self.participants,
            self.trip_type.to_lowercase(),
            self.range.to_lowercase(),
            total_days
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_form_payload() {
        let json = r#"{
            "location": "Lisbon",
            "startDate": "2024-06-01",
            "endDate": "2024-06-04",
            "startTime": "09:00",
            "endTime": "18:00",
            "budget": 1200,
            "participants": 2,
            "type": "leisure",
            "range": "international"
        }"#;
        let request: TripRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.location, "Lisbon");
        assert_eq!(request.start_date.as_deref(), Some("2024-06-01"));
        assert_eq!(request.trip_type, "leisure");
        assert_eq!(request.participants, 2);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let request: TripRequest = serde_json::from_str(r#"{"location": "Oslo"}"#).unwrap();
        assert!(request.start_date.is_none());
        assert_eq!(request.participants, 1);
        assert_eq!(request.budget, 0);
    }

    #[test]
    fn test_validate() {
        assert!(TripRequest::new("Kyoto", None, None).validate().is_ok());
        assert!(TripRequest::new("  ", None, None).validate().is_err());

        let mut request = TripRequest::new("Kyoto", None, None);
        request.participants = 0;
        assert!(request.validate().is_err());

        request.participants = 2;
        request.budget = -1;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_cache_key_ignores_location_case() {
        let a = TripRequest::new("Rome", Some("2024-05-01"), Some("2024-05-03"));
        let b = TripRequest::new(" rome ", Some("2024-05-01"), Some("2024-05-03"));
        assert_eq!(a.cache_key(3), b.cache_key(3));
        assert_ne!(a.cache_key(3), a.cache_key(4));
    }
}
