//! Core data types for the trip workflow
//!
//! These types describe what flows between the orchestrator and its
//! collaborators: the submitted search, the destination options it yields,
//! the daily plan for one destination and the images illustrating it.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::plan::parse_days;

/// Wire and display format for dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Destination options keyed by destination name
///
/// Backend order carries no meaning, so a sorted map keeps snapshots stable.
pub type DestinationOptions = BTreeMap<String, DestinationOption>;

/// Ordered image URLs for one plan
pub type ImageSet = Vec<String>;

/// The criteria of one search submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub trip_type: String,
}

impl SearchCriteria {
    /// Create criteria without validating them
    ///
    /// Validation happens when the criteria are submitted.
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        budget: f64,
        trip_type: impl Into<String>,
    ) -> Self {
        Self {
            start_date,
            end_date,
            budget,
            trip_type: trip_type.into(),
        }
    }

    /// Build criteria from raw form fields and validate them
    pub fn parse(
        start_date: &str,
        end_date: &str,
        budget: &str,
        trip_type: &str,
    ) -> Result<Self, ValidationError> {
        let criteria = Self {
            start_date: parse_date("start_date", start_date)?,
            end_date: parse_date("end_date", end_date)?,
            budget: parse_budget(budget)?,
            trip_type: trip_type.trim().to_string(),
        };
        criteria.validate()?;
        Ok(criteria)
    }

    /// Check the submission invariants
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_date > self.end_date {
            return Err(ValidationError::DateOrder {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if !self.budget.is_finite() {
            return Err(ValidationError::InvalidBudget(self.budget.to_string()));
        }
        if self.budget <= 0.0 {
            return Err(ValidationError::NonPositiveBudget(self.budget));
        }
        if self.trip_type.trim().is_empty() {
            return Err(ValidationError::MissingField("trip_type"));
        }
        Ok(())
    }

    /// Number of calendar days covered, both ends included
    pub fn trip_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn parse_budget(value: &str) -> Result<f64, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField("budget"));
    }
    value
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidBudget(value.to_string()))
}

/// One candidate destination with its flight and hotel summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationOption {
    /// Destination name; filled from the map key when the backend omits it
    #[serde(default)]
    pub destination: String,
    pub depart_airport_code: String,
    pub destination_airport_code: String,
    #[serde(default)]
    pub is_direct_flight: bool,
    #[serde(default)]
    pub flight_numbers: Vec<String>,
    /// Display text; the backend sends either minutes or a formatted string
    #[serde(default, deserialize_with = "text_or_number")]
    pub total_duration: String,
    #[serde(default)]
    pub hotel_name: String,
    #[serde(default)]
    pub hotel_address: String,
    #[serde(default)]
    pub hotel_rating: Option<f64>,
    pub remaining_budget: f64,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<TextOrNumber>::deserialize(deserializer)? {
        Some(TextOrNumber::Text(text)) => text,
        Some(TextOrNumber::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

/// One displayed row of a daily plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// 1-based day index
    pub day: u32,
    /// Activities for the day
    pub text: String,
}

impl DayEntry {
    /// Display label, e.g. "Day 3"
    pub fn label(&self) -> String {
        format!("Day {}", self.day)
    }
}

/// Itinerary text for one chosen destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    /// Destination the plan was produced for
    pub destination: String,
    /// Criteria whose dates the plan covers
    pub criteria: SearchCriteria,
    /// Original text exactly as returned
    pub text: String,
    /// Per-day display rows derived from `text`
    pub days: Vec<DayEntry>,
}

impl DailyPlan {
    /// Wrap plan text and derive its day rows
    pub fn new(destination: impl Into<String>, criteria: SearchCriteria, text: impl Into<String>) -> Self {
        let text = text.into();
        let days = parse_days(&text);
        Self {
            destination: destination.into(),
            criteria,
            text,
            days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_parse_valid_criteria() {
        let criteria = SearchCriteria::parse("2025-06-01", "2025-06-07", "2000", " beach ").unwrap();
        assert_eq!(criteria.start_date, date("2025-06-01"));
        assert_eq!(criteria.end_date, date("2025-06-07"));
        assert_eq!(criteria.budget, 2000.0);
        assert_eq!(criteria.trip_type, "beach");
        assert_eq!(criteria.trip_days(), 7);
    }

    #[test]
    fn test_parse_reports_offending_field() {
        assert_eq!(
            SearchCriteria::parse("", "2025-06-07", "2000", "beach").unwrap_err(),
            ValidationError::MissingField("start_date")
        );
        assert_eq!(
            SearchCriteria::parse("2025-06-01", "06/07/2025", "2000", "beach").unwrap_err(),
            ValidationError::InvalidDate {
                field: "end_date",
                value: "06/07/2025".to_string()
            }
        );
        assert_eq!(
            SearchCriteria::parse("2025-06-01", "2025-06-07", "lots", "beach").unwrap_err(),
            ValidationError::InvalidBudget("lots".to_string())
        );
        assert_eq!(
            SearchCriteria::parse("2025-06-01", "2025-06-07", "2000", "  ").unwrap_err(),
            ValidationError::MissingField("trip_type")
        );
    }

    #[test]
    fn test_validate_rejects_reversed_dates() {
        let criteria = SearchCriteria::new(date("2025-06-07"), date("2025-06-01"), 2000.0, "beach");
        assert!(matches!(
            criteria.validate(),
            Err(ValidationError::DateOrder { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_budget() {
        let zero = SearchCriteria::new(date("2025-06-01"), date("2025-06-01"), 0.0, "city");
        assert_eq!(zero.validate(), Err(ValidationError::NonPositiveBudget(0.0)));

        let nan = SearchCriteria::new(date("2025-06-01"), date("2025-06-01"), f64::NAN, "city");
        assert!(matches!(nan.validate(), Err(ValidationError::InvalidBudget(_))));
    }

    #[test]
    fn test_single_day_trip_is_valid() {
        let criteria = SearchCriteria::new(date("2025-06-01"), date("2025-06-01"), 1.0, "city");
        assert!(criteria.validate().is_ok());
        assert_eq!(criteria.trip_days(), 1);
    }

    #[test]
    fn test_destination_option_accepts_numeric_duration() {
        let option: DestinationOption = serde_json::from_value(serde_json::json!({
            "depart_airport_code": "JFK",
            "destination_airport_code": "CUN",
            "is_direct_flight": true,
            "flight_numbers": ["AA 123"],
            "total_duration": 245,
            "hotel_name": "Hotel Playa",
            "hotel_address": "Blvd Kukulcan",
            "hotel_rating": 4.5,
            "remaining_budget": 500
        }))
        .unwrap();

        assert_eq!(option.total_duration, "245");
        assert_eq!(option.destination, "");
        assert_eq!(option.remaining_budget, 500.0);
        assert_eq!(option.hotel_rating, Some(4.5));
    }

    #[test]
    fn test_destination_option_requires_budget() {
        let result = serde_json::from_value::<DestinationOption>(serde_json::json!({
            "depart_airport_code": "JFK",
            "destination_airport_code": "CUN"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_daily_plan_keeps_original_text() {
        let criteria = SearchCriteria::new(date("2025-06-01"), date("2025-06-02"), 900.0, "city");
        let plan = DailyPlan::new("Lisbon", criteria, "Day 1: Alfama\nDay 2: Belem");
        assert_eq!(plan.text, "Day 1: Alfama\nDay 2: Belem");
        assert_eq!(plan.days.len(), 2);
        assert_eq!(plan.days[1].label(), "Day 2");
        assert_eq!(plan.days[1].text, "Belem");
    }
}
