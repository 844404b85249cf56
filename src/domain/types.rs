/// Core identifier and date types used throughout the domain layer
///
/// Habit ids are small integers assigned by the storage layer. A fixed
/// well-known id identifies the bootstrap habit so that single-habit
/// callers never need a setup step.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::DomainError;

/// Unique identifier for a habit
///
/// This is a wrapper around the storage-assigned row id to provide type
/// safety - a habit id cannot be confused with any other integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitId(pub i64);

impl HabitId {
    /// The bootstrap habit seeded at first initialization
    ///
    /// Single-habit callers (the default-habit convenience tools) always
    /// operate on this id.
    pub const DEFAULT: HabitId = HabitId(1);

    /// Parse a habit id from its string representation
    pub fn from_string(s: &str) -> Result<Self, DomainError> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::Validation {
                message: format!("Invalid habit id '{}'", s),
            })
    }
}

impl std::fmt::Display for HabitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a calendar date in the wire format used at every boundary
///
/// Dates are always `YYYY-MM-DD`, interpreted as UTC calendar days with no
/// time component.
pub fn parse_check_date(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(format!("Expected YYYY-MM-DD, got '{}'", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_habit_id_round_trip() {
        let id = HabitId(42);
        assert_eq!(HabitId::from_string(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_default_habit_id_is_fixed() {
        assert_eq!(HabitId::DEFAULT, HabitId(1));
    }

    #[test]
    fn test_invalid_habit_id() {
        assert!(HabitId::from_string("not-a-number").is_err());
        assert!(HabitId::from_string("").is_err());
    }

    #[test]
    fn test_parse_check_date() {
        let date = parse_check_date("2024-06-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

        assert!(parse_check_date("06/01/2024").is_err());
        assert!(parse_check_date("2024-06-01T12:00:00Z").is_err());
    }
}
