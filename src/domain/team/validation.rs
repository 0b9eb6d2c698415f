use thiserror::Error;

use super::team::Team;

/// Presence check failures for the registration form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Checks the fields the registration form treats as mandatory
///
/// Name and founding year must be non-empty. Title count and image URL may
/// be empty. Nothing is checked beyond presence: the founding year is not
/// required to be numeric.
///
/// The registry never calls this; it is the caller's decision whether to
/// submit a team.
pub fn require_fields(team: &Team) -> Result<(), ValidationError> {
    if team.name().is_empty() {
        return Err(ValidationError::MissingField("name"));
    }

    if team.founding_year().is_empty() {
        return Err(ValidationError::MissingField("founding year"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_year_are_enough() {
        assert!(require_fields(&Team::new("River", "1901", "", "")).is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        let result = require_fields(&Team::new("", "1901", "38", ""));

        assert_eq!(result, Err(ValidationError::MissingField("name")));
    }

    #[test]
    fn whitespace_counts_as_present() {
        assert!(require_fields(&Team::new("   ", " ", "", "")).is_ok());
    }

    #[test]
    fn missing_founding_year_is_rejected() {
        let result = require_fields(&Team::new("River", "", "38", ""));

        assert_eq!(result, Err(ValidationError::MissingField("founding year")));
        assert_eq!(result.unwrap_err().to_string(), "founding year is required");
    }

    #[test]
    fn year_is_not_checked_for_digits() {
        assert!(require_fields(&Team::new("River", "mil novecientos", "", "")).is_ok());
    }
}
