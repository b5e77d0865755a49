//! Typed path parameter helpers.

use smartpark_core::error::AppError;

/// Parses a numeric record or payment id from a path segment.
pub fn parse_id(s: &str) -> Result<i64, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid id: {s}")))
}

/// Parses a slot number from a path segment.
pub fn parse_slot_number(s: &str) -> Result<i32, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid slot number: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(parse_id("abc").is_err());
        assert!(parse_slot_number("99999999999").is_err());
    }
}
