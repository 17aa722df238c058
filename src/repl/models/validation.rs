//! # Field Validation
//!
//! Turns raw form text into typed simulation parameters. Every numeric input
//! in the form must be a finite number greater than zero; server counts must
//! also be whole numbers.

use thiserror::Error;

/// Why a raw input could not become a parameter value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("a value is required")]
    Empty,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("'{0}' is not a whole number")]
    NotAnInteger(String),

    #[error("must be greater than zero")]
    NotPositive,

    #[error("must be at most {max}")]
    TooLarge { max: u32 },
}

/// Parse a positive, finite real number (rates, durations)
pub fn parse_positive_real(raw: &str) -> Result<f64, FieldError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(FieldError::Empty);
    }

    let value: f64 = text
        .parse()
        .map_err(|_| FieldError::NotANumber(text.to_string()))?;

    // "NaN" and "inf" parse as f64 but are not usable parameters
    if !value.is_finite() {
        return Err(FieldError::NotANumber(text.to_string()));
    }
    if value <= 0.0 {
        return Err(FieldError::NotPositive);
    }

    Ok(value)
}

/// Parse a positive whole number (server counts)
pub fn parse_positive_integer(raw: &str) -> Result<u32, FieldError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(FieldError::Empty);
    }

    match text.parse::<u32>() {
        Ok(0) => Err(FieldError::NotPositive),
        Ok(value) => Ok(value),
        Err(_) => match text.parse::<f64>() {
            Ok(value) if value.is_finite() && value <= 0.0 => Err(FieldError::NotPositive),
            Ok(value) if value.is_finite() && value > f64::from(u32::MAX) => {
                Err(FieldError::TooLarge { max: u32::MAX })
            }
            Ok(value) if value.is_finite() => Err(FieldError::NotAnInteger(text.to_string())),
            _ => Err(FieldError::NotANumber(text.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_positive_real_should_accept_decimals() {
        assert_eq!(parse_positive_real("0.8"), Ok(0.8));
        assert_eq!(parse_positive_real(" 1000 "), Ok(1000.0));
        assert_eq!(parse_positive_real("1e3"), Ok(1000.0));
    }

    #[test]
    fn parse_positive_real_should_reject_non_numbers() {
        assert_eq!(
            parse_positive_real("abc"),
            Err(FieldError::NotANumber("abc".to_string()))
        );
        assert_eq!(
            parse_positive_real("NaN"),
            Err(FieldError::NotANumber("NaN".to_string()))
        );
        assert_eq!(
            parse_positive_real("inf"),
            Err(FieldError::NotANumber("inf".to_string()))
        );
        assert_eq!(parse_positive_real(""), Err(FieldError::Empty));
        assert_eq!(parse_positive_real("   "), Err(FieldError::Empty));
    }

    #[test]
    fn parse_positive_real_should_reject_zero_and_negatives() {
        assert_eq!(parse_positive_real("0"), Err(FieldError::NotPositive));
        assert_eq!(parse_positive_real("-1.5"), Err(FieldError::NotPositive));
    }

    #[test]
    fn parse_positive_integer_should_accept_whole_numbers() {
        assert_eq!(parse_positive_integer("2"), Ok(2));
        assert_eq!(parse_positive_integer(" 12 "), Ok(12));
    }

    #[test]
    fn parse_positive_integer_should_classify_failures() {
        assert_eq!(parse_positive_integer("0"), Err(FieldError::NotPositive));
        assert_eq!(parse_positive_integer("-1"), Err(FieldError::NotPositive));
        assert_eq!(
            parse_positive_integer("2.5"),
            Err(FieldError::NotAnInteger("2.5".to_string()))
        );
        assert_eq!(
            parse_positive_integer("two"),
            Err(FieldError::NotANumber("two".to_string()))
        );
        assert_eq!(parse_positive_integer(""), Err(FieldError::Empty));
    }

    #[test]
    fn parse_positive_integer_should_reject_counts_beyond_range() {
        assert_eq!(parse_positive_integer("4294967295"), Ok(u32::MAX));
        assert_eq!(
            parse_positive_integer("5000000000"),
            Err(FieldError::TooLarge { max: u32::MAX })
        );
        assert_eq!(
            FieldError::TooLarge { max: u32::MAX }.to_string(),
            "must be at most 4294967295"
        );
        assert_eq!(
            parse_positive_integer("1e10"),
            Err(FieldError::TooLarge { max: u32::MAX })
        );
        assert_eq!(
            parse_positive_integer("2.5"),
            Err(FieldError::NotAnInteger("2.5".to_string()))
        );
    }

    #[test]
    fn field_error_should_describe_problem() {
        assert_eq!(
            FieldError::NotANumber("x".to_string()).to_string(),
            "'x' is not a number"
        );
        assert_eq!(FieldError::NotPositive.to_string(), "must be greater than zero");
    }
}
