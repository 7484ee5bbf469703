use thiserror::Error;

/// Validation errors for user-entered form values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("this field is required")]
    Blank,
    #[error("select a stop reason")]
    NoReasonSelected,
    #[error("unknown stop reason: {0}")]
    UnknownStopReason(String),
    #[error("unknown reason type: {0}")]
    UnknownReasonType(String),
    #[error("not a number: {0}")]
    NotANumber(String),
    #[error("latitude out of range: {0}")]
    LatitudeOutOfRange(f64),
    #[error("longitude out of range: {0}")]
    LongitudeOutOfRange(f64),
}

/// Returns the trimmed value, or [`ValidationError::Blank`] if nothing is left.
pub fn validate_required(value: &str) -> Result<&str, ValidationError> {
    match value.trim() {
        "" => Err(ValidationError::Blank),
        trimmed => Ok(trimmed),
    }
}

fn parse_coordinate(value: &str) -> Result<f64, ValidationError> {
    let trimmed = validate_required(value)?;
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::NotANumber(trimmed.to_string()))
}

/// Parses a latitude in decimal degrees, `[-90, 90]`.
pub fn parse_latitude(value: &str) -> Result<f64, ValidationError> {
    let lat = parse_coordinate(value)?;
    if (-90.0..=90.0).contains(&lat) {
        Ok(lat)
    } else {
        Err(ValidationError::LatitudeOutOfRange(lat))
    }
}

/// Parses a longitude in decimal degrees, `[-180, 180]`.
pub fn parse_longitude(value: &str) -> Result<f64, ValidationError> {
    let lng = parse_coordinate(value)?;
    if (-180.0..=180.0).contains(&lng) {
        Ok(lng)
    } else {
        Err(ValidationError::LongitudeOutOfRange(lng))
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    // --- validate_required ---

    #[test]
    fn required_trims() {
        assert_eq!(validate_required("  Tashkent "), Ok("Tashkent"));
    }

    #[test]
    fn required_empty() {
        assert_eq!(validate_required(""), Err(ValidationError::Blank));
    }

    #[test]
    fn required_whitespace_only() {
        assert_eq!(validate_required(" \t "), Err(ValidationError::Blank));
    }

    // --- coordinates ---

    #[test]
    fn latitude_valid() {
        assert_eq!(parse_latitude("41.2995"), Ok(41.2995));
    }

    #[test]
    fn latitude_boundaries() {
        assert_eq!(parse_latitude("-90"), Ok(-90.0));
        assert_eq!(parse_latitude("90"), Ok(90.0));
    }

    #[test]
    fn latitude_out_of_range() {
        assert_eq!(
            parse_latitude("90.5"),
            Err(ValidationError::LatitudeOutOfRange(90.5))
        );
    }

    #[test]
    fn latitude_not_a_number() {
        assert_eq!(
            parse_latitude("north"),
            Err(ValidationError::NotANumber("north".to_string()))
        );
    }

    #[test]
    fn latitude_nan_rejected() {
        assert_eq!(
            parse_latitude("NaN"),
            Err(ValidationError::NotANumber("NaN".to_string()))
        );
    }

    #[test]
    fn latitude_blank() {
        assert_eq!(parse_latitude(""), Err(ValidationError::Blank));
    }

    #[test]
    fn longitude_valid() {
        assert_eq!(parse_longitude("69.2401"), Ok(69.2401));
    }

    #[test]
    fn longitude_out_of_range() {
        assert_eq!(
            parse_longitude("-180.01"),
            Err(ValidationError::LongitudeOutOfRange(-180.01))
        );
    }

    #[quickcheck]
    fn longitude_in_range_always_accepted(raw: i32) -> bool {
        let lng = f64::from(raw % 180);
        parse_longitude(&lng.to_string()) == Ok(lng)
    }
}
